//! 成绩提交器 - 编排层
//!
//! ## 职责
//!
//! 1. **装配**：按配置组装投递流程（HTTP 客户端 + 浏览器/控制台展示）
//! 2. **汇总**：读取题库和作答记录，计算领域成绩和总分
//! 3. **投递**：交给 `DeliveryFlow`，由它决定是否走预填链接

use crate::config::Config;
use crate::models::{load_answers, load_questions};
use crate::services::{
    aggregate_domains, BrowserPresenter, ConsolePresenter, DomainResults, FallbackPresenter, FormEndpoints,
    FormPayload, FormTransport, HttpFormClient, LinkPresenter, Submitter,
};
use crate::workflow::{DeliveryFlow, DeliveryOutcome};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// 默认的投递流程类型
pub type DefaultDeliveryFlow = DeliveryFlow<HttpFormClient, FallbackPresenter<BrowserPresenter, ConsolePresenter>>;

/// 按配置组装投递流程
pub fn build_delivery_flow(config: &Config) -> Result<DefaultDeliveryFlow> {
    let endpoints = FormEndpoints::from_base(&config.form_base_url)?;
    let transport = HttpFormClient::new(config.http_timeout())?;
    let presenter = FallbackPresenter::browser_then_console(config.browser_debug_port);

    Ok(DeliveryFlow::new(transport, presenter, endpoints).with_browser_mode(config.use_browser))
}

/// 配置中的提交人
pub fn submitter_from_config(config: &Config) -> Submitter {
    Submitter::new(&config.submitter_last_name, &config.submitter_first_name)
}

/// 提交已经计算好的领域成绩
pub async fn submit_domain_results<T, P>(
    flow: &DeliveryFlow<T, P>,
    submitter: Submitter,
    results: &DomainResults,
) -> Result<DeliveryOutcome>
where
    T: FormTransport,
    P: LinkPresenter,
{
    let payload = FormPayload::from_results(submitter, results, None);
    let outcome = flow.deliver(&payload).await?;
    Ok(outcome)
}

/// 从题库和作答记录文件计算成绩并提交
pub async fn submit_from_files<T, P>(
    flow: &DeliveryFlow<T, P>,
    submitter: Submitter,
    questions_path: &Path,
    answers_path: &Path,
) -> Result<DeliveryOutcome>
where
    T: FormTransport,
    P: LinkPresenter,
{
    // 先校验身份，避免无意义的读文件
    submitter.validate()?;

    let questions = load_questions(questions_path)
        .await
        .with_context(|| format!("无法加载题库: {}", questions_path.display()))?;
    let answers = load_answers(answers_path)
        .await
        .with_context(|| format!("无法加载作答记录: {}", answers_path.display()))?;

    let results = aggregate_domains(&answers, &questions);
    info!("📊 共 {} 个领域有作答记录", results.len());

    submit_domain_results(flow, submitter, &results).await
}
