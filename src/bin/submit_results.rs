use anyhow::Result;
use digcomp_quiz_tools::orchestrator::{build_delivery_flow, submit_from_files, submitter_from_config};
use digcomp_quiz_tools::utils::logging;
use digcomp_quiz_tools::{Config, DeliveryOutcome};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    logging::init(config.verbose_logging);
    logging::log_startup("成绩提交");

    let flow = build_delivery_flow(&config)?;
    let outcome = submit_from_files(
        &flow,
        submitter_from_config(&config),
        &config.questions_input_path(),
        &config.answers_path(),
    )
    .await?;

    match outcome {
        DeliveryOutcome::Submitted { status } => info!("🎉 提交完成 (状态码 {})", status),
        DeliveryOutcome::LinkOpened { reason, .. } => info!("🎉 已生成预填链接 ({:?})", reason),
    }

    Ok(())
}
