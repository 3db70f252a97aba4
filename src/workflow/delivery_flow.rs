//! 成绩投递流程 - 流程层
//!
//! 核心职责：定义"一次提交"的完整流程
//!
//! 流程顺序：
//! 1. 校验提交人（失败直接拒绝，不发任何请求）
//! 2. 直接 POST 表单
//! 3. 预填链接（兜底，由用户手动点击提交）

use crate::error::AppResult;
use crate::services::{FormEndpoints, FormPayload, FormTransport, LinkPresenter};
use reqwest::Url;
use tracing::{info, warn};

/// 表单视为提交成功的状态码（含重定向）
pub const SUCCESS_STATUSES: [u16; 3] = [200, 302, 303];

/// 走兜底路径的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// 配置为直接使用浏览器
    BrowserMode,
    /// 表单要求登录 (401)
    AuthenticationRequired,
    /// 其他非成功状态码
    UnexpectedStatus(u16),
    /// 网络错误或超时
    Transport(String),
}

/// 投递结果（两种情况都视为成功）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// 表单已直接接收
    Submitted { status: u16 },
    /// 已生成预填链接，等待用户确认
    LinkOpened { url: Url, reason: FallbackReason },
}

/// 成绩投递流程
///
/// - 只依赖投递能力和展示能力
/// - 只在一次 POST 失败后切换到链接，不重试
pub struct DeliveryFlow<T, P> {
    transport: T,
    presenter: P,
    endpoints: FormEndpoints,
    use_browser: bool,
}

impl<T: FormTransport, P: LinkPresenter> DeliveryFlow<T, P> {
    pub fn new(transport: T, presenter: P, endpoints: FormEndpoints) -> Self {
        Self {
            transport,
            presenter,
            endpoints,
            use_browser: false,
        }
    }

    /// 跳过 POST，直接打开预填链接
    pub fn with_browser_mode(mut self, use_browser: bool) -> Self {
        self.use_browser = use_browser;
        self
    }

    pub async fn deliver(&self, payload: &FormPayload) -> AppResult<DeliveryOutcome> {
        payload.submitter.validate()?;

        if self.use_browser {
            return self.open_prefilled(payload, FallbackReason::BrowserMode).await;
        }

        let fields = payload.fields();
        let reason = match self.transport.post_form(&self.endpoints.submit_url, &fields).await {
            Ok(status) if SUCCESS_STATUSES.contains(&status) => {
                info!("✅ 成绩已成功提交: {}", payload.submitter);
                log_payload(payload);
                return Ok(DeliveryOutcome::Submitted { status });
            }
            Ok(401) => {
                warn!("⚠️ 直接提交需要登录认证");
                FallbackReason::AuthenticationRequired
            }
            Ok(status) => {
                warn!("⚠️ 直接提交失败 (状态码 {})", status);
                FallbackReason::UnexpectedStatus(status)
            }
            Err(e) => {
                warn!("⚠️ 网络错误: {}", e);
                FallbackReason::Transport(e.to_string())
            }
        };

        info!("💡 改为打开预填表单...");
        self.open_prefilled(payload, reason).await
    }

    async fn open_prefilled(
        &self,
        payload: &FormPayload,
        reason: FallbackReason,
    ) -> AppResult<DeliveryOutcome> {
        let url = self.endpoints.prefill_url(payload);

        info!("📱 为 {} 打开预填表单", payload.submitter);
        log_payload(payload);

        // 链接本身已在结果中返回，展示失败不影响整体结果
        if let Err(e) = self.presenter.present(&url).await {
            warn!("⚠️ 无法展示链接 ({}), 请手动打开: {}", e, url);
        }
        info!("✅ 请在浏览器中点击 'Envoyer' 完成提交");

        Ok(DeliveryOutcome::LinkOpened { url, reason })
    }
}

fn log_payload(payload: &FormPayload) {
    info!("   总分: {:.1}%", payload.global);
    for (domain, percentage) in &payload.domains {
        info!("   {}: {:.1}%", domain, percentage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, DeliveryError, ValidationError};
    use crate::services::{DomainResults, Submitter};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// 固定返回状态码或超时的投递桩
    struct StubTransport {
        status: Option<u16>,
        calls: AtomicUsize,
    }

    impl StubTransport {
        fn status(status: u16) -> Self {
            Self {
                status: Some(status),
                calls: AtomicUsize::new(0),
            }
        }

        fn timeout() -> Self {
            Self {
                status: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FormTransport for StubTransport {
        async fn post_form(&self, url: &Url, _fields: &[(&'static str, String)]) -> Result<u16, DeliveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.status.ok_or_else(|| DeliveryError::Timeout {
                endpoint: url.to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingPresenter(Mutex<Vec<Url>>);

    #[async_trait]
    impl LinkPresenter for RecordingPresenter {
        async fn present(&self, url: &Url) -> AppResult<()> {
            self.0.lock().unwrap().push(url.clone());
            Ok(())
        }
    }

    fn flow(transport: StubTransport) -> DeliveryFlow<StubTransport, RecordingPresenter> {
        let endpoints = FormEndpoints::from_base("https://docs.google.com/forms/d/e/test").unwrap();
        DeliveryFlow::new(transport, RecordingPresenter::default(), endpoints)
    }

    fn payload(last: &str, first: &str) -> FormPayload {
        let mut results = DomainResults::new();
        results.insert("DOMAINE 1 : INFORMATIONS ET DONNÉES".to_string(), 75.0);
        FormPayload::from_results(Submitter::new(last, first), &results, None)
    }

    #[tokio::test]
    async fn test_success_status_submits_directly() {
        for status in SUCCESS_STATUSES {
            let flow = flow(StubTransport::status(status));
            let outcome = flow.deliver(&payload("Test", "User")).await.unwrap();
            assert_eq!(outcome, DeliveryOutcome::Submitted { status });
            assert!(flow.presenter.0.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_unauthorized_falls_back_to_prefilled_link() {
        let flow = flow(StubTransport::status(401));
        let outcome = flow.deliver(&payload("Test", "User")).await.unwrap();

        match outcome {
            DeliveryOutcome::LinkOpened { url, reason } => {
                assert_eq!(reason, FallbackReason::AuthenticationRequired);
                assert!(url.path().ends_with("/viewform"));
                assert_eq!(flow.presenter.0.lock().unwrap().as_slice(), &[url]);
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_other_status_and_timeout_fall_back() {
        let outcome = flow(StubTransport::status(500))
            .deliver(&payload("Test", "User"))
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            DeliveryOutcome::LinkOpened {
                reason: FallbackReason::UnexpectedStatus(500),
                ..
            }
        ));

        let outcome = flow(StubTransport::timeout())
            .deliver(&payload("Test", "User"))
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            DeliveryOutcome::LinkOpened {
                reason: FallbackReason::Transport(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_browser_mode_skips_post() {
        let flow = flow(StubTransport::status(200)).with_browser_mode(true);
        let outcome = flow.deliver(&payload("Test", "User")).await.unwrap();
        assert!(matches!(
            outcome,
            DeliveryOutcome::LinkOpened {
                reason: FallbackReason::BrowserMode,
                ..
            }
        ));
        assert_eq!(flow.transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_identity_is_rejected_before_network() {
        let flow = flow(StubTransport::status(200));
        let err = flow.deliver(&payload("", "User")).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingIdentity)
        ));
        assert_eq!(flow.transport.calls.load(Ordering::SeqCst), 0);
        assert!(flow.presenter.0.lock().unwrap().is_empty());
    }
}
