//! 链接展示服务 - 业务能力层
//!
//! 把预填链接交给用户：优先在浏览器中打开，失败时输出到控制台

use crate::browser::open_url_in_browser;
use crate::error::AppResult;
use async_trait::async_trait;
use reqwest::Url;
use tracing::{info, warn};

/// 链接展示能力
#[async_trait]
pub trait LinkPresenter: Send + Sync {
    async fn present(&self, url: &Url) -> AppResult<()>;
}

/// 通过浏览器调试端口打开链接
pub struct BrowserPresenter {
    debug_port: u16,
}

impl BrowserPresenter {
    pub fn new(debug_port: u16) -> Self {
        Self { debug_port }
    }
}

#[async_trait]
impl LinkPresenter for BrowserPresenter {
    async fn present(&self, url: &Url) -> AppResult<()> {
        open_url_in_browser(self.debug_port, url.as_str()).await
    }
}

/// 在控制台输出链接，由用户手动打开
#[derive(Default)]
pub struct ConsolePresenter;

#[async_trait]
impl LinkPresenter for ConsolePresenter {
    async fn present(&self, url: &Url) -> AppResult<()> {
        info!("🌐 请在浏览器中打开以下链接:");
        info!("{}", url);
        Ok(())
    }
}

/// 先尝试 `primary`，失败后交给 `secondary`
pub struct FallbackPresenter<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackPresenter<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl FallbackPresenter<BrowserPresenter, ConsolePresenter> {
    /// 浏览器 → 控制台
    pub fn browser_then_console(debug_port: u16) -> Self {
        Self::new(BrowserPresenter::new(debug_port), ConsolePresenter)
    }
}

#[async_trait]
impl<P: LinkPresenter, S: LinkPresenter> LinkPresenter for FallbackPresenter<P, S> {
    async fn present(&self, url: &Url) -> AppResult<()> {
        match self.primary.present(url).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("⚠️ 无法自动打开链接: {}", e);
                self.secondary.present(url).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ValidationError};
    use std::sync::Mutex;

    struct Failing;

    #[async_trait]
    impl LinkPresenter for Failing {
        async fn present(&self, _url: &Url) -> AppResult<()> {
            Err(AppError::Validation(ValidationError::MissingIdentity))
        }
    }

    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    #[async_trait]
    impl LinkPresenter for Recording {
        async fn present(&self, url: &Url) -> AppResult<()> {
            self.0.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_fallback_uses_secondary_on_failure() {
        let presenter = FallbackPresenter::new(Failing, Recording::default());
        let url = Url::parse("https://example.com/viewform?a=1").unwrap();
        presenter.present(&url).await.unwrap();
        assert_eq!(*presenter.secondary.0.lock().unwrap(), vec![url.to_string()]);
    }

    #[tokio::test]
    async fn test_fallback_skips_secondary_on_success() {
        let presenter = FallbackPresenter::new(Recording::default(), Recording::default());
        let url = Url::parse("https://example.com/viewform").unwrap();
        presenter.present(&url).await.unwrap();
        assert_eq!(presenter.primary.0.lock().unwrap().len(), 1);
        assert!(presenter.secondary.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_console_presenter_never_fails() {
        let url = Url::parse("https://example.com/viewform").unwrap();
        assert!(ConsolePresenter.present(&url).await.is_ok());
    }
}
