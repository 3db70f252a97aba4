//! 表单投递服务 - 业务能力层
//!
//! 只负责"把字段 POST 出去并拿到状态码"，不决定失败后怎么办

use crate::error::DeliveryError;
use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// 表单投递能力
#[async_trait]
pub trait FormTransport: Send + Sync {
    /// 以 `application/x-www-form-urlencoded` 提交，返回 HTTP 状态码
    async fn post_form(&self, url: &Url, fields: &[(&'static str, String)]) -> Result<u16, DeliveryError>;
}

/// 基于 reqwest 的投递实现
pub struct HttpFormClient {
    client: reqwest::Client,
}

impl HttpFormClient {
    /// 创建带超时的客户端；不跟随重定向，302/303 直接视为成功
    pub fn new(timeout: Duration) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()
            .map_err(|e| DeliveryError::RequestFailed {
                endpoint: "client".to_string(),
                source: e,
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FormTransport for HttpFormClient {
    async fn post_form(&self, url: &Url, fields: &[(&'static str, String)]) -> Result<u16, DeliveryError> {
        debug!("POST {} ({} 个字段)", url, fields.len());

        let response = self
            .client
            .post(url.clone())
            .form(fields)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout {
                        endpoint: url.to_string(),
                    }
                } else {
                    DeliveryError::RequestFailed {
                        endpoint: url.to_string(),
                        source: e,
                    }
                }
            })?;

        let status = response.status().as_u16();
        debug!("表单返回状态码: {}", status);
        Ok(status)
    }
}
