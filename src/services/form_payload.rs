//! 表单数据构建 - 业务能力层
//!
//! 把领域成绩映射为表单字段，生成提交地址和预填链接

use crate::error::{AppResult, ValidationError};
use crate::models::Domain;
use crate::services::score_aggregator::{global_score, round1, DomainResults};
use reqwest::Url;
use tracing::warn;

/// 姓
pub const FIELD_LAST_NAME: &str = "entry.752468721";
/// 名
pub const FIELD_FIRST_NAME: &str = "entry.650519905";
/// 总分
pub const FIELD_GLOBAL: &str = "entry.294442511";

/// 提交人
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    pub last_name: String,
    pub first_name: String,
}

impl Submitter {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
        }
    }

    /// 姓和名都必须非空
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.last_name.trim().is_empty() || self.first_name.trim().is_empty() {
            return Err(ValidationError::MissingIdentity);
        }
        Ok(())
    }
}

impl std::fmt::Display for Submitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// 一次提交的全部字段
#[derive(Debug, Clone, PartialEq)]
pub struct FormPayload {
    pub submitter: Submitter,
    /// 按表单顺序排列，缺失的领域为 0
    pub domains: [(Domain, f64); 5],
    pub global: f64,
}

impl FormPayload {
    /// 由领域成绩构建；`global` 为空时按各领域平均值计算
    pub fn from_results(submitter: Submitter, results: &DomainResults, global: Option<f64>) -> Self {
        // (累计百分比, 名称数)，多个名称指向同一领域时取平均
        let mut sums = [(0.0_f64, 0_usize); 5];

        for (label, percentage) in results {
            match Domain::find(label) {
                Some(domain) => {
                    let slot = &mut sums[domain.number() as usize - 1];
                    if slot.1 > 0 {
                        warn!("⚠️ {} 对应多个领域名称，取平均值: {}", domain, label);
                    }
                    slot.0 += *percentage;
                    slot.1 += 1;
                }
                None => warn!("⚠️ 未知领域，不写入表单: {}", label),
            }
        }

        let domains = Domain::ALL.map(|domain| {
            let (sum, count) = sums[domain.number() as usize - 1];
            let percentage = if count == 0 { 0.0 } else { round1(sum / count as f64) };
            (domain, percentage)
        });

        Self {
            submitter,
            domains,
            global: global.unwrap_or_else(|| global_score(results)),
        }
    }

    pub fn percentage_of(&self, domain: Domain) -> f64 {
        self.domains[domain.number() as usize - 1].1
    }

    /// 表单字段（字段 ID, 值）
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            (FIELD_LAST_NAME, self.submitter.last_name.clone()),
            (FIELD_FIRST_NAME, self.submitter.first_name.clone()),
            (FIELD_GLOBAL, format_percentage(self.global)),
        ];
        fields.extend(
            self.domains
                .iter()
                .map(|(domain, percentage)| (domain.form_field(), format_percentage(*percentage))),
        );
        fields
    }
}

/// 百分比统一保留一位小数（75 → "75.0"）
fn format_percentage(value: f64) -> String {
    format!("{:.1}", value)
}

/// 表单的两个地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEndpoints {
    pub submit_url: Url,
    pub view_url: Url,
}

impl FormEndpoints {
    /// 由表单基础地址推导 `/formResponse` 与 `/viewform`
    pub fn from_base(base_url: &str) -> AppResult<Self> {
        let base = base_url.trim().trim_end_matches('/');
        let parse = |suffix: &str| {
            let raw = format!("{}/{}", base, suffix);
            Url::parse(&raw).map_err(|e| ValidationError::InvalidFormUrl {
                url: raw,
                reason: e.to_string(),
            })
        };
        Ok(Self {
            submit_url: parse("formResponse")?,
            view_url: parse("viewform")?,
        })
    }

    /// 生成预填链接，用户在浏览器中点击提交即可
    pub fn prefill_url(&self, payload: &FormPayload) -> Url {
        let mut url = self.view_url.clone();
        url.query_pairs_mut()
            .extend_pairs(payload.fields().iter().map(|(k, v)| (*k, v.as_str())));
        url
    }
}
