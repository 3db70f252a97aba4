use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 难度等级（有序：Initial < Intermédiaire < Avancé）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// 入门
    #[serde(rename = "Initial")]
    Initial,
    /// 中级
    #[serde(rename = "Intermédiaire")]
    Intermediate,
    /// 高级
    #[serde(rename = "Avancé")]
    Advanced,
}

impl Level {
    /// 全部等级，按难度排序
    pub const ALL: [Level; 3] = [Level::Initial, Level::Intermediate, Level::Advanced];

    /// 题库中使用的标准名称
    pub fn label(self) -> &'static str {
        match self {
            Level::Initial => "Initial",
            Level::Intermediate => "Intermédiaire",
            Level::Advanced => "Avancé",
        }
    }

    /// 读取题库中的等级，不认识的一律按 Initial 处理
    pub fn from_bank_label(label: &str) -> Self {
        label.parse().unwrap_or(Level::Initial)
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    /// 同时接受标准名称和不带重音的写法，便于在环境变量里配置
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "initial" => Ok(Level::Initial),
            "intermédiaire" | "intermediaire" | "intermediate" => Ok(Level::Intermediate),
            "avancé" | "avance" | "advanced" => Ok(Level::Advanced),
            other => Err(ConfigError::UnknownLevel(other.to_string())),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
