use crate::error::{AppError, AppResult};
use crate::models::Level;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// 指向可选 TOML 配置文件的环境变量
pub const CONFIG_FILE_ENV: &str = "DIGCOMP_CONFIG";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- 题库 ---
    /// 待清洗的题库
    pub questions_input: String,
    /// 清洗后的题库（同时也是提交时读取的题库）
    pub questions_output: String,
    /// 无法替换的干扰项写入此文件
    pub warn_file: String,
    /// 自定义替换规则（TOML），为空时使用内置规则
    pub replacement_rules_file: Option<String>,
    // --- 成绩提交 ---
    /// 作答记录文件
    pub answers_file: String,
    /// 表单地址（不含 /formResponse 或 /viewform）
    pub form_base_url: String,
    /// POST 超时（秒）
    pub http_timeout_secs: u64,
    /// 跳过 POST，直接打开预填链接
    pub use_browser: bool,
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 姓
    pub submitter_last_name: String,
    /// 名
    pub submitter_first_name: String,
    // --- 终端测验 ---
    /// 每次测验的题目数
    pub quiz_num_questions: usize,
    /// 参与抽题的难度等级
    pub quiz_levels: Vec<Level>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            questions_input: "questions_digcomp_complet.json".to_string(),
            questions_output: "questions_digcomp_final.json".to_string(),
            warn_file: "warn.txt".to_string(),
            replacement_rules_file: None,
            answers_file: "answers.json".to_string(),
            form_base_url:
                "https://docs.google.com/forms/d/e/1FAIpQLSf2Sa6kudUT3hVMuhxFY0oNaedKbPuZu85yQnxqypY0Eohikg"
                    .to_string(),
            http_timeout_secs: 10,
            use_browser: false,
            browser_debug_port: 9222,
            submitter_last_name: String::new(),
            submitter_first_name: String::new(),
            quiz_num_questions: 20,
            quiz_levels: Level::ALL.to_vec(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 仅从环境变量加载（未设置的字段使用默认值）
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 加载配置：`DIGCOMP_CONFIG` 指向的 TOML 文件 → 环境变量覆盖
    pub fn load() -> AppResult<Self> {
        match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                Ok(Self::from_toml_file(Path::new(&path))?.with_env_overrides())
            }
            _ => Ok(Self::from_env()),
        }
    }

    /// 从 TOML 文件加载，缺失的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        let content =
            std::fs::read_to_string(path).map_err(|e| AppError::file_read_failed(&display, e))?;
        toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(display, e))
    }

    /// 用环境变量覆盖已有的值
    pub fn with_env_overrides(self) -> Self {
        Self {
            questions_input: env_or("QUESTIONS_INPUT", self.questions_input),
            questions_output: env_or("QUESTIONS_OUTPUT", self.questions_output),
            warn_file: env_or("WARN_FILE", self.warn_file),
            replacement_rules_file: std::env::var("REPLACEMENT_RULES_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .or(self.replacement_rules_file),
            answers_file: env_or("ANSWERS_FILE", self.answers_file),
            form_base_url: env_or("FORM_BASE_URL", self.form_base_url),
            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", self.http_timeout_secs),
            use_browser: env_or("USE_BROWSER", self.use_browser),
            browser_debug_port: env_or("BROWSER_DEBUG_PORT", self.browser_debug_port),
            submitter_last_name: env_or("SUBMITTER_NOM", self.submitter_last_name),
            submitter_first_name: env_or("SUBMITTER_PRENOM", self.submitter_first_name),
            quiz_num_questions: env_or("QUIZ_NUM_QUESTIONS", self.quiz_num_questions),
            quiz_levels: std::env::var("QUIZ_LEVELS")
                .ok()
                .and_then(|v| parse_levels(&v))
                .unwrap_or(self.quiz_levels),
            verbose_logging: env_or("VERBOSE_LOGGING", self.verbose_logging),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn questions_input_path(&self) -> PathBuf {
        PathBuf::from(&self.questions_input)
    }

    pub fn questions_output_path(&self) -> PathBuf {
        PathBuf::from(&self.questions_output)
    }

    pub fn answers_path(&self) -> PathBuf {
        PathBuf::from(&self.answers_file)
    }
}

/// 读取并解析环境变量，不存在或无法解析时保留原值
fn env_or<T: FromStr>(name: &str, current: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("环境变量 {} 的值 '{}' 无法解析，保留原配置", name, raw);
                current
            }
        },
        Err(_) => current,
    }
}

/// 解析以逗号分隔的难度等级列表，任一项非法时返回 None
fn parse_levels(raw: &str) -> Option<Vec<Level>> {
    let levels: Result<Vec<Level>, _> = raw
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect();
    match levels {
        Ok(levels) if !levels.is_empty() => Some(levels),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("QUIZ_LEVELS 无法解析: {}", e);
            None
        }
    }
}
