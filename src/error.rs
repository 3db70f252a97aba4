use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 数据格式错误（题库 / 作答记录 / 规则表）
    #[error("数据错误: {0}")]
    Data(#[from] DataError),
    /// 提交前的参数校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 表单投递错误（仅在内部用于触发兜底）
    #[error("投递错误: {0}")]
    Delivery(#[from] DeliveryError),
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 数据格式错误
#[derive(Debug, Error)]
pub enum DataError {
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// JSON 序列化失败
    #[error("JSON序列化失败: {0}")]
    JsonSerializeFailed(#[source] serde_json::Error),
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 规则表内容不合法
    #[error("替换规则不合法: {0}")]
    InvalidRule(String),
}

/// 提交前校验错误
#[derive(Debug, Error)]
pub enum ValidationError {
    /// 姓名缺失
    #[error("姓 (nom) 和名 (prenom) 均不能为空")]
    MissingIdentity,
    /// 表单地址不合法
    #[error("表单地址不合法 ({url}): {reason}")]
    InvalidFormUrl { url: String, reason: String },
}

/// 表单投递错误
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// 请求超时
    #[error("请求超时 ({endpoint})")]
    Timeout { endpoint: String },
    /// 网络请求失败
    #[error("网络请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 打开页面失败
    #[error("打开 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 难度等级名称不合法
    #[error("未知的难度等级: {0}")]
    UnknownLevel(String),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 根据 io 错误类型区分"不存在"和"读取失败"
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            AppError::File(FileError::NotFound { path })
        } else {
            AppError::File(FileError::ReadFailed { path, source })
        }
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 JSON 解析错误
    pub fn json_parse_failed(path: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Data(DataError::JsonParseFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 TOML 解析错误
    pub fn toml_parse_failed(path: impl Into<String>, source: toml::de::Error) -> Self {
        AppError::Data(DataError::TomlParseFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为"输入文件不存在"
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::File(FileError::NotFound { .. }))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Data(DataError::JsonSerializeFailed(err))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
