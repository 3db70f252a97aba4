//! 复核清单写入服务 - 业务能力层
//!
//! 只负责"把没能替换的干扰项写入 warn.txt"，不关心流程

use crate::workflow::Leftover;
use anyhow::{Context, Result};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// 复核清单写入服务
///
/// 职责：
/// - 追加写入，每次运行带时间戳分隔
/// - 没有待复核项时不创建文件
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 使用指定文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.warn_file_path
    }

    /// 写入待复核的干扰项
    ///
    /// # 返回
    /// 返回写入的条数
    pub async fn write(&self, leftovers: &[Leftover]) -> Result<usize> {
        if leftovers.is_empty() {
            return Ok(0);
        }

        debug!("写入 {} 条待复核干扰项: {}", leftovers.len(), self.warn_file_path);

        let mut content = format!(
            "--- {} ---\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        for leftover in leftovers {
            content.push_str(&format!(
                "题目 {} | 选项 {} | 题干: {} | 干扰项: {}\n",
                leftover.question_index + 1,
                leftover.option_index + 1,
                leftover.question,
                leftover.text
            ));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)
            .await
            .with_context(|| format!("无法打开复核文件: {}", self.warn_file_path))?;

        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        Ok(leftovers.len())
    }
}
