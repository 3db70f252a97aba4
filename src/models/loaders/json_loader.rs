use crate::error::{AppError, AppResult};
use crate::models::answer::AnswerEvent;
use crate::models::question::Question;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载题库
pub async fn load_questions(path: &Path) -> AppResult<Vec<Question>> {
    let questions: Vec<Question> = read_json(path).await?;
    tracing::info!(
        "成功加载 {} 个题目: {}",
        questions.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    Ok(questions)
}

/// 将题库整体写回 JSON 文件（缩进 2 格，保留非 ASCII 字符）
pub async fn save_questions(path: &Path, questions: &[Question]) -> AppResult<()> {
    write_json(path, &questions).await?;
    tracing::info!("已保存 {} 个题目至: {}", questions.len(), path.display());
    Ok(())
}

/// 从 JSON 文件加载作答记录
pub async fn load_answers(path: &Path) -> AppResult<Vec<AnswerEvent>> {
    let answers: Vec<AnswerEvent> = read_json(path).await?;
    tracing::info!("成功加载 {} 条作答记录", answers.len());
    Ok(answers)
}

/// 将作答记录写入 JSON 文件
pub async fn save_answers(path: &Path, answers: &[AnswerEvent]) -> AppResult<()> {
    write_json(path, &answers).await
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&display, e))?;

    serde_json::from_str(&content).map_err(|e| AppError::json_parse_failed(display, e))
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> AppResult<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
    }

    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}
