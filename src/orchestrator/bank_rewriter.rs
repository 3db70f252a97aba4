//! 题库清洗器 - 编排层
//!
//! ## 职责
//!
//! 1. **加载**：读取待清洗题库和（可选的）自定义规则表
//! 2. **替换**：逐题调用 `DistractorFlow`
//! 3. **保存**：整体写回输出文件
//! 4. **复核**：未能替换的干扰项写入 warn 文件
//! 5. **统计**：输出清洗结果

use crate::config::Config;
use crate::models::{load_questions, save_questions};
use crate::services::{PhraseBlocklist, ReplacementTable, WarnWriter};
use crate::utils::logging::{print_rewrite_stats, truncate_text};
use crate::workflow::{DistractorFlow, RewriteReport};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 题库清洗器
pub struct BankRewriter {
    flow: DistractorFlow<PhraseBlocklist>,
    warn_writer: WarnWriter,
    input: PathBuf,
    output: PathBuf,
}

impl BankRewriter {
    /// 按配置创建；配置了规则文件时从文件加载规则表
    pub async fn from_config(config: &Config) -> Result<Self> {
        let table = match &config.replacement_rules_file {
            Some(path) => {
                info!("📋 加载自定义替换规则: {}", path);
                ReplacementTable::from_toml_file(Path::new(path))
                    .await
                    .with_context(|| format!("无法加载替换规则: {}", path))?
            }
            None => ReplacementTable::default(),
        };

        Ok(Self {
            flow: DistractorFlow::with_parts(PhraseBlocklist::default(), table),
            warn_writer: WarnWriter::with_path(&config.warn_file),
            input: config.questions_input_path(),
            output: config.questions_output_path(),
        })
    }

    /// 使用系统熵作为随机源运行
    pub async fn run(&self) -> Result<RewriteReport> {
        let mut rng = StdRng::from_entropy();
        self.run_with_rng(&mut rng).await
    }

    /// 使用指定随机源运行
    pub async fn run_with_rng<R: Rng + Send>(&self, rng: &mut R) -> Result<RewriteReport> {
        info!("\n📁 正在加载题库: {}", self.input.display());
        let mut questions = match load_questions(&self.input).await {
            Ok(questions) => questions,
            Err(e) => {
                if e.is_not_found() {
                    error!("❌ 题库文件不存在，请检查 QUESTIONS_INPUT: {}", self.input.display());
                }
                return Err(e).with_context(|| format!("无法加载题库: {}", self.input.display()));
            }
        };

        let report = self.flow.rewrite_all(&mut questions, rng);

        save_questions(&self.output, &questions)
            .await
            .with_context(|| format!("无法保存题库: {}", self.output.display()))?;

        for leftover in &report.leftovers {
            warn!(
                "[题目 {}] 干扰项未能替换: '{}' ({})",
                leftover.question_index + 1,
                leftover.text,
                truncate_text(&leftover.question, 40)
            );
        }
        let written = self.warn_writer.write(&report.leftovers).await?;
        if written > 0 {
            info!("📝 {} 条待复核记录已写入: {}", written, self.warn_writer.path());
        }

        print_rewrite_stats(
            report.questions_touched,
            report.options_replaced,
            report.leftovers.len(),
            &self.output.display().to_string(),
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn config_in(dir: &Path) -> Config {
        Config {
            questions_input: dir.join("absent.json").display().to_string(),
            questions_output: dir.join("out.json").display().to_string(),
            warn_file: dir.join("warn.txt").display().to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_missing_bank_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let rewriter = BankRewriter::from_config(&config_in(dir.path())).await.unwrap();

        let err = rewriter.run_with_rng(&mut StdRng::seed_from_u64(1)).await.unwrap_err();
        let cause = err.downcast_ref::<AppError>().expect("AppError 应保留在错误链中");
        assert!(cause.is_not_found());
        assert!(!dir.path().join("out.json").exists());
    }

    #[tokio::test]
    async fn test_missing_rules_file_fails_early() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            replacement_rules_file: Some(dir.path().join("rules.toml").display().to_string()),
            ..config_in(dir.path())
        };
        assert!(BankRewriter::from_config(&config).await.is_err());
    }
}
