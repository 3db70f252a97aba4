/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则默认 info，`verbose` 时为 debug
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `title`: 工具名称
pub fn log_startup(title: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 {}", title);
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// 打印干扰项清洗的最终统计
///
/// # 参数
/// - `touched`: 含劣质干扰项的题目数
/// - `replaced`: 已替换的干扰项数
/// - `leftovers`: 待人工复核的干扰项数
/// - `output_path`: 输出文件路径
pub fn print_rewrite_stats(touched: usize, replaced: usize, leftovers: usize, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("✅ 处理完成");
    info!("📊 {} 道题目已改进", touched);
    info!("🔄 {} 个干扰项已替换", replaced);
    if leftovers > 0 {
        info!("⚠️ {} 个干扰项待人工复核", leftovers);
    }
    info!("📁 文件已保存: {}", output_path);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("Sécurité", 3), "Séc...");
        assert_eq!(truncate_text("abc", 3), "abc");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
