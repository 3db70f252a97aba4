use anyhow::Result;
use digcomp_quiz_tools::utils::logging;
use digcomp_quiz_tools::{BankRewriter, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup("干扰项清洗");

    let rewriter = BankRewriter::from_config(&config).await?;
    rewriter.run().await?;

    Ok(())
}
