use anyhow::Result;
use digcomp_quiz_tools::orchestrator::quiz_session;
use digcomp_quiz_tools::utils::logging;
use digcomp_quiz_tools::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    logging::init(config.verbose_logging);
    logging::log_startup("DigComp 测验");

    quiz_session::run_from_config(&config).await?;

    Ok(())
}
