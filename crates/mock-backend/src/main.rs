//! Mock Backend CLI
//!
//! 模拟后端的命令行入口点。

use anyhow::Context;
use backend_shared::config::AppConfig;
use backend_shared::observability;
use clap::Parser;
use mock_backend::SERVICE_NAME;
use mock_backend::cli::{Cli, CommandRunner, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(SERVICE_NAME).context("加载配置失败")?;
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }

    let command = cli.command();
    if let Commands::Serve(args) = &command {
        args.apply_to(&mut config);
    }

    let _guard = observability::init(&config.observability).await?;

    let runner = CommandRunner::new(config);

    match command {
        Commands::Serve(_) => runner.run_server().await?,
        Commands::CheckData { data } => runner.run_check_data(data.as_deref())?,
    }

    Ok(())
}
