use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use studybuddy_lib::config::Config;

#[derive(Parser)]
#[command(name = "studybuddy", about = "Flashcard generation server", version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and environment)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    studybuddy_lib::run(config)
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("Server failed")
}
