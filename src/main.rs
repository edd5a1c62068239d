mod app;
mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use reelgen::config::Config;
use reelgen::observability;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    // Validation waits for command-line overrides
    let config_path = Config::default_path();
    let config = Config::read_from_path(config_path.clone())?;
    observability::init_tracing(&config.telemetry.log_filter);
    info!(
        path = %config_path.display(),
        found = config_path.exists(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Generate(args) => app::generate(config, args).await,
        Commands::Config => {
            config.validate()?;
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
