//! Banter - local chat playground with a simulated streaming assistant
//!
//! Main entry point for the Banter application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use banter::cli::{Cli, Commands};
use banter::commands;
use banter::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    match cli.command {
        Commands::Chat => {
            tracing::info!("Starting interactive chat");
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::History { command } => {
            commands::history::handle_history(&config, command)?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "banter=debug" } else { "banter=warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
