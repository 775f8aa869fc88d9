mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::search::{SearchArgs, SearchStatus};

#[derive(Debug, Parser)]
#[command(name = "bizfinder-cli")]
#[command(about = "Find local businesses on Google Maps through SerpApi")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for businesses and print or export the results
    Search(SearchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bizfinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Search(args) => {
            if search::run_search(&config, &args).await? == SearchStatus::Partial {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
