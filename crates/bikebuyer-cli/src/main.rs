mod history;
mod predict;
mod suggest;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use history::HistoryCommands;
use suggest::SuggestCommands;

#[derive(Debug, Parser)]
#[command(name = "bikebuyer")]
#[command(about = "Bike buyer registration assistant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Stream locality or address suggestions for text read from stdin
    Suggest {
        #[command(subcommand)]
        command: SuggestCommands,
    },
    /// Score a registration against the prediction service
    Predict {
        /// Customer profile JSON (camelCase form fields)
        #[arg(long, required_unless_present = "features", conflicts_with = "features")]
        profile: Option<PathBuf>,
        /// Raw feature map JSON, sent verbatim
        #[arg(long)]
        features: Option<PathBuf>,
        /// Do not record the result in the history file
        #[arg(long)]
        no_history: bool,
    },
    /// Inspect or edit the submission history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = bikebuyer_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(config = ?config, "configuration loaded");

    match cli.command {
        Commands::Suggest { command } => suggest::run_suggest(&config, command).await,
        Commands::Predict {
            profile,
            features,
            no_history,
        } => {
            let input = match (profile, features) {
                (Some(path), _) => predict::PredictInput::Profile(path),
                (None, Some(path)) => predict::PredictInput::Features(path),
                (None, None) => anyhow::bail!("either --profile or --features is required"),
            };
            predict::run_predict(&config, &input, !no_history).await
        }
        Commands::History { command } => history::run_history(&config, command),
    }
}
