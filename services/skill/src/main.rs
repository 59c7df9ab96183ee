use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use color_changer_service::config::Config;
use color_changer_service::server;
use color_changer_service::{InMemorySessionStore, SkillHandler};
use tracing_subscriber::fmt::time::ChronoLocal;

#[derive(Parser)]
#[command(version, about = "Color Changer skill for Echo Buttons")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the skill over HTTP (the default).
    Serve,
    /// Answer one request envelope read from a JSON file and print the response.
    Replay {
        /// Path to the request envelope.
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load application configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    // --- 3. Parse Command-Line Arguments ---
    let cli = Cli::parse();

    let handler = Arc::new(
        SkillHandler::new(Arc::new(InMemorySessionStore::new()))
            .with_application_id(config.application_id.clone()),
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!("Configuration loaded successfully. Starting Color Changer skill...");
            server::serve(config.bind_address, handler).await
        }
        Command::Replay { path } => {
            let response = handler.handle_file(&path).await?;
            let json = serde_json::to_string_pretty(&response)
                .context("Failed to serialize response")?;
            println!("{json}");
            Ok(())
        }
    }
}
