//! CodeLoom CLI — the main entry point.
//!
//! Commands:
//! - `chat`   — Interactive chat or single-message mode
//! - `doctor` — Show configuration and wiring diagnostics

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "codeloom",
    about = "CodeLoom — a conversational coding assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Show configuration and wiring diagnostics
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Doctor => commands::doctor::run()?,
    }

    Ok(())
}
