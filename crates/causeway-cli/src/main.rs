#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod browse;
mod seed;

#[derive(Parser)]
#[command(name = "causeway")]
#[command(about = "Causeway operations CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the content schema and deterministic demo content.
    Seed {
        #[arg(long)]
        db: PathBuf,
        /// Published demo posts to create (drafts and ineligible
        /// organizations are added on top).
        #[arg(long, default_value_t = 12)]
        posts: usize,
    },
    /// Page through a running server's feed until exhaustion.
    Browse {
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        url: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Seed { db, posts } => seed::run(&db, posts),
        Commands::Browse { url, limit } => browse::run(&url, limit).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
