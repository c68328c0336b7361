mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use recall::config::RecallConfig;

#[derive(Parser)]
#[command(name = "recall", version, about = "Screen activity history: storage and search")]
struct Cli {
    /// Override the configured connection descriptor
    #[arg(long, global = true)]
    db_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the entries table and indexes if missing
    Init,
    /// List stored entries, most recent first
    List {
        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Find entries similar to the one captured at a given timestamp
    Search {
        /// Timestamp (seconds since epoch) of the reference entry
        #[arg(long)]
        like: i64,
        /// Number of results (defaults to search.top_k)
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Show entry counts and time range
    Stats,
    /// Export all entries as JSON to stdout
    Export,
    /// Import entries from a JSON export, skipping timestamps already stored
    Import {
        /// Path to a file produced by `recall export`
        file: PathBuf,
    },
    /// Run store diagnostics
    Doctor,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RecallConfig::load()?;
    if let Some(db_url) = cli.db_url {
        config.storage.db_url = db_url;
    }

    // Log to stderr so stdout stays clean for `export`.
    let filter = EnvFilter::try_new(&config.logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Init => cli::init(&config)?,
        Command::List { limit } => cli::list::list(&config, limit)?,
        Command::Search { like, top_k } => cli::search::search_like(&config, like, top_k)?,
        Command::Stats => cli::stats::stats(&config)?,
        Command::Export => cli::export::export(&config)?,
        Command::Import { file } => cli::import::import(&config, &file)?,
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}
