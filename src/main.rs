//! # eCFR Explorer CLI (`ecfr`)
//!
//! ## Usage
//!
//! ```bash
//! ecfr --config ./config/ecfr.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ecfr search "<query>"` | Filter and rank records |
//! | `ecfr agencies` | List agency facets |
//! | `ecfr get <id>` | Print one record |
//! | `ecfr ask "<text>"` | Ask the assistant a single question |
//! | `ecfr chat` | Interactive chat session |
//! | `ecfr stats` | Dashboard statistics |
//! | `ecfr serve` | Start the JSON HTTP server |
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=debug`) to adjust log output on stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ecfr_explorer::catalog::load_catalog;
use ecfr_explorer::classifier::create_classifier;
use ecfr_explorer::config;
use ecfr_explorer::{chat, get, search, server, stats};

/// eCFR Explorer — browse federal regulation sample data.
#[derive(Parser)]
#[command(
    name = "ecfr",
    about = "eCFR Explorer — search regulations, chat with a canned assistant, view dashboard stats",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/ecfr.toml`. Built-in defaults apply when the
    /// file does not exist.
    #[arg(long, global = true, default_value = "./config/ecfr.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search records by case-insensitive substring.
    ///
    /// Matches title, part, section, and content; results are ordered by
    /// relevance. An empty query prints `No results.`.
    Search {
        /// The search query string.
        query: String,

        /// Only return records from this agency (`All` for no filter).
        #[arg(long)]
        agency: Option<String>,

        /// Maximum number of results to return.
        #[arg(long)]
        limit: Option<usize>,

        /// Print the response as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the agency facets present in the record table.
    Agencies,

    /// Print a record by its ID.
    Get {
        /// Record ID.
        id: u64,
    },

    /// Ask the assistant one question and print the reply.
    Ask {
        /// The question.
        text: String,

        /// Agency to focus the answer on.
        #[arg(long)]
        agency: Option<String>,
    },

    /// Start an interactive chat session on stdin.
    Chat {
        /// Initial agency focus.
        #[arg(long)]
        agency: Option<String>,
    },

    /// Show dashboard statistics for the record table.
    Stats {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start the JSON HTTP server on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            tracing::error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_or_minimal(&cli.config)?;

    if let Commands::Serve = cli.command {
        return server::run_server(&cfg).await;
    }

    let catalog = load_catalog(&cfg)?;

    match cli.command {
        Commands::Search {
            query,
            agency,
            limit,
            json,
        } => {
            search::run_search(&cfg, &catalog, &query, agency.as_deref(), limit, json)?;
        }
        Commands::Agencies => {
            for facet in catalog.facets() {
                println!("{}", facet);
            }
        }
        Commands::Get { id } => {
            get::run_get(&catalog, id)?;
        }
        Commands::Ask { text, agency } => {
            let classifier = create_classifier(&cfg.chat)?;
            chat::run_ask(&catalog, classifier.as_ref(), &text, agency.as_deref()).await?;
        }
        Commands::Chat { agency } => {
            let classifier = create_classifier(&cfg.chat)?;
            chat::run_chat(&catalog, classifier.as_ref(), agency.as_deref()).await?;
        }
        Commands::Stats { json } => {
            stats::run_stats(&catalog, json)?;
        }
        Commands::Serve => unreachable!("handled before catalog load"),
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
