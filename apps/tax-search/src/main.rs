//! Tax Search CLI
//!
//! Runs queries against the tax corpus from the command line.

mod render;

use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use corpus_core::{doc_types, RawFilters, SearchConfig, SearchSession, EXAMPLE_QUERIES};
use shared_types::{DocType, Jurisdiction};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level when RUST_LOG is unset or blank
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser, Debug)]
#[command(name = "tax-search")]
#[command(version, about = "Search federal and state tax documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a query
    Search {
        /// Free-text query
        query: String,

        /// federal or state
        #[arg(long)]
        jurisdiction: Option<String>,

        /// Two-letter state code or state name
        #[arg(long)]
        state: Option<String>,

        /// irc, cfr, publication, form, statute, regulation, bulletin, ruling, notice
        #[arg(long)]
        doc_type: Option<String>,

        /// income, sales_use or estate
        #[arg(long)]
        tax_type: Option<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Override the simulated latency (TAX_CORPUS_LATENCY_MS)
        #[arg(long)]
        latency_ms: Option<u64>,
    },

    /// List corpus keys with their entry counts
    Keys,

    /// Show document-type options for a jurisdiction
    DocTypes {
        #[arg(long)]
        jurisdiction: Option<String>,

        /// Currently selected document type, kept if still offered
        #[arg(long)]
        current: Option<String>,
    },

    /// List example queries
    Examples,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::registry()
        .with(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SearchConfig::from_env()?;

    match cli.command {
        Command::Search {
            query,
            jurisdiction,
            state,
            doc_type,
            tax_type,
            json,
            latency_ms,
        } => {
            let config = match latency_ms {
                Some(ms) => config.with_latency(Duration::from_millis(ms)),
                None => config,
            };
            let filters = RawFilters {
                jurisdiction,
                state,
                doc_type,
                tax_type,
            }
            .parse();

            let session = SearchSession::from_config(&config)?;
            tracing::info!(query = %query, latency_ms = config.latency.as_millis() as u64, "Searching");
            let outcome = session
                .submit(&query, filters)
                .await
                .ok_or_else(|| anyhow!("Search was superseded"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render::outcome(&outcome));
            }
        }
        Command::Keys => {
            let corpus = config.load_corpus()?;
            print!("{}", render::keys(&corpus));
        }
        Command::DocTypes {
            jurisdiction,
            current,
        } => {
            let jurisdiction = parse_arg("jurisdiction", jurisdiction, Jurisdiction::parse)?;
            let current = parse_arg("doc type", current, DocType::parse)?;
            let (options, selected) = doc_types::resolve(jurisdiction, current);
            print!("{}", render::doc_type_options(options, selected));
        }
        Command::Examples => {
            for example in EXAMPLE_QUERIES {
                println!("{}", example);
            }
        }
    }

    Ok(())
}

/// RUST_LOG directives as given, falling back to warnings only
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(DEFAULT_LOG_FILTER),
    }
}

/// Strict parsing for values the user typed directly
fn parse_arg<T>(
    what: &str,
    value: Option<String>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    match value {
        Some(raw) => parse(&raw)
            .map(Some)
            .ok_or_else(|| anyhow!("Unknown {}: {}", what, raw)),
        None => Ok(None),
    }
}
