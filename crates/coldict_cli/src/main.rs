//! Coldict CLI
//!
//! Command-line tools for the approved column dictionary.
//!
//! # Commands
//!
//! - `update` - Pull approved columns from the catalog and save changes
//! - `search` - Look up column names, with fuzzy fallback
//! - `export` - Write records as CSV
//! - `inspect` - Display dictionary statistics

mod commands;

use clap::{Parser, Subcommand};
use coldict_storage::StorageKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Approved column dictionary tools.
#[derive(Parser)]
#[command(name = "coldict")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the dictionary file
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Storage kind (file, memory, gcp)
    #[arg(global = true, long, default_value = "file")]
    storage: StorageKind,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull approved columns from the catalog and save changes
    Update {
        /// Column endpoint of the catalog API
        #[arg(long)]
        catalog_url: String,

        /// API token
        #[arg(long, env = "COLDICT_API_TOKEN", hide_env_values = true)]
        token: String,

        /// Request configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Base for relative record urls (defaults to the catalog's site root)
        #[arg(long)]
        site_url: Option<String>,

        /// Skip TLS certificate verification
        #[arg(long)]
        insecure: bool,
    },

    /// Look up column names, falling back to a fuzzy match
    Search {
        /// Column names to look up
        #[arg(required = true)]
        names: Vec<String>,

        /// Minimum fuzzy score, 0-100
        #[arg(short, long)]
        threshold: Option<u8>,

        /// Exact matches only
        #[arg(short, long)]
        exact: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Write records as CSV
    Export {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Only export records with these names
        #[arg(short, long)]
        name: Vec<String>,

        /// Leave out the url column
        #[arg(long)]
        no_url: bool,
    },

    /// Display dictionary statistics
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Update {
            catalog_url,
            token,
            config,
            site_url,
            insecure,
        } => {
            let path = cli.path.ok_or("Dictionary path required for update")?;
            let args = commands::update::UpdateArgs {
                catalog_url,
                token,
                config,
                site_url,
                insecure,
            };
            commands::update::run(&path, cli.storage, &args)?;
        }
        Commands::Search {
            names,
            threshold,
            exact,
            format,
        } => {
            let path = cli.path.ok_or("Dictionary path required for search")?;
            commands::search::run(&path, cli.storage, &names, threshold, exact, &format)?;
        }
        Commands::Export {
            output,
            name,
            no_url,
        } => {
            let path = cli.path.ok_or("Dictionary path required for export")?;
            commands::export::run(&path, cli.storage, &output, &name, no_url)?;
        }
        Commands::Inspect { format } => {
            let path = cli.path.ok_or("Dictionary path required for inspect")?;
            commands::inspect::run(&path, cli.storage, &format)?;
        }
        Commands::Version => {
            println!("Coldict CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Coldict Core v{}", coldict_core::VERSION);
        }
    }

    Ok(())
}
