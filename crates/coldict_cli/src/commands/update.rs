//! Update command implementation.

use super::open_dictionary;
use coldict_ingest::{ingest, CatalogClient, CatalogSettings, IngestConfig, ReqwestClient};
use coldict_storage::StorageKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for the update command.
#[derive(Debug)]
pub struct UpdateArgs {
    /// Column endpoint of the catalog API.
    pub catalog_url: String,
    /// API token.
    pub token: String,
    /// Request configuration file.
    pub config: Option<PathBuf>,
    /// Base for relative record urls.
    pub site_url: Option<String>,
    /// Skip TLS certificate verification.
    pub insecure: bool,
}

/// Runs the update command.
pub fn run(
    path: &Path,
    kind: StorageKind,
    args: &UpdateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(config_path) => IngestConfig::load_or_default(config_path),
        None => IngestConfig::default(),
    };

    let mut settings = CatalogSettings::new(&args.catalog_url, args.token.clone())?
        .with_accept_invalid_certs(args.insecure);
    if let Some(site_url) = &args.site_url {
        settings = settings.with_record_base(site_url)?;
    }

    let dictionary = open_dictionary(path, kind, true)?;
    let http = ReqwestClient::new(&settings)?;
    let client = CatalogClient::new(settings, &config, http)?;

    info!(endpoint = %client.settings().endpoint, "updating dictionary");
    let summary = ingest(&dictionary, client.records())?;
    let saved = dictionary.save()?;

    println!("Seen:      {}", summary.seen);
    println!("Inserted:  {}", summary.inserted);
    println!("Updated:   {}", summary.updated);
    println!("Unchanged: {}", summary.unchanged);
    if saved {
        println!("Saved {} records to {}", dictionary.len(), path.display());
    } else {
        println!("No changes; {} left untouched", path.display());
    }

    Ok(())
}
