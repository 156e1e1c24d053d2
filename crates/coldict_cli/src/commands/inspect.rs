//! Inspect command implementation.

use coldict_core::{Dictionary, DictionaryStats};
use coldict_storage::{open_backend, StorageKind};
use serde::Serialize;
use std::path::Path;

/// Dictionary inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Dictionary path.
    pub path: String,
    /// Storage kind.
    pub storage: String,
    /// Document size in bytes, for file storage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Dictionary statistics.
    #[serde(flatten)]
    pub stats: DictionaryStats,
}

/// Runs the inspect command.
pub fn run(
    path: &Path,
    kind: StorageKind,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = inspect(path, kind)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

/// Gathers statistics for the dictionary at `path`.
///
/// Unlike the other commands, a missing document is an error here rather
/// than an empty dictionary.
pub fn inspect(
    path: &Path,
    kind: StorageKind,
) -> Result<InspectResult, Box<dyn std::error::Error>> {
    let backend = open_backend(kind, path, false)?;
    if !backend.exists()? {
        let location = backend.describe();
        return Err(format!("No dictionary found at {:?} ({})", path, location).into());
    }

    let dictionary = Dictionary::open(backend)?;
    Ok(InspectResult {
        path: path.display().to_string(),
        storage: kind.to_string(),
        size: std::fs::metadata(path).ok().map(|meta| meta.len()),
        stats: dictionary.stats(),
    })
}

fn print_text_output(result: &InspectResult) {
    println!("Column Dictionary Inspection");
    println!("============================");
    println!();
    println!("Path:    {}", result.path);
    println!("Storage: {}", result.storage);
    if let Some(size) = result.size {
        println!("Size:    {}", format_size(size));
    }
    println!();
    println!("Records:");
    println!("  Records:        {}", result.stats.records);
    println!("  Distinct names: {}", result.stats.names);
    match result.stats.last_updated {
        Some(at) => println!("  Last updated:   {}", at.to_rfc3339()),
        None => println!("  Last updated:   never"),
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
