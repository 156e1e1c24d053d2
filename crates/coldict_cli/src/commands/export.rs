//! Export command implementation.

use super::open_dictionary;
use coldict_core::{export_to_path, Dictionary, Record};
use coldict_storage::StorageKind;
use std::collections::HashSet;
use std::path::Path;

/// Runs the export command.
pub fn run(
    path: &Path,
    kind: StorageKind,
    output: &Path,
    names: &[String],
    no_url: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dictionary = open_dictionary(path, kind, false)?;

    let mut options = dictionary.config().export;
    if no_url {
        options.include_url = false;
    }

    let records = select(&dictionary, names);
    let rows = export_to_path(&records, output, options)?;
    println!("Exported {} records to {}", rows, output.display());

    Ok(())
}

/// Every record, or the records found under `names` (each record once, in
/// query order).
pub fn select(dictionary: &Dictionary, names: &[String]) -> Vec<Record> {
    if names.is_empty() {
        return dictionary.records();
    }

    let mut seen = HashSet::new();
    names
        .iter()
        .flat_map(|name| dictionary.lookup(name))
        .filter(|record| seen.insert(record.id()))
        .collect()
}
