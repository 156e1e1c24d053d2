//! Search command implementation.

use super::open_dictionary;
use coldict_core::{Dictionary, Record};
use coldict_storage::StorageKind;
use serde::Serialize;
use std::path::Path;

/// How a query was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The name exists as given.
    Exact,
    /// A similar name scored at or above the threshold.
    Fuzzy,
    /// Nothing matched.
    None,
}

/// The answer to one query.
#[derive(Debug, Serialize)]
pub struct SearchResult {
    /// The name searched for.
    pub query: String,
    /// How it was matched.
    pub matched_by: MatchKind,
    /// Best fuzzy candidate, if a fuzzy match was attempted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<String>,
    /// Score of the best fuzzy candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Matching records.
    pub records: Vec<Record>,
}

/// Runs the search command.
pub fn run(
    path: &Path,
    kind: StorageKind,
    names: &[String],
    threshold: Option<u8>,
    exact: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dictionary = open_dictionary(path, kind, false)?;
    let threshold = threshold.unwrap_or(dictionary.config().default_threshold);

    let results: Vec<SearchResult> = names
        .iter()
        .map(|name| search(&dictionary, name, threshold, exact))
        .collect();

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        _ => {
            for result in &results {
                print_text_output(result);
            }
        }
    }

    Ok(())
}

/// Looks up `name`, falling back to the best fuzzy candidate unless `exact`.
pub fn search(dictionary: &Dictionary, name: &str, threshold: u8, exact: bool) -> SearchResult {
    let records = dictionary.lookup(name);
    if !records.is_empty() || exact {
        let matched_by = if records.is_empty() {
            MatchKind::None
        } else {
            MatchKind::Exact
        };
        return SearchResult {
            query: name.to_string(),
            matched_by,
            candidate: None,
            score: None,
            records,
        };
    }

    let candidate = dictionary.fuzzy_match(name);
    let records = dictionary.fuzzy_lookup(name, threshold);
    SearchResult {
        query: name.to_string(),
        matched_by: if records.is_empty() {
            MatchKind::None
        } else {
            MatchKind::Fuzzy
        },
        score: candidate.as_ref().map(|found| found.score),
        candidate: candidate.map(|found| found.name),
        records,
    }
}

fn print_text_output(result: &SearchResult) {
    if result.records.is_empty() {
        match (&result.candidate, result.score) {
            (Some(candidate), Some(score)) => println!(
                "No match for {} (closest: {} at {:.1})",
                result.query, candidate, score
            ),
            _ => println!("No match for {}", result.query),
        }
        println!();
        return;
    }

    for record in &result.records {
        println!("Lookup value: {}", result.query);
        println!("Column name: {}", record.name());
        if let (MatchKind::Fuzzy, Some(score)) = (result.matched_by, result.score) {
            println!("Score: {score:.1}");
        }
        println!("Description: {}", record.description());
        println!("Url: {}", record.url());
        println!();
    }
}
