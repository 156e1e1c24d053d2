//! Benchmark utilities.

use coldict_core::{Dictionary, Record};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use url::Url;

const WORDS: &[&str] = &[
    "account", "address", "amount", "city", "code", "company", "customer", "date", "eff",
    "first", "id", "last", "line", "name", "number", "order", "postal", "state", "status",
    "street", "timestamp", "type", "zip",
];

/// Generate `count` column names such as `street_address_2`, reproducibly.
pub fn generate_names(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let words = rng.gen_range(1..=3);
            let mut name: Vec<String> = (0..words)
                .map(|_| WORDS[rng.gen_range(0..WORDS.len())].to_string())
                .collect();
            if rng.gen_bool(0.3) {
                name.push(rng.gen_range(1..10).to_string());
            }
            name.join("_")
        })
        .collect()
}

/// Generate `count` records; roughly one name in four is shared.
pub fn generate_records(count: usize, seed: u64) -> Vec<Record> {
    let base = Url::parse("https://catalog.example.com/").expect("Invalid bench base url");
    let names = generate_names(count.max(4) * 3 / 4, seed);
    (0..count)
        .map(|i| {
            let name = &names[i % names.len()];
            let description = format!("<p>Column {name}, variant {i}</p>");
            let url = format!("/attribute/{i}/");
            Record::new(i as i64, name.as_str(), "", &description, &url, &base)
                .expect("Failed to build bench record")
        })
        .collect()
}

/// A memory dictionary holding `count` generated records.
pub fn populated_dictionary(count: usize, seed: u64) -> Dictionary {
    let dictionary = Dictionary::open_in_memory().expect("Failed to open dictionary");
    for record in generate_records(count, seed) {
        dictionary.add(record);
    }
    dictionary
}
