//! Invariant checks over a dictionary's public surface.

use coldict_core::Dictionary;
use std::collections::{BTreeSet, HashSet};

/// Asserts that the dictionary's indexes agree:
///
/// - the name cache is exactly the sorted set of record names
/// - every record is found by id
/// - every record is represented in the lookup of its name (by itself or by
///   an earlier record with the same description)
/// - lookups return records of the requested name, with distinct
///   descriptions, in ascending id order
///
/// # Panics
///
/// Panics with a description of the first violated invariant.
pub fn assert_invariants(dictionary: &Dictionary) {
    let records = dictionary.records();

    let expected_names: Vec<String> = records
        .iter()
        .map(|record| record.name().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    assert_eq!(
        &*dictionary.names(),
        expected_names.as_slice(),
        "name cache disagrees with records"
    );
    assert_eq!(dictionary.len(), records.len());

    for record in &records {
        assert_eq!(
            dictionary.get(record.id()).as_ref(),
            Some(record),
            "record {} not found by id",
            record.id()
        );

        let found = dictionary.lookup(record.name());
        assert!(
            found.iter().any(|other| other.id() == record.id()
                || (other.description() == record.description() && other.id() < record.id())),
            "record {} missing from lookup of {:?}",
            record.id(),
            record.name()
        );
    }

    for name in dictionary.names().iter() {
        let found = dictionary.lookup(name);
        assert!(!found.is_empty(), "name {name:?} has an empty bucket");

        let mut descriptions = HashSet::new();
        for pair in found.windows(2) {
            assert!(pair[0].id() < pair[1].id(), "lookup of {name:?} out of order");
        }
        for record in &found {
            assert_eq!(record.name(), name);
            assert!(
                descriptions.insert(record.description()),
                "lookup of {name:?} repeats a description"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{populated_dictionary, RecordBuilder, TestDictionary};

    #[test]
    fn sample_satisfies_invariants() {
        assert_invariants(&populated_dictionary());
    }

    #[test]
    fn renames_satisfy_invariants() {
        let test = TestDictionary::memory();
        test.add(RecordBuilder::new(1, "a").build());
        test.add(RecordBuilder::new(2, "a").build());
        test.add(RecordBuilder::new(1, "b").build());
        test.add(RecordBuilder::new(2, "b").build());
        assert_invariants(&test);
        assert_eq!(&*test.names(), ["b".to_string()]);
    }
}
