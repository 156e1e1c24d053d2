//! Property-based test generators using proptest.
//!
//! Names and descriptions are drawn from small pools so that generated
//! records collide on name, description and id often enough to exercise
//! the shared-bucket, dedup and update paths.

use crate::fixtures::RecordBuilder;
use coldict_core::Record;
use proptest::prelude::*;

/// Strategy for record ids in a narrow range.
pub fn record_id_strategy() -> impl Strategy<Value = i64> {
    0i64..32
}

/// Strategy for column names that fuzzy preprocessing leaves unchanged.
pub fn column_name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "coid",
        "coname",
        "eff",
        "effts",
        "street",
        "streetaddr",
        "zip",
        "zipcode",
    ])
    .prop_map(str::to_string)
}

/// Strategy for free-form column names, including separators and case.
pub fn raw_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9_ ]{0,15}").expect("Invalid regex")
}

/// Strategy for descriptions, some with markup.
pub fn description_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Company identifier",
        "<p>Company identifier</p>",
        "Effective timestamp",
        "<b>Street</b> address",
        "",
    ])
    .prop_map(str::to_string)
}

/// Strategy for a normalized record.
pub fn record_strategy() -> impl Strategy<Value = Record> {
    (
        record_id_strategy(),
        column_name_strategy(),
        description_strategy(),
        prop::option::of("[a-z]{1,8}"),
    )
        .prop_map(|(id, name, description, title)| {
            RecordBuilder::new(id, name)
                .description(description)
                .title(title.unwrap_or_default())
                .build()
        })
}

/// Strategy for a sequence of records to add.
pub fn record_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record_strategy(), 0..max_len)
}

/// Strategy for arbitrary, possibly malformed, markup.
pub fn markup_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[<>/a-z &;\"'=]{0,40}").expect("Invalid regex")
}
