//! # Coldict Testkit
//!
//! Test utilities for the column dictionary.
//!
//! This crate provides:
//! - Test fixtures: temporary dictionaries, record builders, failing storage
//! - Property-based test generators using proptest
//! - Invariant checks usable from any test
//!
//! ## Usage
//!
//! ```rust
//! use coldict_testkit::prelude::*;
//!
//! with_temp_dictionary(|dictionary| {
//!     dictionary.add(RecordBuilder::new(1, "coid").build());
//!     assert_invariants(dictionary);
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod invariants;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::invariants::*;
}

pub use fixtures::*;
pub use generators::*;
pub use invariants::*;
