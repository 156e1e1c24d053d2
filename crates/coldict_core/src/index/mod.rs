//! Secondary access paths over the dictionary.
//!
//! The primary index (id → record) is a plain ordered map owned by the
//! dictionary. This module holds what sits beside it:
//!
//! - [`HashIndex`]: key → set of record ids, used for the name index
//! - [`NameCache`]: a sorted, deduplicated snapshot of the name keys that
//!   fuzzy matching scans
//!
//! Both are internal structures; callers query through
//! [`crate::Dictionary`].

mod hash;
mod name_cache;
mod traits;

pub use hash::HashIndex;
pub use name_cache::NameCache;
pub use traits::Index;
