//! Benchmark support for the column dictionary.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod utils;
