//! Batch analysis helpers.
//!
//! Statistics computed over the articles of a single run.

pub mod aggregator;

pub use aggregator::*;
