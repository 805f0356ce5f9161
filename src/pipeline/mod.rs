//! Linear stage pipeline.
//!
//! The stage graph is fixed: fact extraction, then bias lookup, then
//! scoring. There is no branching between stages.

pub mod runner;

pub use runner::{PipelineRunner, PipelineSettings};
