//! Pipeline error types.

use thiserror::Error;

/// Marker shown in place of the facts field when no article was given.
pub const EMPTY_INPUT_MARKER: &str = "❌ No article provided";

/// Errors raised by the analysis pipeline.
///
/// Every stage is total over its input, so the only failure is being
/// handed nothing to analyse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The article was empty or contained only whitespace.
    #[error("No article provided")]
    EmptyInput,
}

impl PipelineError {
    /// The fixed user-facing marker for this error.
    pub fn marker(&self) -> &'static str {
        match self {
            PipelineError::EmptyInput => EMPTY_INPUT_MARKER,
        }
    }
}
