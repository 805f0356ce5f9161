//! Rule-based analysis agents.
//!
//! Each agent is a plain function over the shared [`AnalysisState`]
//! (the summarizer works on raw text before the state exists).
//!
//! [`AnalysisState`]: crate::models::AnalysisState

pub mod bias_analyzer;
pub mod fact_extractor;
pub mod summarizer;
pub mod supervisor;

pub use bias_analyzer::analyze_bias;
pub use fact_extractor::extract_facts;
pub use summarizer::summarize;
pub use supervisor::compute_score;
