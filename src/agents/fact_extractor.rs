//! Fact-like fragment extraction.

use crate::models::AnalysisState;
use tracing::debug;

/// Substrings that mark a fragment as a statement of fact.
pub const FACT_MARKERS: [&str; 2] = [" is ", " was "];

/// Collect the trimmed period-delimited fragments of `text` that contain
/// a fact marker. The marker check runs on the untrimmed fragment.
pub fn fact_fragments(text: &str) -> Vec<String> {
    text.split('.')
        .filter(|fragment| FACT_MARKERS.iter().any(|m| fragment.contains(m)))
        .map(|fragment| fragment.trim().to_string())
        .collect()
}

/// Fact extractor stage: fill `state.facts`.
pub fn extract_facts(state: &mut AnalysisState) {
    state.facts = fact_fragments(&state.text);
    debug!("Extracted {} fact-like fragments", state.facts.len());
    state.logs.push("Fact Extractor Agent executed".to_string());
}
