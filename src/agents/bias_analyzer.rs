//! Biased-word lookup.
//!
//! Matching is plain substring containment on the lowercased text, so
//! "outrageous" matches "outrage" and "corruption" matches "corrupt".

use crate::models::AnalysisState;
use tracing::debug;

/// Terms treated as signs of biased reporting, in reporting order.
pub const BIAS_TERMS: [&str; 5] = ["shocking", "disaster", "failure", "corrupt", "outrage"];

/// Bias terms present anywhere in `text`, in [`BIAS_TERMS`] order.
pub fn find_bias_terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    BIAS_TERMS
        .iter()
        .filter(|term| lowered.contains(*term))
        .map(|term| term.to_string())
        .collect()
}

/// Bias analyzer stage: fill `state.bias_words`.
pub fn analyze_bias(state: &mut AnalysisState) {
    state.bias_words = find_bias_terms(&state.text);
    debug!("Matched bias terms: {:?}", state.bias_words);
    state.logs.push("Bias Analyzer Agent executed".to_string());
}
