//! Score derivation.

use crate::models::{AnalysisState, Verdict};
use tracing::debug;

/// Supervisor stage: derive `score` and `remark` from the bias-term count.
pub fn compute_score(state: &mut AnalysisState) {
    let verdict = Verdict::from_bias_count(state.bias_words.len());
    state.score = verdict.score();
    state.remark = verdict.remark().to_string();
    debug!(
        "Bias count {} -> {} ({})",
        state.bias_words.len(),
        state.score,
        state.remark
    );
    state
        .logs
        .push("Supervisor Agent calculated neutrality score".to_string());
}
