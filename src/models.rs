//! Data models for the neutrality analyzer.
//!
//! This module contains the state record threaded through the pipeline,
//! the rendered output fields, and the report structures built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Shown in the facts field when no fragment qualified.
pub const NO_FACTS_PLACEHOLDER: &str = "No factual statements found";

/// Shown in the bias field when no bias term matched.
pub const NO_BIAS_PLACEHOLDER: &str = "No bias indicators found";

/// Neutrality bucket derived from the number of matched bias terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No bias terms matched.
    MostlyNeutral,
    /// One or two bias terms matched.
    ModeratelyBiased,
    /// Three or more bias terms matched.
    HighlyBiased,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [
        Verdict::MostlyNeutral,
        Verdict::ModeratelyBiased,
        Verdict::HighlyBiased,
    ];

    /// Classify a bias-term count. Total over all counts.
    pub fn from_bias_count(count: usize) -> Self {
        match count {
            0 => Verdict::MostlyNeutral,
            1..=2 => Verdict::ModeratelyBiased,
            _ => Verdict::HighlyBiased,
        }
    }

    /// Look up the verdict whose remark matches `remark` exactly.
    pub fn from_remark(remark: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.remark() == remark)
    }

    /// Neutrality score for this bucket.
    pub fn score(&self) -> f64 {
        match self {
            Verdict::MostlyNeutral => 0.9,
            Verdict::ModeratelyBiased => 0.6,
            Verdict::HighlyBiased => 0.3,
        }
    }

    /// Human-readable remark for this bucket.
    pub fn remark(&self) -> &'static str {
        match self {
            Verdict::MostlyNeutral => "Mostly Neutral",
            Verdict::ModeratelyBiased => "Moderately Biased",
            Verdict::HighlyBiased => "Highly Biased",
        }
    }

    /// Returns an emoji representation of the verdict.
    pub fn emoji(&self) -> &'static str {
        match self {
            Verdict::MostlyNeutral => "🟢",
            Verdict::ModeratelyBiased => "🟡",
            Verdict::HighlyBiased => "🔴",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.remark())
    }
}

/// The record threaded through every pipeline stage.
///
/// Each field has exactly one writing stage; `logs` is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisState {
    /// Article body the stages operate on (possibly summarized).
    pub text: String,
    /// Fact-like fragments, written by the fact extractor.
    pub facts: Vec<String>,
    /// Matched bias terms in lexicon order, written by the bias analyzer.
    pub bias_words: Vec<String>,
    /// Neutrality score, written by the supervisor.
    pub score: f64,
    /// Remark paired with the score, written by the supervisor.
    pub remark: String,
    /// Trace lines appended by the runner and each stage.
    pub logs: Vec<String>,
}

impl AnalysisState {
    /// Create a fresh state around `text`, carrying any trace lines
    /// recorded before the stages ran.
    pub fn new(text: impl Into<String>, logs: Vec<String>) -> Self {
        Self {
            text: text.into(),
            facts: Vec::new(),
            bias_words: Vec::new(),
            score: 0.0,
            remark: String::new(),
            logs,
        }
    }

    /// The verdict recorded by the supervisor, if it has run.
    pub fn verdict(&self) -> Option<Verdict> {
        Verdict::from_remark(&self.remark)
    }
}

/// The four display fields produced for one article.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisOutput {
    /// Facts joined by newline, or a placeholder.
    pub facts: String,
    /// Bias terms joined by comma, or a placeholder.
    pub bias: String,
    /// `"{score} ({remark})"`.
    pub score: String,
    /// Trace lines joined by newline.
    pub log: String,
}

impl AnalysisOutput {
    /// Render a finished state into display fields.
    pub fn from_state(state: &AnalysisState) -> Self {
        let facts = if state.facts.is_empty() {
            NO_FACTS_PLACEHOLDER.to_string()
        } else {
            state.facts.join("\n")
        };

        let bias = if state.bias_words.is_empty() {
            NO_BIAS_PLACEHOLDER.to_string()
        } else {
            state.bias_words.join(", ")
        };

        Self {
            facts,
            bias,
            score: format!("{} ({})", state.score, state.remark),
            log: state.logs.join("\n"),
        }
    }

    /// Output for a rejected article: the marker first, the rest empty.
    pub fn rejected(marker: &str) -> Self {
        Self {
            facts: marker.to_string(),
            ..Self::default()
        }
    }

    /// Consume the output as a `(facts, bias, score, log)` tuple.
    #[allow(dead_code)] // Tuple form of the single-article entry point
    pub fn into_fields(self) -> (String, String, String, String) {
        (self.facts, self.bias, self.score, self.log)
    }
}

/// One article as it appears in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleAnalysis {
    /// Where the article came from (file path, `<stdin>`, `<text>`).
    pub source: String,
    /// Length of the raw article in characters.
    pub char_count: usize,
    /// Whether the summarizer replaced the raw text.
    pub summarized: bool,
    /// Final pipeline state, absent when the article was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<AnalysisState>,
    /// Rendered display fields.
    pub output: AnalysisOutput,
    /// Error message if the article was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ArticleAnalysis {
    /// Verdict of an analysed article.
    pub fn verdict(&self) -> Option<Verdict> {
        self.state.as_ref().and_then(AnalysisState::verdict)
    }

    /// Score of an analysed article.
    pub fn score(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.score)
    }

    /// Bias terms of an analysed article (empty if rejected).
    pub fn bias_words(&self) -> &[String] {
        self.state
            .as_ref()
            .map(|s| s.bias_words.as_slice())
            .unwrap_or(&[])
    }
}

/// Verdict counts across a batch of articles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerdictSummary {
    /// Total number of articles, rejected ones included.
    pub total: usize,
    /// Articles the pipeline ran on.
    pub analyzed: usize,
    /// Articles rejected as empty.
    pub rejected: usize,
    pub mostly_neutral: usize,
    pub moderately_biased: usize,
    pub highly_biased: usize,
    /// Mean score over analysed articles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_score: Option<f64>,
    /// Number of articles each bias term appeared in.
    pub by_term: HashMap<String, usize>,
}

impl VerdictSummary {
    /// Creates a summary from a list of analysed articles.
    pub fn from_articles(articles: &[ArticleAnalysis]) -> Self {
        let mut summary = Self {
            total: articles.len(),
            ..Self::default()
        };
        let mut score_sum = 0.0;

        for article in articles {
            let Some(state) = &article.state else {
                summary.rejected += 1;
                continue;
            };

            summary.analyzed += 1;
            score_sum += state.score;

            match state.verdict() {
                Some(Verdict::MostlyNeutral) => summary.mostly_neutral += 1,
                Some(Verdict::ModeratelyBiased) => summary.moderately_biased += 1,
                Some(Verdict::HighlyBiased) => summary.highly_biased += 1,
                None => {}
            }

            for term in &state.bias_words {
                *summary.by_term.entry(term.clone()).or_insert(0) += 1;
            }
        }

        if summary.analyzed > 0 {
            summary.mean_score = Some(score_sum / summary.analyzed as f64);
        }

        summary
    }

    /// Count for a single verdict bucket.
    pub fn count(&self, verdict: Verdict) -> usize {
        match verdict {
            Verdict::MostlyNeutral => self.mostly_neutral,
            Verdict::ModeratelyBiased => self.moderately_biased,
            Verdict::HighlyBiased => self.highly_biased,
        }
    }
}

/// Metadata about an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Description of the input (text, stdin, file list, directory).
    pub source: String,
    /// Date and time of the analysis.
    pub analysis_date: DateTime<Utc>,
    /// Number of articles the pipeline ran on.
    pub articles_analyzed: usize,
    /// Number of articles rejected as empty.
    pub articles_rejected: usize,
    /// Character count above which articles were summarized.
    pub summary_threshold: usize,
    /// Duration of the run in seconds.
    pub duration_seconds: f64,
}

/// The complete neutrality report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub articles: Vec<ArticleAnalysis>,
    pub summary: VerdictSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished_state(bias_words: &[&str]) -> AnalysisState {
        let verdict = Verdict::from_bias_count(bias_words.len());
        AnalysisState {
            text: "text".to_string(),
            facts: vec![],
            bias_words: bias_words.iter().map(|w| w.to_string()).collect(),
            score: verdict.score(),
            remark: verdict.remark().to_string(),
            logs: vec![],
        }
    }

    fn article(state: Option<AnalysisState>) -> ArticleAnalysis {
        let output = match &state {
            Some(s) => AnalysisOutput::from_state(s),
            None => AnalysisOutput::rejected("marker"),
        };
        ArticleAnalysis {
            source: "a.txt".to_string(),
            char_count: 4,
            summarized: false,
            error: state.is_none().then(|| "No article provided".to_string()),
            state,
            output,
        }
    }

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(Verdict::from_bias_count(0), Verdict::MostlyNeutral);
        assert_eq!(Verdict::from_bias_count(1), Verdict::ModeratelyBiased);
        assert_eq!(Verdict::from_bias_count(2), Verdict::ModeratelyBiased);
        assert_eq!(Verdict::from_bias_count(3), Verdict::HighlyBiased);
        assert_eq!(Verdict::from_bias_count(5), Verdict::HighlyBiased);
        assert_eq!(Verdict::from_bias_count(usize::MAX), Verdict::HighlyBiased);
    }

    #[test]
    fn test_verdict_remark_round_trip() {
        for verdict in Verdict::ALL {
            assert_eq!(Verdict::from_remark(verdict.remark()), Some(verdict));
        }
        assert_eq!(Verdict::from_remark(""), None);
    }

    #[test]
    fn test_new_state_is_blank() {
        let state = AnalysisState::new("body", vec!["pre".to_string()]);
        assert_eq!(state.text, "body");
        assert!(state.facts.is_empty());
        assert!(state.bias_words.is_empty());
        assert_eq!(state.score, 0.0);
        assert!(state.remark.is_empty());
        assert_eq!(state.logs, vec!["pre"]);
        assert_eq!(state.verdict(), None);
    }

    #[test]
    fn test_output_placeholders() {
        let output = AnalysisOutput::from_state(&finished_state(&[]));
        assert_eq!(output.facts, NO_FACTS_PLACEHOLDER);
        assert_eq!(output.bias, NO_BIAS_PLACEHOLDER);
        assert_eq!(output.score, "0.9 (Mostly Neutral)");
    }

    #[test]
    fn test_output_joins() {
        let mut state = finished_state(&["shocking", "disaster"]);
        state.facts = vec!["A is B".to_string(), "C was D".to_string()];
        state.logs = vec!["one".to_string(), "two".to_string()];

        let (facts, bias, score, log) = AnalysisOutput::from_state(&state).into_fields();
        assert_eq!(facts, "A is B\nC was D");
        assert_eq!(bias, "shocking, disaster");
        assert_eq!(score, "0.6 (Moderately Biased)");
        assert_eq!(log, "one\ntwo");
    }

    #[test]
    fn test_rejected_output() {
        let output = AnalysisOutput::rejected("marker");
        assert_eq!(
            output.into_fields(),
            ("marker".to_string(), String::new(), String::new(), String::new())
        );
    }

    #[test]
    fn test_verdict_summary() {
        let articles = vec![
            article(Some(finished_state(&[]))),
            article(Some(finished_state(&["shocking"]))),
            article(Some(finished_state(&["shocking", "corrupt", "outrage"]))),
            article(None),
        ];

        let summary = VerdictSummary::from_articles(&articles);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.analyzed, 3);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.count(Verdict::MostlyNeutral), 1);
        assert_eq!(summary.count(Verdict::ModeratelyBiased), 1);
        assert_eq!(summary.count(Verdict::HighlyBiased), 1);
        assert_eq!(summary.by_term.get("shocking"), Some(&2));
        assert_eq!(summary.by_term.get("corrupt"), Some(&1));

        let mean = summary.mean_score.unwrap();
        assert!((mean - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_verdict_summary_all_rejected() {
        let summary = VerdictSummary::from_articles(&[article(None)]);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.mean_score, None);
    }
}
