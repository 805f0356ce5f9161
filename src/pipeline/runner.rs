//! Pipeline runner.
//!
//! Validates the raw article, summarizes it when it is too long, then
//! threads one [`AnalysisState`] through every [`Stage`] in order.

use crate::agents::{analyze_bias, compute_score, extract_facts, summarize};
use crate::error::PipelineError;
use crate::models::{AnalysisOutput, AnalysisState, ArticleAnalysis};
use tracing::{debug, info};

/// A step in the analysis graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FactExtractor,
    BiasAnalyzer,
    Supervisor,
}

impl Stage {
    /// Execution order. Each stage only reads fields written by earlier ones.
    pub const ORDER: [Stage; 3] = [Stage::FactExtractor, Stage::BiasAnalyzer, Stage::Supervisor];

    /// Display name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::FactExtractor => "FactAgent",
            Stage::BiasAnalyzer => "BiasAgent",
            Stage::Supervisor => "Supervisor",
        }
    }

    /// Run this stage against the shared state.
    pub fn apply(&self, state: &mut AnalysisState) {
        match self {
            Stage::FactExtractor => extract_facts(state),
            Stage::BiasAnalyzer => analyze_bias(state),
            Stage::Supervisor => compute_score(state),
        }
    }
}

/// Tunables for the pre-stage summarization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Articles longer than this many characters are summarized.
    pub summary_threshold: usize,
    /// Number of period-delimited fragments the summary keeps.
    pub summary_fragments: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            summary_threshold: 1000,
            summary_fragments: 5,
        }
    }
}

impl From<&crate::config::PipelineConfig> for PipelineSettings {
    fn from(config: &crate::config::PipelineConfig) -> Self {
        Self {
            summary_threshold: config.summary_threshold,
            summary_fragments: config.summary_fragments,
        }
    }
}

/// Runs articles through the fixed stage sequence.
#[derive(Debug, Clone, Default)]
pub struct PipelineRunner {
    settings: PipelineSettings,
}

impl PipelineRunner {
    /// Create a runner with the given settings.
    pub fn new(settings: PipelineSettings) -> Self {
        Self { settings }
    }

    /// Settings in force for this runner.
    pub fn settings(&self) -> PipelineSettings {
        self.settings
    }

    /// Whether `text` is long enough to be summarized before analysis.
    pub fn needs_summary(&self, text: &str) -> bool {
        text.chars().count() > self.settings.summary_threshold
    }

    /// Run the pipeline and return the final state.
    pub fn run(&self, raw_text: &str) -> Result<AnalysisState, PipelineError> {
        if is_blank(raw_text) {
            debug!("Rejecting empty article");
            return Err(PipelineError::EmptyInput);
        }

        let mut logs = Vec::new();
        let text = if self.needs_summary(raw_text) {
            info!(
                "Article exceeds {} characters, summarizing",
                self.settings.summary_threshold
            );
            logs.push(format!(
                "Article length > {} → Summarizer Agent executed",
                self.settings.summary_threshold
            ));
            summarize(raw_text, self.settings.summary_fragments)
        } else {
            raw_text.to_string()
        };

        let mut state = AnalysisState::new(text, logs);
        for stage in Stage::ORDER {
            debug!("Running stage {}", stage.name());
            stage.apply(&mut state);
        }

        Ok(state)
    }

    /// Run the pipeline and render the four display fields.
    ///
    /// Empty input yields the marker in the first field and empty strings
    /// in the other three.
    #[allow(dead_code)] // The CLI needs the report metadata from analyze_article
    pub fn analyze(&self, raw_text: &str) -> AnalysisOutput {
        self.analyze_article("<text>", raw_text).output
    }

    /// Analyse one article for inclusion in a report.
    pub fn analyze_article(&self, source: impl Into<String>, raw_text: &str) -> ArticleAnalysis {
        let source = source.into();
        let char_count = raw_text.chars().count();

        match self.run(raw_text) {
            Ok(state) => ArticleAnalysis {
                source,
                char_count,
                summarized: self.needs_summary(raw_text),
                output: AnalysisOutput::from_state(&state),
                state: Some(state),
                error: None,
            },
            Err(e) => ArticleAnalysis {
                source,
                char_count,
                summarized: false,
                state: None,
                output: AnalysisOutput::rejected(e.marker()),
                error: Some(e.to_string()),
            },
        }
    }
}

/// Whether `text` holds nothing but whitespace.
///
/// Besides Unicode `White_Space`, the ASCII information separators
/// U+001C..=U+001F count as whitespace.
fn is_blank(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EMPTY_INPUT_MARKER;
    use crate::models::{NO_BIAS_PLACEHOLDER, NO_FACTS_PLACEHOLDER};

    const SAMPLE: &str =
        "The sky is blue. It was raining yesterday. This report is shocking and a disaster.";

    fn runner() -> PipelineRunner {
        PipelineRunner::default()
    }

    #[test]
    fn test_sample_article() {
        let (facts, bias, score, log) = runner().analyze(SAMPLE).into_fields();

        assert_eq!(
            facts,
            "The sky is blue\nIt was raining yesterday\nThis report is shocking and a disaster"
        );
        assert_eq!(bias, "shocking, disaster");
        assert_eq!(score, "0.6 (Moderately Biased)");
        assert_eq!(
            log,
            "Fact Extractor Agent executed\n\
             Bias Analyzer Agent executed\n\
             Supervisor Agent calculated neutrality score"
        );
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        for input in ["", "   ", "\n\t "] {
            let fields = runner().analyze(input).into_fields();
            assert_eq!(
                fields,
                (
                    EMPTY_INPUT_MARKER.to_string(),
                    String::new(),
                    String::new(),
                    String::new()
                ),
                "input {:?}",
                input
            );
            assert_eq!(runner().run(input), Err(PipelineError::EmptyInput));
        }
    }

    #[test]
    fn test_neutral_article_placeholders() {
        let (facts, bias, score, _) = runner().analyze("Hello world. Good morning.").into_fields();
        assert_eq!(facts, NO_FACTS_PLACEHOLDER);
        assert_eq!(bias, NO_BIAS_PLACEHOLDER);
        assert_eq!(score, "0.9 (Mostly Neutral)");
    }

    #[test]
    fn test_score_changes_only_at_thresholds() {
        let texts = [
            ("Calm news.", "0.9 (Mostly Neutral)"),
            ("A shocking day.", "0.6 (Moderately Biased)"),
            ("A shocking disaster.", "0.6 (Moderately Biased)"),
            ("A shocking disaster and failure.", "0.3 (Highly Biased)"),
            ("Shocking disaster, failure, corrupt outrage.", "0.3 (Highly Biased)"),
        ];

        for (text, expected) in texts {
            assert_eq!(runner().analyze(text).score, expected, "text {:?}", text);
        }
    }

    #[test]
    fn test_stage_order_is_fixed() {
        assert_eq!(
            Stage::ORDER,
            [Stage::FactExtractor, Stage::BiasAnalyzer, Stage::Supervisor]
        );
        let state = runner().run(SAMPLE).unwrap();
        assert_eq!(state.logs.len(), 3);
        assert_eq!(state.logs[0], "Fact Extractor Agent executed");
        assert_eq!(state.logs[2], "Supervisor Agent calculated neutrality score");
    }

    #[test]
    fn test_long_article_is_summarized() {
        // Fragment 6 onwards carries the only bias term and fact marker.
        let padding = "x".repeat(250);
        let text = format!(
            "{p}. {p}. {p}. {p}. {p}. The mayor is corrupt. Tail.",
            p = padding
        );
        assert!(text.chars().count() > 1000);

        let state = runner().run(&text).unwrap();
        assert_eq!(state.text, summarize(&text, 5));
        assert!(state.facts.is_empty());
        assert!(state.bias_words.is_empty());
        assert_eq!(
            state.logs[0],
            "Article length > 1000 → Summarizer Agent executed"
        );
        assert_eq!(state.logs.len(), 4);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let text = "a".repeat(1000);
        let state = runner().run(&text).unwrap();
        assert_eq!(state.text, text);
        assert_eq!(state.logs.len(), 3);
        assert!(!runner().needs_summary(&text));
        assert!(runner().needs_summary(&format!("{}b", text)));
    }

    #[test]
    fn test_threshold_counts_characters_not_bytes() {
        // 600 two-byte characters: 1200 bytes but only 600 characters.
        let text = "é".repeat(600);
        assert!(!runner().needs_summary(&text));
    }

    #[test]
    fn test_custom_settings() {
        let runner = PipelineRunner::new(PipelineSettings {
            summary_threshold: 10,
            summary_fragments: 1,
        });
        let state = runner
            .run("The sky is blue. The report is shocking.")
            .unwrap();
        assert_eq!(state.text, "The sky is blue");
        assert!(state.bias_words.is_empty());
        assert_eq!(
            state.logs[0],
            "Article length > 10 → Summarizer Agent executed"
        );
    }

    #[test]
    fn test_analyze_article() {
        let analysed = runner().analyze_article("sample.txt", SAMPLE);
        assert!(analysed.state.is_some());
        assert!(!analysed.summarized);
        assert_eq!(analysed.char_count, SAMPLE.chars().count());
        assert_eq!(analysed.bias_words(), ["shocking", "disaster"]);
        assert!(analysed.error.is_none());

        let rejected = runner().analyze_article("empty.txt", "  ");
        assert!(rejected.state.is_none());
        assert_eq!(rejected.output.facts, EMPTY_INPUT_MARKER);
        assert_eq!(rejected.error.as_deref(), Some("No article provided"));
    }

    #[test]
    fn test_information_separators_count_as_blank() {
        let fields = runner().analyze("\u{1c}\u{1d} \u{1e}\u{1f}\n").into_fields();
        assert_eq!(fields.0, EMPTY_INPUT_MARKER);
        assert_eq!(fields.2, "");
        assert_eq!(runner().run("\u{a0}\u{3000}"), Err(PipelineError::EmptyInput));
        assert!(runner().run("\u{1c}a").is_ok());
    }

    #[test]
    fn test_analyze_matches_article_output() {
        for text in [SAMPLE, "", "Quiet news."] {
            assert_eq!(
                runner().analyze(text),
                runner().analyze_article("a.txt", text).output,
                "text {:?}",
                text
            );
        }
    }
}
