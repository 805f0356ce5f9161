//! Verdict aggregation and statistics.
//!
//! This module provides utilities for ranking analysed articles and
//! summarizing bias terms across a batch.

use crate::agents::bias_analyzer::BIAS_TERMS;
use crate::models::{ArticleAnalysis, Verdict, VerdictSummary};
use std::cmp::Ordering;

/// Bias terms ordered by how many articles they appeared in (most first).
///
/// Ties keep lexicon order so output is stable.
pub fn term_frequency(summary: &VerdictSummary) -> Vec<(String, usize)> {
    let lexicon_rank = |term: &str| {
        BIAS_TERMS
            .iter()
            .position(|t| *t == term)
            .unwrap_or(BIAS_TERMS.len())
    };

    let mut terms: Vec<(String, usize)> = summary
        .by_term
        .iter()
        .map(|(term, count)| (term.clone(), *count))
        .collect();

    terms.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| lexicon_rank(&a.0).cmp(&lexicon_rank(&b.0)))
    });

    terms
}

/// The `n` lowest-scoring analysed articles, most biased first.
///
/// Articles with equal scores are ranked by bias-term count.
pub fn least_neutral_articles(articles: &[ArticleAnalysis], n: usize) -> Vec<&ArticleAnalysis> {
    let mut ranked: Vec<&ArticleAnalysis> = articles
        .iter()
        .filter(|a| a.verdict().is_some_and(|v| v != Verdict::MostlyNeutral))
        .collect();

    ranked.sort_by(|a, b| {
        let score_a = a.score().unwrap_or(f64::MAX);
        let score_b = b.score().unwrap_or(f64::MAX);
        score_a
            .partial_cmp(&score_b)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.bias_words().len().cmp(&a.bias_words().len()))
    });
    ranked.truncate(n);

    ranked
}

/// Analysed articles scoring strictly below `threshold`.
pub fn articles_below(articles: &[ArticleAnalysis], threshold: f64) -> Vec<&ArticleAnalysis> {
    articles
        .iter()
        .filter(|a| a.score().is_some_and(|s| s < threshold))
        .collect()
}

/// Generate a text summary of verdict statistics.
pub fn generate_summary_text(summary: &VerdictSummary) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Articles: {}", summary.total));
    for verdict in Verdict::ALL {
        lines.push(format!(
            "- {} {}: {}",
            verdict.emoji(),
            verdict.remark(),
            summary.count(verdict)
        ));
    }
    if summary.rejected > 0 {
        lines.push(format!("- Rejected (empty): {}", summary.rejected));
    }
    if let Some(mean) = summary.mean_score {
        lines.push(format!("Mean score: {:.2}", mean));
    }

    let terms = term_frequency(summary);
    if !terms.is_empty() {
        lines.push(String::new());
        lines.push("Bias terms:".to_string());

        for (term, count) in terms {
            lines.push(format!("- {}: {}", term, count));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineRunner;

    fn analyse(source: &str, text: &str) -> ArticleAnalysis {
        PipelineRunner::default().analyze_article(source, text)
    }

    fn batch() -> Vec<ArticleAnalysis> {
        vec![
            analyse("calm.txt", "The council is meeting today."),
            analyse("mild.txt", "A shocking vote."),
            analyse("loud.txt", "A shocking, corrupt disaster."),
            analyse("louder.txt", "Shocking corrupt disaster, a failure and an outrage."),
            analyse("empty.txt", " "),
        ]
    }

    #[test]
    fn test_term_frequency_ordering() {
        let articles = batch();
        let summary = VerdictSummary::from_articles(&articles);
        let terms = term_frequency(&summary);

        assert_eq!(terms[0], ("shocking".to_string(), 3));
        // disaster and corrupt tie at 2; lexicon order puts disaster first.
        assert_eq!(terms[1], ("disaster".to_string(), 2));
        assert_eq!(terms[2], ("corrupt".to_string(), 2));
        assert_eq!(terms.len(), 5);
    }

    #[test]
    fn test_least_neutral_articles() {
        let articles = batch();
        let ranked = least_neutral_articles(&articles, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].source, "louder.txt");
        assert_eq!(ranked[1].source, "loud.txt");
    }

    #[test]
    fn test_least_neutral_skips_neutral_and_rejected() {
        let articles = batch();
        let ranked = least_neutral_articles(&articles, 10);
        let sources: Vec<&str> = ranked.iter().map(|a| a.source.as_str()).collect();
        assert_eq!(sources, vec!["louder.txt", "loud.txt", "mild.txt"]);
    }

    #[test]
    fn test_articles_below() {
        let articles = batch();
        assert_eq!(articles_below(&articles, 0.6).len(), 2);
        assert_eq!(articles_below(&articles, 0.9).len(), 3);
        assert!(articles_below(&articles, 0.3).is_empty());
    }

    #[test]
    fn test_generate_summary_text() {
        let articles = batch();
        let text = generate_summary_text(&VerdictSummary::from_articles(&articles));

        assert!(text.contains("Articles: 5"));
        assert!(text.contains("Mostly Neutral: 1"));
        assert!(text.contains("Moderately Biased: 1"));
        assert!(text.contains("Highly Biased: 2"));
        assert!(text.contains("Rejected (empty): 1"));
        assert!(text.contains("- shocking: 3"));
    }
}
