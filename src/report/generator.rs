//! Report generation.
//!
//! This module renders analysis results as the four labelled text
//! fields, as a Markdown report, or as JSON.

use crate::analysis::{generate_summary_text, least_neutral_articles, term_frequency};
use crate::config::ReportConfig;
use crate::models::{ArticleAnalysis, Report, ReportMetadata, Verdict, VerdictSummary};
use anyhow::Result;

/// Field labels, in display order.
const FACTS_LABEL: &str = "Extracted Facts";
const BIAS_LABEL: &str = "Bias Indicators";
const SCORE_LABEL: &str = "Neutrality Score";
const LOG_LABEL: &str = "Reasoning Log";

/// Render the labelled fields for every article.
///
/// With more than one article, each block is headed by its source and a
/// batch summary follows.
pub fn generate_text_output(report: &Report, include_log: bool) -> String {
    let batch = report.articles.len() > 1;
    let mut blocks = Vec::new();

    for article in &report.articles {
        let mut block = String::new();
        if batch {
            block.push_str(&format!("=== {} ===\n\n", article.source));
        }
        block.push_str(&generate_text_fields(article, include_log));
        blocks.push(block);
    }

    let mut output = blocks.join("\n");

    if batch {
        output.push_str("\n=== Summary ===\n\n");
        output.push_str(&generate_summary_text(&report.summary));
        output.push('\n');
    }

    output
}

/// The labelled fields for a single article.
fn generate_text_fields(article: &ArticleAnalysis, include_log: bool) -> String {
    let mut fields = vec![
        (FACTS_LABEL, &article.output.facts),
        (BIAS_LABEL, &article.output.bias),
        (SCORE_LABEL, &article.output.score),
    ];
    if include_log {
        fields.push((LOG_LABEL, &article.output.log));
    }

    let mut text = String::new();
    for (label, value) in fields {
        text.push_str(&format!("{}:\n{}\n\n", label, value));
    }

    text
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report, config: &ReportConfig, include_log: bool) -> String {
    let mut output = String::new();

    // Title
    output.push_str(&format!("# {}\n\n", config.title));

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_table_of_contents(report));
    output.push_str(&generate_summary_section(
        &report.summary,
        &report.articles,
        config.top_articles,
    ));
    output.push_str(&generate_articles_section(&report.articles, include_log));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Articles Analyzed:** {}\n",
        metadata.articles_analyzed
    ));
    if metadata.articles_rejected > 0 {
        section.push_str(&format!(
            "- **Articles Rejected:** {}\n",
            metadata.articles_rejected
        ));
    }
    section.push_str(&format!(
        "- **Summary Threshold:** {} characters\n",
        metadata.summary_threshold
    ));
    section.push_str(&format!(
        "- **Analysis Duration:** {:.3}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Markdown anchor for an article heading.
fn article_anchor(source: &str) -> String {
    source.replace(['/', '\\', '.', ' ', '<', '>'], "-").to_lowercase()
}

/// Generate the table of contents.
fn generate_table_of_contents(report: &Report) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");
    toc.push_str("- [Summary](#summary)\n");
    toc.push_str("- [Articles](#articles)\n");

    for article in &report.articles {
        toc.push_str(&format!(
            "  - [{}](#{})\n",
            article.source,
            article_anchor(&article.source)
        ));
    }

    toc.push('\n');

    toc
}

/// Generate the summary section.
fn generate_summary_section(
    summary: &VerdictSummary,
    articles: &[ArticleAnalysis],
    top_articles: usize,
) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");

    // Verdict breakdown
    section.push_str("### Verdict Breakdown\n\n");
    section.push_str(&format!(
        "| {} {} | {} {} | {} {} | **Total** |\n",
        Verdict::MostlyNeutral.emoji(),
        Verdict::MostlyNeutral,
        Verdict::ModeratelyBiased.emoji(),
        Verdict::ModeratelyBiased,
        Verdict::HighlyBiased.emoji(),
        Verdict::HighlyBiased,
    ));
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | **{}** |\n\n",
        summary.mostly_neutral, summary.moderately_biased, summary.highly_biased, summary.analyzed
    ));

    if let Some(mean) = summary.mean_score {
        section.push_str(&format!("**Mean neutrality score:** {:.2}\n\n", mean));
    }

    // Bias term frequency
    let terms = term_frequency(summary);
    if !terms.is_empty() {
        section.push_str("### Bias Terms\n\n");
        section.push_str("| Term | Articles |\n");
        section.push_str("|:---|:---:|\n");

        for (term, count) in terms {
            section.push_str(&format!("| {} | {} |\n", term, count));
        }
        section.push('\n');
    }

    // Least neutral articles
    let ranked = least_neutral_articles(articles, top_articles);
    if !ranked.is_empty() {
        section.push_str("### Least Neutral Articles\n\n");
        section.push_str("| Article | Score | Bias Terms |\n");
        section.push_str("|:---|:---:|:---:|\n");

        for article in ranked {
            section.push_str(&format!(
                "| `{}` | {} | {} |\n",
                article.source,
                article.output.score,
                article.bias_words().len()
            ));
        }
        section.push('\n');
    }

    section
}

/// Generate the per-article section.
fn generate_articles_section(articles: &[ArticleAnalysis], include_log: bool) -> String {
    let mut section = String::new();

    section.push_str("## Articles\n\n");

    if articles.is_empty() {
        section.push_str("No articles were analyzed.\n\n");
        return section;
    }

    for article in articles {
        section.push_str(&generate_article_block(article, include_log));
    }

    section
}

/// Generate a single article block.
fn generate_article_block(article: &ArticleAnalysis, include_log: bool) -> String {
    let mut block = String::new();

    block.push_str(&format!(
        "### {} {{#{}}}\n\n",
        article.source,
        article_anchor(&article.source)
    ));

    if let Some(ref error) = article.error {
        block.push_str(&format!("> {} ({})\n\n", article.output.facts, error));
        block.push_str("---\n\n");
        return block;
    }

    let badge = article
        .verdict()
        .map(|v| format!("{} **{}**", v.emoji(), v.remark().to_uppercase()))
        .unwrap_or_default();
    block.push_str(&format!("{} | Score: {}\n\n", badge, article.output.score));

    let summarized = if article.summarized { " (summarized)" } else { "" };
    block.push_str(&format!(
        "*Characters: {}{}*\n\n",
        article.char_count, summarized
    ));

    block.push_str(&format!("#### {}\n\n", FACTS_LABEL));
    match &article.state {
        Some(state) if !state.facts.is_empty() => {
            for fact in &state.facts {
                block.push_str(&format!("- {}\n", fact));
            }
            block.push('\n');
        }
        _ => block.push_str(&format!("{}\n\n", article.output.facts)),
    }

    block.push_str(&format!("#### {}\n\n{}\n\n", BIAS_LABEL, article.output.bias));

    if include_log {
        block.push_str(&format!(
            "<details>\n<summary>{}</summary>\n\n```\n{}\n```\n</details>\n\n",
            LOG_LABEL, article.output.log
        ));
    }

    block.push_str("---\n\n");

    block
}

/// Generate the report footer.
fn generate_footer() -> String {
    "*Report generated by NewsLens*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
