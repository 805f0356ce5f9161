//! NewsLens - rule-based news neutrality analyzer
//!
//! A CLI tool that runs articles through a fixed three-stage pipeline
//! (fact extraction, bias lookup, scoring) and reports how neutral
//! each one reads.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable input, bad config, etc.) or an empty article
//!   2 - An article scored below the --fail-below threshold

mod agents;
mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod pipeline;
mod report;
mod scanner;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, InputSource, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use indicatif::{ProgressBar, ProgressStyle};
use models::{ArticleAnalysis, Report, ReportMetadata, VerdictSummary};
use pipeline::{PipelineRunner, PipelineSettings};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Configuration decides the default verbosity, so it loads before logging
    let (mut config, origin) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);
    if let Err(e) = config.validate() {
        eprintln!("Error: invalid configuration: {:#}", e);
        std::process::exit(1);
    }

    init_logging(args.log_level(config.general.verbose))?;

    info!("NewsLens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    origin.log();

    match run_analysis(&args, &config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .newslens.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize summarization, scanning, and report output.");
    Ok(())
}

/// Initialize logging at the given level. Logs go to stderr.
///
/// `RUST_LOG`, when set, replaces the level chosen by the flags.
fn init_logging(level: tracing::Level) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Run the complete analysis workflow. Returns the exit code.
fn run_analysis(args: &Args, config: &Config) -> Result<i32> {
    let start_time = Instant::now();
    let runner = PipelineRunner::new(PipelineSettings::from(&config.pipeline));

    // Step 1: Gather the articles
    let source = args.input_source();
    let single_article = match &source {
        InputSource::Text(_) | InputSource::Stdin => true,
        InputSource::Files(paths) => paths.len() == 1,
        InputSource::Directory(_) => false,
    };
    let (description, inputs) = load_articles(&source, config)?;
    info!("Loaded {} article(s) from {}", inputs.len(), description);

    // Step 2: Run every article through the pipeline
    let articles = analyze_all(&runner, inputs, args.quiet)?;

    // Step 3: Build the report
    let summary = VerdictSummary::from_articles(&articles);
    let metadata = ReportMetadata {
        source: description,
        analysis_date: Utc::now(),
        articles_analyzed: summary.analyzed,
        articles_rejected: summary.rejected,
        summary_threshold: runner.settings().summary_threshold,
        duration_seconds: start_time.elapsed().as_secs_f64(),
    };
    let report = Report {
        metadata,
        articles,
        summary,
    };

    // Step 4: Render and emit
    let output = match config.general.format {
        OutputFormat::Text => report::generate_text_output(&report, config.general.include_log),
        OutputFormat::Markdown => report::generate_markdown_report(
            &report,
            &config.report,
            config.general.include_log,
        ),
        OutputFormat::Json => report::generate_json_report(&report)?,
    };
    write_output(args.output.as_deref(), &output)?;

    let code = exit_code(&report, single_article, args.fail_below);
    if code == 1 {
        warn!("No article provided");
    } else if let (2, Some(threshold)) = (code, args.fail_below) {
        let failing = analysis::articles_below(&report.articles, threshold);
        for article in &failing {
            debug!("{} scored {}", article.source, article.output.score);
        }
        eprintln!(
            "\n⛔ {} article(s) scored below {}. Failing (exit code 2).",
            failing.len(),
            threshold
        );
    }

    Ok(code)
}

/// Decide the exit code for a finished report.
///
/// A rejected single article is an error (1) even when `--fail-below` is
/// set; otherwise any scored article under the threshold fails the run (2).
fn exit_code(report: &Report, single_article: bool, fail_below: Option<f64>) -> i32 {
    if single_article && report.summary.rejected > 0 {
        return 1;
    }

    if let Some(threshold) = fail_below {
        if !analysis::articles_below(&report.articles, threshold).is_empty() {
            return 2;
        }
    }

    0
}

/// A raw article waiting to be analysed.
struct ArticleInput {
    source: String,
    text: String,
}

/// Read the articles named by the input source.
///
/// Returns a description of the source alongside the articles.
fn load_articles(source: &InputSource, config: &Config) -> Result<(String, Vec<ArticleInput>)> {
    match source {
        InputSource::Text(text) => Ok((
            "command line".to_string(),
            vec![ArticleInput {
                source: "<text>".to_string(),
                text: text.clone(),
            }],
        )),
        InputSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read article from stdin")?;
            Ok((
                "standard input".to_string(),
                vec![ArticleInput {
                    source: "<stdin>".to_string(),
                    text,
                }],
            ))
        }
        InputSource::Files(paths) => {
            let inputs = paths
                .iter()
                .map(|path| {
                    let text = std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read article: {}", path.display()))?;
                    Ok(ArticleInput {
                        source: path.display().to_string(),
                        text,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok((format!("{} file(s)", paths.len()), inputs))
        }
        InputSource::Directory(dir) => {
            let inputs = scan_directory(dir, config)?;
            Ok((format!("directory {}", dir.display()), inputs))
        }
    }
}

/// Discover and read every article under `dir`. Unreadable files are skipped.
fn scan_directory(dir: &Path, config: &Config) -> Result<Vec<ArticleInput>> {
    let scan_config = scanner::ScanConfig::from(&config.scanner);
    let article_scanner = scanner::ArticleScanner::new(dir.to_path_buf(), scan_config);
    let scanned = article_scanner.scan()?;

    if scanned.is_empty() {
        warn!("No article files found under {}", dir.display());
    }

    let mut inputs = Vec::with_capacity(scanned.len());
    for article in scanned {
        debug!("Reading {} ({} bytes)", article.path, article.size);
        match std::fs::read_to_string(&article.full_path) {
            Ok(text) => inputs.push(ArticleInput {
                source: article.path,
                text,
            }),
            Err(e) => warn!("Failed to read {}: {}", article.path, e),
        }
    }

    Ok(inputs)
}

/// Analyse each article in turn, showing progress for batches.
fn analyze_all(
    runner: &PipelineRunner,
    inputs: Vec<ArticleInput>,
    quiet: bool,
) -> Result<Vec<ArticleAnalysis>> {
    let progress_bar = if inputs.len() > 1 && !quiet {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut articles = Vec::with_capacity(inputs.len());
    for input in inputs {
        if let Some(ref pb) = progress_bar {
            pb.set_message(input.source.clone());
        }

        let analysis = runner.analyze_article(input.source, &input.text);
        debug!("{}: {}", analysis.source, analysis.output.score);
        articles.push(analysis);

        if let Some(ref pb) = progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    Ok(articles)
}

/// Write rendered output to a file, or stdout when no path is given.
fn write_output(path: Option<&Path>, output: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Output saved to {}", path.display());
        }
        None => print!("{}", output),
    }
    Ok(())
}

/// Where the configuration came from; logged once logging is up.
enum ConfigOrigin {
    Explicit(PathBuf),
    WorkingDir,
    Defaults,
    Fallback(String),
}

impl ConfigOrigin {
    fn log(&self) {
        match self {
            ConfigOrigin::Explicit(path) => info!("Loaded config from: {}", path.display()),
            ConfigOrigin::WorkingDir => info!("Loaded default config from {}", CONFIG_FILE_NAME),
            ConfigOrigin::Defaults => debug!("No config file found, using defaults"),
            ConfigOrigin::Fallback(reason) => warn!("Failed to load config: {}", reason),
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigOrigin)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigOrigin::Explicit(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigOrigin::WorkingDir)),
        Ok(None) => Ok((Config::default(), ConfigOrigin::Defaults)),
        Err(e) => Ok((Config::default(), ConfigOrigin::Fallback(format!("{:#}", e)))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_for(texts: &[&str]) -> Report {
        let runner = PipelineRunner::default();
        let articles: Vec<ArticleAnalysis> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| runner.analyze_article(format!("{}.txt", i), text))
            .collect();
        let summary = VerdictSummary::from_articles(&articles);
        Report {
            metadata: ReportMetadata {
                source: "test".to_string(),
                analysis_date: Utc::now(),
                articles_analyzed: summary.analyzed,
                articles_rejected: summary.rejected,
                summary_threshold: runner.settings().summary_threshold,
                duration_seconds: 0.0,
            },
            articles,
            summary,
        }
    }

    const BIASED: &str = "This is shocking. A total disaster. A corrupt failure.";

    #[test]
    fn test_exit_code_single_empty_article() {
        let report = report_for(&["   "]);
        assert_eq!(exit_code(&report, true, None), 1);
    }

    #[test]
    fn test_exit_code_empty_article_in_batch() {
        let report = report_for(&["", "The sky is blue."]);
        assert_eq!(exit_code(&report, false, None), 0);
    }

    #[test]
    fn test_exit_code_fail_below() {
        let report = report_for(&[BIASED]);
        assert_eq!(report.articles[0].score(), Some(0.3));
        assert_eq!(exit_code(&report, true, Some(0.6)), 2);
        assert_eq!(exit_code(&report, true, Some(0.3)), 0);
    }

    #[test]
    fn test_exit_code_without_threshold() {
        let report = report_for(&[BIASED]);
        assert_eq!(exit_code(&report, true, None), 0);
    }

    #[test]
    fn test_empty_single_article_wins_over_threshold() {
        let report = report_for(&[""]);
        assert_eq!(exit_code(&report, true, Some(0.6)), 1);
    }
}
