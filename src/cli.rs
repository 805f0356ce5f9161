//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// NewsLens - rule-based neutrality scoring for news articles
///
/// Extracts fact-like statements, flags loaded vocabulary and scores how
/// neutral an article reads. Reads from --text, files, a directory of
/// articles, or standard input.
///
/// Examples:
///   newslens --text "The sky is blue. This is a disaster."
///   newslens article.txt
///   cat article.txt | newslens --format json
///   newslens --dir ./articles --format markdown -o report.md
///   newslens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Article files to analyze (one article per file)
    #[arg(value_name = "FILE", conflicts_with_all = ["text", "dir"])]
    pub files: Vec<PathBuf>,

    /// Analyze this text instead of reading files or stdin
    #[arg(short, long, value_name = "TEXT", conflicts_with = "dir")]
    pub text: Option<String>,

    /// Analyze every article file found under this directory
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Write the output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (text, markdown, json)
    ///
    /// Defaults to the config file setting, or text.
    #[arg(long, value_name = "FORMAT", env = "NEWSLENS_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .newslens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Summarize articles longer than this many characters
    #[arg(long, value_name = "CHARS")]
    pub summary_threshold: Option<usize>,

    /// Number of period-delimited fragments a summary keeps
    #[arg(long, value_name = "COUNT")]
    pub summary_fragments: Option<usize>,

    /// Article file extensions for --dir (comma-separated)
    ///
    /// Example: --extensions txt,md
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Maximum number of articles analyzed from --dir
    #[arg(long, value_name = "COUNT")]
    pub max_articles: Option<usize>,

    /// Omit the reasoning log from the output
    #[arg(long)]
    pub no_log: bool,

    /// Fail if any article scores below this neutrality score
    ///
    /// Useful for CI pipelines. Exit code 2 when an article falls below.
    #[arg(long, value_name = "SCORE")]
    pub fail_below: Option<f64>,

    /// Generate a default .newslens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The four labelled fields (default)
    #[default]
    Text,
    /// Markdown report
    Markdown,
    /// JSON report
    Json,
}

/// Where the article text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    Files(Vec<PathBuf>),
    Directory(PathBuf),
    Stdin,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Resolve the input source. `--text` wins over files, files over
    /// `--dir`; with none of them the article is read from stdin.
    pub fn input_source(&self) -> InputSource {
        if let Some(ref text) = self.text {
            InputSource::Text(text.clone())
        } else if !self.files.is_empty() {
            InputSource::Files(self.files.clone())
        } else if let Some(ref dir) = self.dir {
            InputSource::Directory(dir.clone())
        } else {
            InputSource::Stdin
        }
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(fragments) = self.summary_fragments {
            if fragments == 0 {
                return Err("Summary fragments must be at least 1".to_string());
            }
        }

        if let Some(max_articles) = self.max_articles {
            if max_articles == 0 {
                return Err("Max articles must be at least 1".to_string());
            }
        }

        if let Some(score) = self.fail_below {
            if !(0.0..=1.0).contains(&score) {
                return Err("Fail-below score must be between 0.0 and 1.0".to_string());
            }
        }

        for file in &self.files {
            if !file.is_file() {
                return Err(format!("Article file does not exist: {}", file.display()));
            }
        }

        if let Some(ref dir) = self.dir {
            if !dir.exists() {
                return Err(format!("Directory does not exist: {}", dir.display()));
            }
            if !dir.is_dir() {
                return Err(format!("Path is not a directory: {}", dir.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `--quiet` wins; otherwise `--verbose` or a verbose config file
    /// enables debug output.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
