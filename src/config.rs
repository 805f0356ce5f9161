//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.newslens.toml` files.

use crate::cli::OutputFormat;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".newslens.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Article scanner settings.
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Include the reasoning log in rendered output.
    #[serde(default = "default_true")]
    pub include_log: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbose: false,
            include_log: true,
        }
    }
}

/// Summarization settings applied before the analysis stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Articles longer than this many characters are summarized.
    #[serde(default = "default_summary_threshold")]
    pub summary_threshold: usize,

    /// Period-delimited fragments kept by the summarizer.
    #[serde(default = "default_summary_fragments")]
    pub summary_fragments: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            summary_threshold: default_summary_threshold(),
            summary_fragments: default_summary_fragments(),
        }
    }
}

fn default_summary_threshold() -> usize {
    1000
}

fn default_summary_fragments() -> usize {
    5
}

/// Article scanner settings for directory input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// File extensions treated as articles.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// File or directory names to skip.
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,

    /// Maximum article size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,

    /// Maximum number of articles per run.
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            excludes: default_excludes(),
            max_file_size: default_max_file_size(),
            max_articles: default_max_articles(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["txt", "md"].into_iter().map(String::from).collect()
}

fn default_excludes() -> Vec<String> {
    vec!["target", "node_modules", "drafts"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_max_file_size() -> usize {
    1024 * 1024 // 1MB
}

fn default_max_articles() -> usize {
    500
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title used for Markdown reports.
    #[serde(default = "default_title")]
    pub title: String,

    /// Number of least neutral articles listed in the summary.
    #[serde(default = "default_top_articles")]
    pub top_articles: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            top_articles: default_top_articles(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_title() -> String {
    "News Neutrality Report".to_string()
}

fn default_top_articles() -> usize {
    5
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from `dir/.newslens.toml`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// Only values the user actually passed override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(format) = args.format {
            self.general.format = format;
        }

        if let Some(threshold) = args.summary_threshold {
            self.pipeline.summary_threshold = threshold;
        }
        if let Some(fragments) = args.summary_fragments {
            self.pipeline.summary_fragments = fragments;
        }

        if let Some(ref extensions) = args.extensions {
            self.scanner.extensions = extensions.clone();
        }
        if let Some(max_articles) = args.max_articles {
            self.scanner.max_articles = max_articles;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
        if args.no_log {
            self.general.include_log = false;
        }
    }

    /// Check merged settings against the same ranges the CLI enforces.
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.summary_fragments == 0 {
            bail!("pipeline.summary_fragments must be at least 1");
        }

        if self.scanner.max_articles == 0 {
            bail!("scanner.max_articles must be at least 1");
        }

        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
