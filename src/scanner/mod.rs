//! Article scanner for batch analysis.
//!
//! Discovers article files under a directory, respecting the configured
//! extensions, excludes, and size limits.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Configuration for article scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// File extensions to include (e.g., ["txt", "md"])
    pub extensions: Vec<String>,
    /// File or directory names to skip
    pub excludes: Vec<String>,
    /// Maximum file size in bytes
    pub max_file_size: usize,
    /// Maximum number of articles to return
    pub max_articles: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::from(&crate::config::ScannerConfig::default())
    }
}

impl From<&crate::config::ScannerConfig> for ScanConfig {
    fn from(config: &crate::config::ScannerConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            excludes: config.excludes.clone(),
            max_file_size: config.max_file_size,
            max_articles: Some(config.max_articles),
        }
    }
}

/// A discovered article file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedArticle {
    /// Path relative to the scan root
    pub path: String,
    /// Absolute or root-joined path for reading
    pub full_path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

/// Scanner for discovering article files.
pub struct ArticleScanner {
    config: ScanConfig,
    root: PathBuf,
}

impl ArticleScanner {
    /// Create a new article scanner.
    pub fn new(root: PathBuf, config: ScanConfig) -> Self {
        Self { config, root }
    }

    /// Scan for all matching articles, sorted by path.
    pub fn scan(&self) -> Result<Vec<ScannedArticle>> {
        let mut articles = Vec::new();

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded_entry(entry));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.matches(entry.path()) {
                continue;
            }

            if let Some(max) = self.config.max_articles {
                if articles.len() >= max {
                    debug!("Reached article limit of {}", max);
                    break;
                }
            }

            let size = entry
                .metadata()
                .with_context(|| format!("Failed to stat {}", entry.path().display()))?
                .len();
            let rel_path = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path());

            articles.push(ScannedArticle {
                path: rel_path.to_string_lossy().to_string(),
                full_path: entry.path().to_path_buf(),
                size,
            });
        }

        Ok(articles)
    }

    /// Check if a file matches scan criteria.
    pub fn matches(&self, path: &Path) -> bool {
        // Check extension
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !self
            .config
            .extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        {
            return false;
        }

        // Check file size
        match fs::metadata(path) {
            Ok(metadata) => metadata.len() <= self.config.max_file_size as u64,
            Err(_) => false,
        }
    }

    /// Check if an entry is hidden or explicitly excluded.
    fn is_excluded_entry(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();

        // Hidden files
        if name.starts_with('.') {
            return true;
        }

        self.config.excludes.iter().any(|pattern| name == pattern.as_str())
    }
}
