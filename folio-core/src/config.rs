//! Detector configuration
//!
//! The skip sets and filename patterns are explicit configuration passed
//! into the detector at construction, not process-global state.

use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

/// Configuration for structure detection and chapter discovery
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Directory names never traversed during discovery
    pub skip_directories: HashSet<String>,

    /// Files excluded from auto-detected chapter lists
    pub skip_files: HashSet<String>,

    /// Filename patterns whose first capture group is a chapter ordering key
    pub chapter_patterns: Vec<Regex>,

    /// Filenames treated as the introduction chapter (case-insensitive)
    pub introduction_names: Vec<String>,

    /// Extensions recognized as markdown content
    pub markdown_extensions: HashSet<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        let skip_directories = [
            "research",
            "drafts",
            "notes",
            "project-management",
            "background",
            "tasks",
            "archive",
            ".git",
            "node_modules",
            ".venv",
            "venv",
            "env",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let skip_files = [
            "CONTRIBUTING.md",
            "CHANGELOG.md",
            "LICENSE.md",
            "CODE_OF_CONDUCT.md",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let chapter_patterns = vec![
            Regex::new(r"^(\d+)[-_].+\.md$").unwrap(),
            Regex::new(r"(?i)^chapter[-_]?(\d+)").unwrap(),
            Regex::new(r"(?i)^ch(\d+)").unwrap(),
            Regex::new(r"(?i)^part[-_]?(\d+)").unwrap(),
        ];

        let introduction_names = vec!["README.md".to_string(), "index.md".to_string()];

        let markdown_extensions = ["md", "markdown", "mdown", "mkd"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        Self {
            skip_directories,
            skip_files,
            chapter_patterns,
            introduction_names,
            markdown_extensions,
        }
    }
}

impl DetectorConfig {
    /// Replace the skip-directory set
    pub fn with_skip_directories(mut self, directories: impl IntoIterator<Item = String>) -> Self {
        self.skip_directories = directories.into_iter().collect();
        self
    }

    /// Replace the skip-file set
    pub fn with_skip_files(mut self, files: impl IntoIterator<Item = String>) -> Self {
        self.skip_files = files.into_iter().collect();
        self
    }

    /// Replace the chapter filename patterns
    pub fn with_chapter_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.chapter_patterns = patterns;
        self
    }

    /// Replace the introduction filename set
    pub fn with_introduction_names(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.introduction_names = names.into_iter().collect();
        self
    }

    /// Whether a path has a recognized markdown extension
    pub fn is_markdown(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| self.markdown_extensions.contains(&e.to_ascii_lowercase()))
            .unwrap_or(false)
    }
}
