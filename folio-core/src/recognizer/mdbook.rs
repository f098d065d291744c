//! `book.toml` recognizer (mdBook with `src/SUMMARY.md`)

use super::summary::{parse_summary, SUMMARY_FILE};
use super::{Recognition, Recognizer};
use crate::config::DetectorConfig;
use crate::error::ManifestError;
use crate::types::BookFormat;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

pub(crate) const BOOK_TOML: &str = "book.toml";

const SRC_DIR: &str = "src";

#[derive(Debug, Default, Deserialize)]
struct BookToml {
    #[serde(default)]
    book: BookSection,
}

#[derive(Debug, Default, Deserialize)]
struct BookSection {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
}

/// Recognizes `book.toml` at the book root, which redirects detection to
/// `src/SUMMARY.md`. Without that file this recognizer does not apply;
/// it never falls back to a root-level `SUMMARY.md`.
pub struct MdbookTomlRecognizer;

impl MdbookTomlRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MdbookTomlRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for MdbookTomlRecognizer {
    fn format(&self) -> BookFormat {
        BookFormat::TomlMdbook
    }

    fn recognize(&self, root: &Path, config: &DetectorConfig) -> Recognition {
        let toml_path = root.join(BOOK_TOML);
        if !toml_path.is_file() {
            return Recognition::NotApplicable;
        }

        let summary = root.join(SRC_DIR).join(SUMMARY_FILE);
        if !summary.is_file() {
            return Recognition::NotApplicable;
        }

        let mut manifest =
            match parse_summary(&summary, BookFormat::TomlMdbook, Path::new(SRC_DIR), config) {
                Ok(manifest) => manifest,
                Err(error) => return Recognition::Failed(error),
            };

        // Link targets are relative to src/; a target that only resolves
        // from the root keeps its root-relative form.
        for entry in &mut manifest.entries {
            if let Ok(stripped) = entry.path.strip_prefix(SRC_DIR) {
                if !root.join(&entry.path).is_file() && root.join(stripped).is_file() {
                    entry.path = stripped.to_path_buf();
                }
            }
        }

        if let Some((title, author)) = read_book_metadata(&toml_path) {
            manifest.title = title;
            manifest.author = author;
        }

        Recognition::Recognized(manifest)
    }
}

/// Title and first author from `[book]`. A parse failure degrades to no
/// metadata; the redirect to `src/SUMMARY.md` already happened.
fn read_book_metadata(path: &Path) -> Option<(Option<String>, Option<String>)> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) => {
            warn!(path = %path.display(), %error, "could not read book.toml");
            return None;
        }
    };
    match toml::from_str::<BookToml>(&content) {
        Ok(parsed) => Some((parsed.book.title, parsed.book.authors.into_iter().next())),
        Err(error) => {
            warn!(path = %path.display(), %error, "invalid book.toml; continuing without metadata");
            None
        }
    }
}
