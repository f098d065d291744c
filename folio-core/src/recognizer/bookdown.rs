//! `_bookdown.yml` recognizer (Bookdown convention)

use super::{Recognition, Recognizer};
use crate::config::DetectorConfig;
use crate::error::ManifestError;
use crate::filename::FilenameClassifier;
use crate::types::{BookFormat, Manifest, ManifestEntry};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const BOOKDOWN_YML: &str = "_bookdown.yml";

/// The subset of `_bookdown.yml` folio reads; every other key is ignored
#[derive(Debug, Deserialize)]
struct BookdownConfig {
    #[serde(default)]
    book_filename: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    rmd_files: Vec<String>,
}

/// Recognizes a Bookdown `_bookdown.yml` manifest at the book root
pub struct BookdownRecognizer;

impl BookdownRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BookdownRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for BookdownRecognizer {
    fn format(&self) -> BookFormat {
        BookFormat::Bookdown
    }

    fn recognize(&self, root: &Path, config: &DetectorConfig) -> Recognition {
        let path = root.join(BOOKDOWN_YML);
        if !path.is_file() {
            return Recognition::NotApplicable;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) => return Recognition::Failed(ManifestError::Io { path, source }),
        };
        let parsed: BookdownConfig = match serde_yaml::from_str(&content) {
            Ok(parsed) => parsed,
            Err(source) => return Recognition::Failed(ManifestError::Yaml { path, source }),
        };
        if parsed.rmd_files.is_empty() {
            return Recognition::Failed(ManifestError::NoRmdFiles { path });
        }

        let classifier = FilenameClassifier::new(config);
        let mut manifest = Manifest::new(BookFormat::Bookdown);
        manifest.title = parsed.book_filename.or(parsed.title);

        for reference in &parsed.rmd_files {
            let rel = resolve_reference(root, reference);
            let name = rel.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            let is_index = rel
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s.eq_ignore_ascii_case("index"));
            let mut entry = ManifestEntry::new(rel.clone());
            entry.is_introduction = is_index || classifier.is_introduction(name);
            manifest.push(entry);
        }

        Recognition::Recognized(manifest)
    }
}

/// Bookdown lists `.Rmd` sources; a rendered `.md` sibling substitutes when
/// the listed file is absent. Extensions other than `.md` are accepted
/// as-is otherwise.
fn resolve_reference(root: &Path, reference: &str) -> PathBuf {
    let rel = PathBuf::from(reference);
    if !root.join(&rel).is_file() {
        let sibling = rel.with_extension("md");
        if root.join(&sibling).is_file() {
            return sibling;
        }
    }
    rel
}
