//! The root result type produced by structure detection

use super::{ChapterRef, Diagnostic};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Tag of which recognizer produced a structure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BookFormat {
    /// Root `SUMMARY.md` (mdBook convention)
    Mdbook,

    /// Root `SUMMARY.md` alongside a GitBook signature file
    Gitbook,

    /// `Book.txt` manifest
    Leanpub,

    /// `_bookdown.yml` manifest
    Bookdown,

    /// `book.toml` redirecting to `src/SUMMARY.md`
    TomlMdbook,

    /// No manifest; filename-pattern discovery
    Auto,
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            BookFormat::Mdbook => "mdbook",
            BookFormat::Gitbook => "gitbook",
            BookFormat::Leanpub => "leanpub",
            BookFormat::Bookdown => "bookdown",
            BookFormat::TomlMdbook => "toml-mdbook",
            BookFormat::Auto => "auto",
        };
        f.write_str(tag)
    }
}

/// The detected structure of a book directory
///
/// Constructed fresh on every detection run; chapter order is final and
/// defines reading order. A structure with zero chapters is never produced,
/// that case is reported as a detection failure instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookStructure {
    /// Recognizer that produced this structure
    pub format: BookFormat,

    /// Absolute path to the book root
    pub root_path: PathBuf,

    /// Resolved book title
    pub title: String,

    /// Book author, when the manifest declares one
    pub author: Option<String>,

    /// Chapters in reading order
    pub chapters: Vec<ChapterRef>,

    /// Non-fatal conditions encountered during detection
    pub diagnostics: Vec<Diagnostic>,
}

impl BookStructure {
    /// Get the introduction chapter, if one was identified
    pub fn introduction(&self) -> Option<&ChapterRef> {
        self.chapters.iter().find(|c| c.is_introduction)
    }

    /// Get a chapter by its 1-based sequence number
    pub fn chapter(&self, sequence_number: u32) -> Option<&ChapterRef> {
        self.chapters
            .iter()
            .find(|c| c.sequence_number == sequence_number)
    }

    /// Number of body chapters, excluding the introduction
    pub fn body_chapter_count(&self) -> usize {
        self.chapters.iter().filter(|c| !c.is_introduction).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags() {
        assert_eq!(BookFormat::TomlMdbook.to_string(), "toml-mdbook");
        assert_eq!(BookFormat::Auto.to_string(), "auto");

        let json = serde_json::to_string(&BookFormat::TomlMdbook).unwrap();
        assert_eq!(json, "\"toml-mdbook\"");
    }
}
