//! Chapter reference and frontmatter metadata types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single chapter in the resolved reading order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChapterRef {
    /// File path, relative to the book root
    pub path: PathBuf,

    /// 1-based position in the final order; contiguous, no gaps
    pub sequence_number: u32,

    /// Resolved display title
    pub title: String,

    /// True for at most one chapter, the conventional front entry
    pub is_introduction: bool,

    /// Metadata parsed from the file's frontmatter block
    pub frontmatter: Frontmatter,
}

impl ChapterRef {
    /// Create a chapter reference with no metadata
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sequence_number: 0,
            title: title.into(),
            is_introduction: false,
            frontmatter: Frontmatter::default(),
        }
    }

    /// Whether the chapter declared `draft: true`
    pub fn is_draft(&self) -> bool {
        self.frontmatter.draft == Some(true)
    }
}

/// Metadata parsed from a chapter's frontmatter block
///
/// Every field is optional: absence means the key was not declared, which
/// is distinct from a declared-but-false or declared-but-empty value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Frontmatter {
    pub title: Option<String>,

    pub author: Option<String>,

    /// Stored verbatim; never validated as a date
    pub date: Option<String>,

    pub chapter: Option<i64>,

    pub draft: Option<bool>,

    /// Unrecognized keys, preserved but not interpreted
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Frontmatter {
    /// Whether no keys at all were declared
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.date.is_none()
            && self.chapter.is_none()
            && self.draft.is_none()
            && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_unset_is_not_draft() {
        let chapter = ChapterRef::new("01-intro.md", "Intro");
        assert_eq!(chapter.frontmatter.draft, None);
        assert!(!chapter.is_draft());
    }

    #[test]
    fn test_frontmatter_is_empty() {
        let mut meta = Frontmatter::default();
        assert!(meta.is_empty());
        meta.draft = Some(false);
        assert!(!meta.is_empty());
    }
}
