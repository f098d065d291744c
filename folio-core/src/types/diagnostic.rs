//! Non-fatal conditions surfaced alongside a detection result

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// A warning-level condition recorded during detection
///
/// Diagnostics never abort a run; the caller decides whether to display
/// them. Paths are relative to the book root.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum Diagnostic {
    /// More than one file qualified as the introduction
    #[error(
        "multiple introduction candidates: kept {}, ignored {}",
        .kept.display(),
        .ignored.display()
    )]
    MultipleIntroductions { kept: PathBuf, ignored: PathBuf },

    /// A chapter file could not be read and was excluded from the sequence
    #[error("could not read chapter {}: {reason}", .path.display())]
    UnreadableChapter { path: PathBuf, reason: String },

    /// A frontmatter block could not be parsed; the raw file was used
    #[error("malformed frontmatter in {}: {reason}", .path.display())]
    MalformedFrontmatter { path: PathBuf, reason: String },
}
