//! Error types for Folio Core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using DetectError
pub type Result<T> = std::result::Result<T, DetectError>;

/// Terminal errors for a detection run
#[derive(Debug, Error)]
pub enum DetectError {
    /// No recognizer, including auto-detection, produced any chapter
    #[error("no chapters found under {}", .root.display())]
    NoChaptersFound {
        root: PathBuf,
        /// First manifest error retained from a higher-priority recognizer
        #[source]
        source: Option<ManifestError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recognizer-local failures: a signature file exists but did not yield a
/// usable chapter list.
///
/// The orchestrator treats these as "this recognizer does not apply" and
/// falls through to the next one, retaining the first error in case every
/// recognizer ultimately fails. Distinct from a signature file being absent.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{}: no chapter links found", .path.display())]
    NoLinks { path: PathBuf },

    #[error("{}: no chapter references found", .path.display())]
    NoEntries { path: PathBuf },

    #[error("{}: missing or empty rmd_files list", .path.display())]
    NoRmdFiles { path: PathBuf },

    #[error("{}: no chapter files matched", .root.display())]
    NoChapters { root: PathBuf },

    #[error("{}: invalid YAML: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Frontmatter failures, recorded per file; they never abort a run
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// Opening delimiter present but the closing delimiter is missing
    #[error("unterminated frontmatter block")]
    Unterminated,

    #[error("invalid YAML in frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Per-chapter read failures; the chapter is excluded and the run continues
#[derive(Debug, Error)]
pub enum ChapterReadError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: not valid UTF-8", .path.display())]
    Encoding { path: PathBuf },
}
