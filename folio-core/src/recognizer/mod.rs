//! Format recognizers for book manifests
//!
//! Recognizers are tried in a fixed priority order; the first structural
//! match wins. A recognizer that finds its signature file but cannot
//! extract a chapter list fails locally, which is distinct from not
//! applying at all: the orchestrator falls through in both cases but only
//! the former is retained for error reporting.

mod auto;
mod bookdown;
mod leanpub;
mod mdbook;
mod summary;

pub use auto::AutoDetector;
pub use bookdown::BookdownRecognizer;
pub use leanpub::LeanpubRecognizer;
pub use mdbook::MdbookTomlRecognizer;
pub use summary::SummaryRecognizer;

use crate::config::DetectorConfig;
use crate::error::ManifestError;
use crate::types::{BookFormat, Manifest};
use std::path::Path;

/// Outcome of one recognizer attempt
#[derive(Debug)]
pub enum Recognition {
    /// Signature matched and yielded an ordered chapter list
    Recognized(Manifest),

    /// Signature file absent; try the next recognizer
    NotApplicable,

    /// Signature file present but unusable; try the next recognizer,
    /// retaining the error in case every recognizer fails
    Failed(ManifestError),
}

/// A strategy that detects one manifest convention
pub trait Recognizer: Send + Sync {
    /// Format tag reported when this recognizer wins
    fn format(&self) -> BookFormat;

    /// Inspect `root` for this recognizer's signature
    fn recognize(&self, root: &Path, config: &DetectorConfig) -> Recognition;
}

/// The fixed priority chain: `SUMMARY.md`, `Book.txt`, `_bookdown.yml`,
/// `book.toml`, then filename auto-detection.
pub fn recognizer_chain() -> Vec<Box<dyn Recognizer>> {
    vec![
        Box::new(SummaryRecognizer::new()),
        Box::new(LeanpubRecognizer::new()),
        Box::new(BookdownRecognizer::new()),
        Box::new(MdbookTomlRecognizer::new()),
        Box::new(AutoDetector::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_priority_order() {
        let chain = recognizer_chain();
        let formats: Vec<BookFormat> = chain.iter().map(|r| r.format()).collect();
        assert_eq!(
            formats,
            vec![
                BookFormat::Mdbook,
                BookFormat::Leanpub,
                BookFormat::Bookdown,
                BookFormat::TomlMdbook,
                BookFormat::Auto,
            ]
        );
    }
}
