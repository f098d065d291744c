//! Structure detection orchestrator

use crate::config::DetectorConfig;
use crate::error::{DetectError, ManifestError, Result};
use crate::filename::FilenameClassifier;
use crate::recognizer::{recognizer_chain, Recognition, Recognizer};
use crate::resolver;
use crate::types::{BookStructure, Manifest};
use std::path::Path;
use tracing::{debug, warn};

/// Detects book structure by trying each recognizer in priority order.
///
/// Detection is a single pass: the first recognizer whose signature matches
/// and parses wins, partial results are never merged across recognizers,
/// and the chain is never re-entered. Each call is self-contained and
/// read-only on the filesystem.
pub struct StructureDetector {
    config: DetectorConfig,
    recognizers: Vec<Box<dyn Recognizer>>,
}

impl StructureDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            recognizers: recognizer_chain(),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Resolve `root` into an ordered chapter sequence.
    ///
    /// A recognizer-local failure falls through to the next recognizer;
    /// only the exhaustion of the whole chain, or a manifest whose every
    /// entry fails to resolve, is terminal.
    pub fn detect(&self, root: &Path) -> Result<BookStructure> {
        let root = root.canonicalize()?;
        let mut retained: Option<ManifestError> = None;

        for recognizer in &self.recognizers {
            match recognizer.recognize(&root, &self.config) {
                Recognition::NotApplicable => {
                    debug!(format = %recognizer.format(), "recognizer not applicable");
                }
                Recognition::Failed(error) => {
                    warn!(format = %recognizer.format(), %error, "recognizer failed; falling through");
                    retained.get_or_insert(error);
                }
                Recognition::Recognized(manifest) => {
                    debug!(
                        format = %manifest.format,
                        entries = manifest.entries.len(),
                        "manifest recognized"
                    );
                    return self.resolve(&root, manifest);
                }
            }
        }

        Err(DetectError::NoChaptersFound {
            root,
            source: retained,
        })
    }

    fn resolve(&self, root: &Path, manifest: Manifest) -> Result<BookStructure> {
        let format = manifest.format;
        let title = manifest.title.clone();
        let author = manifest.author.clone();
        let (chapters, diagnostics) = resolver::resolve_chapters(root, manifest);

        if chapters.is_empty() {
            // A manifest whose every entry failed to resolve is a failure,
            // not an empty-but-successful structure
            return Err(DetectError::NoChaptersFound {
                root: root.to_path_buf(),
                source: None,
            });
        }

        Ok(BookStructure {
            format,
            root_path: root.to_path_buf(),
            title: title.unwrap_or_else(|| default_title(root)),
            author,
            chapters,
            diagnostics,
        })
    }
}

impl Default for StructureDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

/// Detect with the default configuration
pub fn detect_structure(root: &Path) -> Result<BookStructure> {
    StructureDetector::default().detect(root)
}

/// Humanized directory basename, the title of last resort
fn default_title(root: &Path) -> String {
    let name = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("Untitled");
    FilenameClassifier::title_from_stem(name)
}
