//! `Book.txt` recognizer (Leanpub convention)

use super::{Recognition, Recognizer};
use crate::config::DetectorConfig;
use crate::error::ManifestError;
use crate::filename::FilenameClassifier;
use crate::types::{BookFormat, Manifest, ManifestEntry};
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const BOOK_TXT: &str = "Book.txt";

const MANUSCRIPT_DIR: &str = "manuscript";

/// Section headers in `Book.txt`. Overall chapter order is always
/// frontmatter, mainmatter, backmatter, regardless of the order the
/// sections appear in the file; in-section line order is preserved.
const SECTION_HEADERS: [&str; 3] = ["frontmatter:", "mainmatter:", "backmatter:"];

/// Index into the section buckets for lines before any header
const MAINMATTER: usize = 1;

/// Recognizes a Leanpub `Book.txt` manifest at the book root
pub struct LeanpubRecognizer;

impl LeanpubRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LeanpubRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for LeanpubRecognizer {
    fn format(&self) -> BookFormat {
        BookFormat::Leanpub
    }

    fn recognize(&self, root: &Path, config: &DetectorConfig) -> Recognition {
        let book_txt = root.join(BOOK_TXT);
        if !book_txt.is_file() {
            return Recognition::NotApplicable;
        }
        let content = match fs::read_to_string(&book_txt) {
            Ok(content) => content,
            Err(source) => {
                return Recognition::Failed(ManifestError::Io {
                    path: book_txt,
                    source,
                })
            }
        };
        match parse_book_txt(root, &book_txt, &content, config) {
            Ok(manifest) => Recognition::Recognized(manifest),
            Err(error) => Recognition::Failed(error),
        }
    }
}

fn parse_book_txt(
    root: &Path,
    manifest_path: &Path,
    content: &str,
    config: &DetectorConfig,
) -> Result<Manifest, ManifestError> {
    let mut sections: [Vec<String>; 3] = Default::default();
    let mut current = MAINMATTER;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(index) = SECTION_HEADERS
            .iter()
            .position(|header| line.eq_ignore_ascii_case(header))
        {
            current = index;
            continue;
        }
        sections[current].push(line.to_string());
    }

    let classifier = FilenameClassifier::new(config);
    let mut manifest = Manifest::new(BookFormat::Leanpub);
    for reference in sections.iter().flatten() {
        let rel = resolve_reference(root, reference);
        let name = rel.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let mut entry = ManifestEntry::new(rel.clone());
        entry.is_introduction = classifier.is_introduction(name);
        manifest.push(entry);
    }

    if manifest.is_empty() {
        return Err(ManifestError::NoEntries {
            path: manifest_path.to_path_buf(),
        });
    }
    Ok(manifest)
}

/// References resolve against `manuscript/` when the file lives there,
/// falling back to the root-relative path verbatim.
fn resolve_reference(root: &Path, reference: &str) -> PathBuf {
    let in_manuscript = Path::new(MANUSCRIPT_DIR).join(reference);
    if root.join(&in_manuscript).is_file() {
        in_manuscript
    } else {
        PathBuf::from(reference)
    }
}
