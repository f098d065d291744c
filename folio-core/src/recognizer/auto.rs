//! Filename-pattern auto-detection, the fallback when no manifest exists

use super::{bookdown::BOOKDOWN_YML, leanpub::BOOK_TXT, summary::SUMMARY_FILE};
use super::{Recognition, Recognizer};
use crate::config::DetectorConfig;
use crate::error::ManifestError;
use crate::filename::FilenameClassifier;
use crate::types::{BookFormat, Manifest, ManifestEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Directory prefix for the chapter-directory layout
const CHAPTER_DIR_PREFIX: &str = "chapter-";

const CONTENT_DIR: &str = "content";

/// Stem suffixes that mark the preferred file when a chapter directory
/// holds several drafts of the same chapter, in priority order
const PREFERRED_SUFFIXES: &[&str] = &["complete", "enhanced", "revised", "final"];

/// A discovered chapter file with its ordering key
struct Candidate {
    path: PathBuf,
    key: (u64, String),
    is_introduction: bool,
}

/// Discovers chapters from filename patterns when no manifest applies.
///
/// Two layouts are supported: flat `*.md` files at the root, and one level
/// of `chapter-*` directories each contributing a single content file.
/// Deeper subtrees are never traversed.
pub struct AutoDetector;

impl AutoDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AutoDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for AutoDetector {
    fn format(&self) -> BookFormat {
        BookFormat::Auto
    }

    fn recognize(&self, root: &Path, config: &DetectorConfig) -> Recognition {
        match discover(root, config) {
            Ok(manifest) => Recognition::Recognized(manifest),
            Err(error) => Recognition::Failed(error),
        }
    }
}

fn discover(root: &Path, config: &DetectorConfig) -> Result<Manifest, ManifestError> {
    let classifier = FilenameClassifier::new(config);

    let mut candidates = chapter_directory_candidates(root, config, &classifier)?;
    let flat = flat_candidates(root, config, &classifier)?;
    if candidates.is_empty() {
        candidates = flat;
    } else {
        // Introduction files still live at the root in the directory layout
        candidates.extend(flat.into_iter().filter(|c| c.is_introduction));
    }

    // The first introduction candidate in enumeration order takes the front
    // slot; any others stay in the body and surface as a warning during
    // resolution.
    let front_index = candidates.iter().position(|c| c.is_introduction);
    let front = front_index.map(|index| candidates.remove(index));
    candidates.sort_by(|a, b| a.key.cmp(&b.key));

    let mut manifest = Manifest::new(BookFormat::Auto);
    if let Some(intro) = front {
        let mut entry = ManifestEntry::new(intro.path);
        entry.is_introduction = true;
        manifest.push(entry);
    }
    for candidate in candidates {
        let mut entry = ManifestEntry::new(candidate.path);
        entry.is_introduction = candidate.is_introduction;
        manifest.push(entry);
    }

    if manifest.is_empty() {
        return Err(ManifestError::NoChapters {
            root: root.to_path_buf(),
        });
    }
    Ok(manifest)
}

/// Flat layout: `*.md` at the root, non-recursive, in sorted name order so
/// detection is deterministic across platforms.
fn flat_candidates(
    root: &Path,
    config: &DetectorConfig,
    classifier: &FilenameClassifier<'_>,
) -> Result<Vec<Candidate>, ManifestError> {
    let names = markdown_names_in(root, config).map_err(|source| ManifestError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(names
        .into_iter()
        .filter(|name| !is_signature_file(name))
        .map(|name| Candidate {
            key: classifier.sort_key(&name),
            is_introduction: classifier.is_introduction(&name),
            path: PathBuf::from(name),
        })
        .collect())
}

/// Chapter-directory layout: one `chapter-*` directory per chapter, with
/// an optional `content/` subdirectory holding the working drafts. The
/// ordering key comes from the directory name.
fn chapter_directory_candidates(
    root: &Path,
    config: &DetectorConfig,
    classifier: &FilenameClassifier<'_>,
) -> Result<Vec<Candidate>, ManifestError> {
    let mut dir_names: Vec<String> = Vec::new();
    let entries = fs::read_dir(root).map_err(|source| ManifestError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| ManifestError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !name.starts_with(CHAPTER_DIR_PREFIX) || config.skip_directories.contains(&name) {
            continue;
        }
        dir_names.push(name);
    }
    dir_names.sort_by_key(|name| name.to_ascii_lowercase());

    let mut candidates = Vec::new();
    for dir_name in dir_names {
        if let Some(path) = pick_chapter_file(root, &dir_name, config) {
            candidates.push(Candidate {
                key: classifier.sort_key(&dir_name),
                is_introduction: false,
                path,
            });
        }
    }
    Ok(candidates)
}

/// The single content file for one chapter directory: `content/` drafts
/// take precedence over files directly in the directory.
fn pick_chapter_file(root: &Path, dir_name: &str, config: &DetectorConfig) -> Option<PathBuf> {
    let content_rel = Path::new(dir_name).join(CONTENT_DIR);
    if root.join(&content_rel).is_dir() {
        if let Some(best) = pick_best(&readable_names(&root.join(&content_rel), config)) {
            return Some(content_rel.join(best));
        }
    }
    let names = readable_names(&root.join(dir_name), config);
    let best = pick_best(&names)?;
    Some(Path::new(dir_name).join(best))
}

/// Draft suffixes win over plain files; otherwise the first name in sorted
/// order.
fn pick_best<'a>(names: &'a [String]) -> Option<&'a str> {
    for suffix in PREFERRED_SUFFIXES {
        let preferred = names.iter().find(|name| {
            Path::new(name)
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|stem| stem.to_ascii_lowercase().ends_with(suffix))
        });
        if let Some(name) = preferred {
            return Some(name);
        }
    }
    names.first().map(String::as_str)
}

/// Markdown filenames in one directory, sorted; a read failure inside a
/// chapter directory degrades to an empty list
fn readable_names(dir: &Path, config: &DetectorConfig) -> Vec<String> {
    match markdown_names_in(dir, config) {
        Ok(names) => names,
        Err(error) => {
            warn!(path = %dir.display(), %error, "skipping unreadable chapter directory");
            Vec::new()
        }
    }
}

fn markdown_names_in(dir: &Path, config: &DetectorConfig) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !config.is_markdown(&name)
            || FilenameClassifier::is_auxiliary(&name)
            || config.skip_files.contains(&name)
        {
            continue;
        }
        names.push(name);
    }
    names.sort_by_key(|name| name.to_ascii_lowercase());
    Ok(names)
}

/// Manifest signature files never count as chapters, even when no manifest
/// recognizer fired
fn is_signature_file(name: &str) -> bool {
    name.eq_ignore_ascii_case(SUMMARY_FILE)
        || name.eq_ignore_ascii_case(BOOK_TXT)
        || name.eq_ignore_ascii_case(BOOKDOWN_YML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn recognize(root: &Path) -> Recognition {
        AutoDetector::new().recognize(root, &DetectorConfig::default())
    }

    fn paths(manifest: &Manifest) -> Vec<String> {
        manifest
            .entries
            .iter()
            .map(|e| e.path.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn numeric_order_with_readme_first() {
        let dir = TempDir::new().unwrap();
        for name in ["README.md", "10-c.md", "01-a.md", "02-b.md"] {
            write(dir.path(), name, "text\n");
        }

        let Recognition::Recognized(manifest) = recognize(dir.path()) else {
            panic!("expected recognition");
        };
        assert_eq!(
            paths(&manifest),
            vec!["README.md", "01-a.md", "02-b.md", "10-c.md"]
        );
        assert!(manifest.entries[0].is_introduction);
    }

    #[test]
    fn auxiliary_and_skip_files_are_excluded() {
        let dir = TempDir::new().unwrap();
        for name in ["01-a.md", "_draft-notes.md", "CHANGELOG.md"] {
            write(dir.path(), name, "text\n");
        }

        let Recognition::Recognized(manifest) = recognize(dir.path()) else {
            panic!("expected recognition");
        };
        assert_eq!(paths(&manifest), vec!["01-a.md"]);
    }

    #[test]
    fn only_auxiliary_files_fails() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "_draft-notes.md", "text\n");

        let outcome = recognize(dir.path());
        assert!(matches!(
            outcome,
            Recognition::Failed(ManifestError::NoChapters { .. })
        ));
    }

    #[test]
    fn empty_directory_fails() {
        let dir = TempDir::new().unwrap();
        let outcome = recognize(dir.path());
        assert!(matches!(
            outcome,
            Recognition::Failed(ManifestError::NoChapters { .. })
        ));
    }

    #[test]
    fn chapter_directories_contribute_one_file_each() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "chapter-02/content/draft.md", "text\n");
        write(dir.path(), "chapter-02/content/draft-complete.md", "text\n");
        write(dir.path(), "chapter-01/opening.md", "text\n");
        write(dir.path(), "chapter-01/_scratch.md", "text\n");
        write(dir.path(), "README.md", "text\n");

        let Recognition::Recognized(manifest) = recognize(dir.path()) else {
            panic!("expected recognition");
        };
        assert_eq!(
            paths(&manifest),
            vec![
                "README.md",
                "chapter-01/opening.md",
                "chapter-02/content/draft-complete.md",
            ]
        );
    }

    #[test]
    fn chapter_directories_sort_numerically() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "chapter-10/ten.md", "text\n");
        write(dir.path(), "chapter-2/two.md", "text\n");

        let Recognition::Recognized(manifest) = recognize(dir.path()) else {
            panic!("expected recognition");
        };
        assert_eq!(
            paths(&manifest),
            vec!["chapter-2/two.md", "chapter-10/ten.md"]
        );
    }

    #[test]
    fn multiple_introduction_candidates_keep_first() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "README.md", "text\n");
        write(dir.path(), "index.md", "text\n");
        write(dir.path(), "01-a.md", "text\n");

        let Recognition::Recognized(manifest) = recognize(dir.path()) else {
            panic!("expected recognition");
        };
        // index.md sorts before README.md by name, so it wins the front
        // slot; README.md remains an introduction candidate in the body.
        assert_eq!(paths(&manifest), vec!["index.md", "01-a.md", "README.md"]);
        assert!(manifest.entries[0].is_introduction);
        assert!(manifest.entries[2].is_introduction);
    }
}
