//! `SUMMARY.md` recognizer (mdBook and GitBook conventions)

use super::{Recognition, Recognizer};
use crate::config::DetectorConfig;
use crate::error::ManifestError;
use crate::filename::FilenameClassifier;
use crate::types::{BookFormat, Manifest, ManifestEntry};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const SUMMARY_FILE: &str = "SUMMARY.md";

/// Signature files that mark a root `SUMMARY.md` as GitBook rather than
/// mdBook; detection behavior is identical either way.
const GITBOOK_SIGNATURES: &[&str] = &["book.json", ".gitbook.yaml"];

/// Recognizes a `SUMMARY.md` manifest at the book root
pub struct SummaryRecognizer;

impl SummaryRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SummaryRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for SummaryRecognizer {
    fn format(&self) -> BookFormat {
        BookFormat::Mdbook
    }

    fn recognize(&self, root: &Path, config: &DetectorConfig) -> Recognition {
        let summary = root.join(SUMMARY_FILE);
        if !summary.is_file() {
            return Recognition::NotApplicable;
        }

        let format = if GITBOOK_SIGNATURES.iter().any(|s| root.join(s).is_file()) {
            BookFormat::Gitbook
        } else {
            BookFormat::Mdbook
        };

        match parse_summary(&summary, format, Path::new(""), config) {
            Ok(manifest) => Recognition::Recognized(manifest),
            Err(error) => Recognition::Failed(error),
        }
    }
}

/// Parse a `SUMMARY.md` bullet list into an ordered manifest.
///
/// Chapter order is link order of first appearance, top to bottom; list
/// nesting depth is kept as a hierarchy hint only and never reorders the
/// flat sequence. `prefix` rebases link targets when the summary lives
/// under `src/`.
pub(crate) fn parse_summary(
    summary_path: &Path,
    format: BookFormat,
    prefix: &Path,
    config: &DetectorConfig,
) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(summary_path).map_err(|source| ManifestError::Io {
        path: summary_path.to_path_buf(),
        source,
    })?;

    let classifier = FilenameClassifier::new(config);
    let mut manifest = Manifest::new(format);
    let mut seen: HashSet<PathBuf> = HashSet::new();

    let mut list_depth: u32 = 0;
    // Target and label of the link currently being walked
    let mut link: Option<(String, String)> = None;

    for event in Parser::new(&content) {
        match event {
            Event::Start(Tag::List(_)) => list_depth += 1,
            Event::End(TagEnd::List(_)) => list_depth = list_depth.saturating_sub(1),
            Event::Start(Tag::Link { dest_url, .. }) => {
                link = Some((dest_url.to_string(), String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, label)) = link.as_mut() {
                    label.push_str(&text);
                }
            }
            Event::End(TagEnd::Link) => {
                let Some((target, label)) = link.take() else {
                    continue;
                };
                let target = normalize_target(&target);
                // External links and draft placeholders are not chapters
                if target.is_empty() || target.contains("://") || !config.is_markdown(target) {
                    continue;
                }
                let rel = prefix.join(target);
                if !seen.insert(rel.clone()) {
                    continue;
                }

                let name = rel.file_name().and_then(|n| n.to_str()).unwrap_or_default();
                let mut entry = ManifestEntry::new(rel.clone())
                    .with_depth(list_depth.saturating_sub(1));
                entry.is_introduction = classifier.is_introduction(name);
                let label = label.trim();
                if !label.is_empty() {
                    entry.label = Some(label.to_string());
                }
                manifest.push(entry);
            }
            _ => {}
        }
    }

    if manifest.is_empty() {
        return Err(ManifestError::NoLinks {
            path: summary_path.to_path_buf(),
        });
    }
    Ok(manifest)
}

/// Strip a fragment anchor and a leading `./` from a link target
fn normalize_target(target: &str) -> &str {
    let target = target.split('#').next().unwrap_or(target);
    target.strip_prefix("./").unwrap_or(target)
}
