//! Chapter resolution: raw manifest entries to final chapter records

use crate::error::{ChapterReadError, FrontmatterError};
use crate::filename::FilenameClassifier;
use crate::frontmatter;
use crate::types::{ChapterRef, Diagnostic, Frontmatter, Manifest, ManifestEntry};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Read one chapter file: content with the frontmatter block stripped, plus
/// the parsed metadata. Malformed frontmatter degrades to the raw content.
pub fn read_chapter(path: &Path) -> Result<(String, Frontmatter), ChapterReadError> {
    let (content, meta, malformed) = load(path)?;
    if let Some(error) = malformed {
        warn!(path = %path.display(), %error, "malformed frontmatter; using raw content");
    }
    Ok((content, meta))
}

/// Resolve manifest entries into the final ordered chapter sequence.
///
/// Unreadable entries are excluded and the survivors renumbered
/// contiguously; every degradation is recorded as a diagnostic rather than
/// aborting the run. At most one chapter keeps the introduction flag.
pub fn resolve_chapters(root: &Path, manifest: Manifest) -> (Vec<ChapterRef>, Vec<Diagnostic>) {
    let mut chapters = Vec::with_capacity(manifest.entries.len());
    let mut diagnostics = Vec::new();
    let mut introduction: Option<PathBuf> = None;

    for entry in manifest.entries {
        let absolute = root.join(&entry.path);
        let (content, meta) = match load(&absolute) {
            Ok((content, meta, malformed)) => {
                if let Some(error) = malformed {
                    diagnostics.push(Diagnostic::MalformedFrontmatter {
                        path: entry.path.clone(),
                        reason: error.to_string(),
                    });
                }
                (content, meta)
            }
            Err(error) => {
                warn!(path = %absolute.display(), %error, "excluding unreadable chapter");
                diagnostics.push(Diagnostic::UnreadableChapter {
                    path: entry.path.clone(),
                    reason: error.to_string(),
                });
                continue;
            }
        };

        let mut is_introduction = false;
        if entry.is_introduction {
            match introduction.clone() {
                None => {
                    introduction = Some(entry.path.clone());
                    is_introduction = true;
                }
                Some(kept) => diagnostics.push(Diagnostic::MultipleIntroductions {
                    kept,
                    ignored: entry.path.clone(),
                }),
            }
        }

        let title = resolve_title(&entry, &meta, &content);
        chapters.push(ChapterRef {
            path: entry.path,
            sequence_number: 0, // assigned below, after exclusions
            title,
            is_introduction,
            frontmatter: meta,
        });
    }

    for (index, chapter) in chapters.iter_mut().enumerate() {
        chapter.sequence_number = index as u32 + 1;
    }

    (chapters, diagnostics)
}

fn load(path: &Path) -> Result<(String, Frontmatter, Option<FrontmatterError>), ChapterReadError> {
    let raw = read_file(path)?;
    match frontmatter::parse(&raw) {
        Ok((meta, rest)) => Ok((rest.to_string(), meta, None)),
        Err(error) => Ok((raw, Frontmatter::default(), Some(error))),
    }
}

fn read_file(path: &Path) -> Result<String, ChapterReadError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::InvalidData => ChapterReadError::Encoding {
            path: path.to_path_buf(),
        },
        _ => ChapterReadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Title precedence: frontmatter, manifest label, first heading, filename
fn resolve_title(entry: &ManifestEntry, meta: &Frontmatter, content: &str) -> String {
    if let Some(title) = &meta.title {
        return title.clone();
    }
    if let Some(label) = &entry.label {
        return label.clone();
    }
    if let Some(heading) = first_heading(content) {
        return heading;
    }
    let stem = entry
        .path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled");
    FilenameClassifier::title_from_stem(stem)
}

/// Text of the first level-1 heading, the conventional in-file title
fn first_heading(content: &str) -> Option<String> {
    let mut inside = false;
    let mut text = String::new();
    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => inside = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if inside => {
                let trimmed = text.trim();
                return (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            Event::Text(t) | Event::Code(t) if inside => text.push_str(&t),
            _ => {}
        }
    }
    None
}
