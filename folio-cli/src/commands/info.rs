//! Info command implementation

use anyhow::{Context, Result};
use folio_core::{BookFormat, StructureDetector};
use serde::Serialize;

/// Book info output
#[derive(Serialize)]
struct BookInfo {
    title: String,
    author: Option<String>,
    format: BookFormat,
    root: String,
    chapters: usize,
    drafts: usize,
    warnings: usize,
}

/// Display information about a book directory
pub fn info(root: Option<&str>, json: bool) -> Result<()> {
    let root = super::book_root(root)?;

    let detector = StructureDetector::default();
    let book = detector
        .detect(&root)
        .with_context(|| format!("Failed to detect book structure under {}", root.display()))?;

    let info = BookInfo {
        title: book.title.clone(),
        author: book.author.clone(),
        format: book.format,
        root: book.root_path.display().to_string(),
        chapters: book.chapters.len(),
        drafts: book.chapters.iter().filter(|c| c.is_draft()).count(),
        warnings: book.diagnostics.len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Title:    {}", info.title);
        if let Some(author) = &info.author {
            println!("Author:   {}", author);
        }
        println!("Format:   {}", info.format);
        println!("Root:     {}", info.root);
        println!("Chapters: {}", info.chapters);
        if info.drafts > 0 {
            println!("Drafts:   {}", info.drafts);
        }
        if info.warnings > 0 {
            println!("Warnings: {}", info.warnings);
        }
    }

    Ok(())
}
