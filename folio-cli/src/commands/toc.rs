//! Toc command implementation

use anyhow::{Context, Result};
use folio_core::StructureDetector;

/// Print the resolved reading order of a book directory
pub fn toc(root: Option<&str>) -> Result<()> {
    let root = super::book_root(root)?;

    let detector = StructureDetector::default();
    let book = detector
        .detect(&root)
        .with_context(|| format!("Failed to detect book structure under {}", root.display()))?;

    println!("{} [{}]", book.title, book.format);
    if let Some(author) = &book.author {
        println!("by {}", author);
    }
    println!();

    for chapter in &book.chapters {
        let mut flags = String::new();
        if chapter.is_introduction {
            flags.push_str(" [intro]");
        }
        if chapter.is_draft() {
            flags.push_str(" [draft]");
        }
        println!(
            "{:>3}. {}{}  ({})",
            chapter.sequence_number,
            chapter.title,
            flags,
            chapter.path.display()
        );
    }

    for diagnostic in &book.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    Ok(())
}
