//! Chapter filename classification
//!
//! Works on bare filenames only. Ordering keys and introduction/auxiliary
//! classification feed both auto-detection and manifest normalization.

use crate::config::DetectorConfig;
use regex::Regex;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static LEADING_ORDINAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[-_.\s]*").unwrap());
static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]+").unwrap());

/// Sort position for files without any numeric ordering key; keeps them
/// after every numbered chapter.
const UNNUMBERED: u64 = u64::MAX;

/// Classifies bare filenames against a detector configuration
pub struct FilenameClassifier<'a> {
    config: &'a DetectorConfig,
}

impl<'a> FilenameClassifier<'a> {
    pub fn new(config: &'a DetectorConfig) -> Self {
        Self { config }
    }

    /// Whether `name` is an introduction candidate (`README.md`, `index.md`)
    pub fn is_introduction(&self, name: &str) -> bool {
        self.config
            .introduction_names
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(name))
    }

    /// Auxiliary files begin with `_` and are skipped during discovery
    pub fn is_auxiliary(name: &str) -> bool {
        name.starts_with('_')
    }

    /// Ordering key for a filename.
    ///
    /// The numeric component comes from the first matching configured
    /// chapter pattern, else the first run of digits anywhere in the name;
    /// files without digits take a sentinel that sorts after every numbered
    /// file. The second component is the lowercased full filename, which
    /// breaks ties between equal numeric keys.
    pub fn sort_key(&self, name: &str) -> (u64, String) {
        let number = self
            .config
            .chapter_patterns
            .iter()
            .find_map(|pattern| pattern.captures(name).and_then(|c| c.get(1)))
            .or_else(|| DIGIT_RUN.find(name))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(UNNUMBERED);
        (number, name.to_ascii_lowercase())
    }

    /// Title heuristic for a filename stem: strip the leading ordinal,
    /// break separator runs into spaces, title-case each word.
    pub fn title_from_stem(stem: &str) -> String {
        let stripped = LEADING_ORDINAL.replace(stem, "");
        let spaced = SEPARATOR_RUN.replace_all(&stripped, " ");
        let title = spaced
            .split_whitespace()
            .map(title_case_word)
            .collect::<Vec<_>>()
            .join(" ");
        if title.is_empty() {
            stem.to_string()
        } else {
            title
        }
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classifier_fixture() -> DetectorConfig {
        DetectorConfig::default()
    }

    #[test]
    fn numeric_keys_sort_numerically() {
        let config = classifier_fixture();
        let classifier = FilenameClassifier::new(&config);

        let mut names = vec!["10-c.md", "02-b.md", "01-a.md"];
        names.sort_by_cached_key(|n| classifier.sort_key(n));
        assert_eq!(names, vec!["01-a.md", "02-b.md", "10-c.md"]);
    }

    #[test]
    fn digits_anywhere_in_the_name_count() {
        let config = classifier_fixture();
        let classifier = FilenameClassifier::new(&config);

        assert_eq!(classifier.sort_key("chapter-01.md").0, 1);
        assert_eq!(classifier.sort_key("ch03-setup.md").0, 3);
        assert_eq!(classifier.sort_key("part_2.md").0, 2);
        assert_eq!(classifier.sort_key("appendix-b12.md").0, 12);
    }

    #[test]
    fn unnumbered_files_sort_last_by_name() {
        let config = classifier_fixture();
        let classifier = FilenameClassifier::new(&config);

        let mut names = vec!["zebra.md", "01-a.md", "apple.md"];
        names.sort_by_cached_key(|n| classifier.sort_key(n));
        assert_eq!(names, vec!["01-a.md", "apple.md", "zebra.md"]);
    }

    #[test]
    fn equal_keys_tie_break_on_full_name() {
        let config = classifier_fixture();
        let classifier = FilenameClassifier::new(&config);

        let mut names = vec!["01-zebra.md", "01-Apple.md"];
        names.sort_by_cached_key(|n| classifier.sort_key(n));
        assert_eq!(names, vec!["01-Apple.md", "01-zebra.md"]);
    }

    #[test]
    fn introduction_names_match_case_insensitively() {
        let config = classifier_fixture();
        let classifier = FilenameClassifier::new(&config);

        assert!(classifier.is_introduction("README.md"));
        assert!(classifier.is_introduction("readme.MD"));
        assert!(classifier.is_introduction("index.md"));
        assert!(!classifier.is_introduction("introduction.md"));
    }

    #[test]
    fn auxiliary_files_are_underscore_prefixed() {
        assert!(FilenameClassifier::is_auxiliary("_draft-notes.md"));
        assert!(!FilenameClassifier::is_auxiliary("draft-notes.md"));
    }

    #[test]
    fn title_heuristic() {
        assert_eq!(
            FilenameClassifier::title_from_stem("01-getting-started"),
            "Getting Started"
        );
        assert_eq!(
            FilenameClassifier::title_from_stem("advanced_topics"),
            "Advanced Topics"
        );
        assert_eq!(FilenameClassifier::title_from_stem("epilogue"), "Epilogue");
        // Nothing left after stripping the ordinal: fall back to the stem
        assert_eq!(FilenameClassifier::title_from_stem("07"), "07");
    }

    proptest! {
        #[test]
        fn numbered_always_sorts_before_unnumbered(
            n in 0u64..=9999,
            name in "[a-z]{1,12}",
        ) {
            let config = classifier_fixture();
            let classifier = FilenameClassifier::new(&config);
            let numbered = format!("{n:04}-{name}.md");
            let unnumbered = format!("{name}.md");
            prop_assert!(classifier.sort_key(&numbered) < classifier.sort_key(&unnumbered));
        }

        #[test]
        fn sort_key_is_deterministic(name in "[-_a-z0-9]{1,20}\\.md") {
            let config = classifier_fixture();
            let classifier = FilenameClassifier::new(&config);
            prop_assert_eq!(classifier.sort_key(&name), classifier.sort_key(&name));
        }
    }
}
