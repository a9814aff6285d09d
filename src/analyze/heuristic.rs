//! Offline summarization from README text alone.

use super::tables::{MAX_TECHNOLOGIES, TECH_KEYWORDS};
use crate::types::summary::ProjectSummary;
use std::collections::BTreeSet;

pub const OVERVIEW_MIN_CHARS: usize = 40;
pub const MAX_FEATURES: usize = 5;

pub const OVERVIEW_FALLBACK: &str =
    "This project is documented in its repository README; see the source for full details.";
pub const IMPACT_TEXT: &str =
    "Demonstrates practical software engineering and provides a reusable foundation for similar work.";

pub fn summarize_heuristic(readme: &str) -> ProjectSummary {
    let text = normalize_line_endings(readme);
    ProjectSummary {
        overview: extract_overview(&text).unwrap_or_else(|| OVERVIEW_FALLBACK.to_string()),
        features: extract_features(&text),
        technologies: detect_technologies(&text),
        impact: IMPACT_TEXT.to_string(),
    }
}

pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Item text of a bullet (`-`, `*`, `+`) or numbered (`12.`) list line.
pub fn list_item(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let mut chars = line.char_indices();
    let (_, first) = chars.next()?;

    let marker_end = if matches!(first, '-' | '*' | '+') {
        first.len_utf8()
    } else if first.is_ascii_digit() {
        let digits = line
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(line.len());
        if !line[digits..].starts_with('.') {
            return None;
        }
        digits + 1
    } else {
        return None;
    };

    let rest = &line[marker_end..];
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn extract_overview(text: &str) -> Option<String> {
    paragraphs(text)
        .into_iter()
        .find(|paragraph| paragraph.trim().chars().count() > OVERVIEW_MIN_CHARS)
        .and_then(|paragraph| {
            paragraph
                .trim()
                .lines()
                .next()
                .map(|line| strip_emphasis(line.trim()))
        })
}

fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join("\n"));
    }
    out
}

fn extract_features(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(list_item)
        .map(strip_emphasis)
        .filter(|item| !item.is_empty())
        .take(MAX_FEATURES)
        .collect()
}

/// Drop bold markers (`**`, `__`) so extracted text cannot be mistaken for
/// section headers once it lands in `**`-delimited summary text.
pub fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace("__", "").trim().to_string()
}

/// Vocabulary hits, deduplicated and sorted. A needle only counts when it is
/// not glued to surrounding letters or digits.
pub fn detect_technologies(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    let found: BTreeSet<&str> = TECH_KEYWORDS
        .iter()
        .filter(|(needle, _)| contains_term(&haystack, needle))
        .map(|(_, label)| *label)
        .collect();
    found
        .into_iter()
        .take(MAX_TECHNOLOGIES)
        .map(str::to_string)
        .collect()
}

pub(crate) fn contains_term(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_readme_falls_back_everywhere() {
        let summary = summarize_heuristic("");
        assert_eq!(summary.overview, OVERVIEW_FALLBACK);
        assert!(summary.features.is_empty());
        assert_eq!(summary.technologies_line(), "Not specified");
        assert_eq!(summary.impact, IMPACT_TEXT);
    }

    #[test]
    fn whitespace_only_readme_falls_back() {
        let summary = summarize_heuristic("   \n\n\t\n");
        assert_eq!(summary.overview, OVERVIEW_FALLBACK);
        assert!(summary.features.is_empty());
        assert!(summary.technologies.is_empty());
    }

    #[test]
    fn bullet_lines_become_features_in_order() {
        let summary = summarize_heuristic(
            "Intro paragraph here that is long enough to qualify.\n\n- First\n- Second\n- Third",
        );
        assert_eq!(
            summary.overview,
            "Intro paragraph here that is long enough to qualify."
        );
        assert_eq!(summary.features, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn features_are_capped_and_accept_all_markers() {
        let readme = "* one\n+ two\n1. three\n12. four\n- five\n- six\n";
        let summary = summarize_heuristic(readme);
        assert_eq!(summary.features, vec!["one", "two", "three", "four", "five"]);
    }

    #[test]
    fn non_list_lines_are_ignored() {
        assert_eq!(list_item("---"), None);
        assert_eq!(list_item("**bold** text"), None);
        assert_eq!(list_item("2024. was a year"), Some("was a year"));
        assert_eq!(list_item("1.5 million"), None);
        assert_eq!(list_item("  - nested"), Some("nested"));
    }

    #[test]
    fn overview_takes_first_line_of_first_long_paragraph() {
        let readme = "# Tool\n\nShort.\n\nThis paragraph is definitely long enough to be chosen\nand it continues here.";
        let summary = summarize_heuristic(readme);
        assert_eq!(
            summary.overview,
            "This paragraph is definitely long enough to be chosen"
        );
    }

    #[test]
    fn crlf_line_endings_are_normalized() {
        let summary = summarize_heuristic(
            "A description that is comfortably longer than forty characters.\r\n\r\n- Alpha\r\n- Beta",
        );
        assert_eq!(summary.features, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn technology_detection_is_case_insensitive_and_deduplicated() {
        let summary = summarize_heuristic("Built with Python.\n\nScripts use python 3 and Docker.");
        assert_eq!(
            summary
                .technologies
                .iter()
                .filter(|tech| tech.as_str() == "python")
                .count(),
            1
        );
        assert_eq!(summary.technologies, vec!["docker", "python"]);
    }

    #[test]
    fn technology_detection_respects_word_boundaries() {
        let technologies = detect_technologies("This was bootstrapped by a JavaScript developer.");
        assert_eq!(technologies, vec!["javascript"]);
    }

    #[test]
    fn technology_aliases_collapse_to_one_label() {
        let technologies = detect_technologies("Runs on Node.js (nodejs >= 18).");
        assert_eq!(technologies, vec!["node.js"]);
    }

    #[test]
    fn bold_feature_labels_are_unwrapped() {
        let summary = summarize_heuristic(
            "A command-line tool that converts spreadsheets into JSON documents.\n\n\
             - **Streaming:** handles huge files\n- __Schemas:__ infers types\n",
        );
        assert_eq!(
            summary.features,
            vec!["Streaming: handles huge files", "Schemas: infers types"]
        );
        assert!(!summary.to_text().contains("* **"));
    }

    #[test]
    fn bold_overview_is_unwrapped() {
        let summary =
            summarize_heuristic("**Ledger** keeps plain-text journals and prints balance reports.");
        assert_eq!(
            summary.overview,
            "Ledger keeps plain-text journals and prints balance reports."
        );
    }

    #[test]
    fn technologies_are_capped() {
        let readme = "python rust java kotlin swift ruby php scala dart html css react vue docker redis";
        assert_eq!(detect_technologies(readme).len(), MAX_TECHNOLOGIES);
    }
}
