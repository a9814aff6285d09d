use super::heuristic::list_item;
use super::tables::{
    BOILERPLATE_PHRASES, CODE_BLOCK_POINTS, DESCRIPTION_POINTS, HEADING_POINTS, KNOWN_LANGUAGES,
    LANGUAGE_POINTS, LENGTH_TIERS, LIST_POINTS, SCAFFOLD_HIT_THRESHOLD,
};
use crate::types::assessment::QualityAssessment;
use crate::types::repo::{ReadmeFetch, RepoMetadata};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadmeSignals {
    pub chars: usize,
    pub words: usize,
    pub has_headings: bool,
    pub has_code_blocks: bool,
    pub has_lists: bool,
    pub boilerplate_hits: usize,
    pub boilerplate_penalty: u32,
}

impl ReadmeSignals {
    pub fn detect(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let mut signals = ReadmeSignals {
            chars: text.trim().chars().count(),
            words: text.split_whitespace().count(),
            ..Default::default()
        };

        for line in text.lines() {
            let trimmed = line.trim_start();
            if is_heading(trimmed) {
                signals.has_headings = true;
            }
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                signals.has_code_blocks = true;
            }
            if list_item(trimmed).is_some_and(|item| !item.is_empty()) {
                signals.has_lists = true;
            }
        }
        if lowered.contains("<pre") {
            signals.has_code_blocks = true;
        }

        for (phrase, penalty) in BOILERPLATE_PHRASES {
            if lowered.contains(phrase) {
                signals.boilerplate_hits += 1;
                signals.boilerplate_penalty += penalty;
            }
        }
        signals
    }

    pub fn length_points(&self) -> u32 {
        LENGTH_TIERS
            .iter()
            .filter(|(min_chars, _)| self.chars >= *min_chars)
            .map(|(_, points)| *points)
            .max()
            .unwrap_or(0)
    }

    pub fn structure_points(&self) -> u32 {
        let mut points = 0;
        if self.has_headings {
            points += HEADING_POINTS;
        }
        if self.has_code_blocks {
            points += CODE_BLOCK_POINTS;
        }
        if self.has_lists {
            points += LIST_POINTS;
        }
        points
    }

    pub fn is_scaffold(&self) -> bool {
        self.boilerplate_hits >= SCAFFOLD_HIT_THRESHOLD
    }
}

fn is_heading(line: &str) -> bool {
    if let Some(rest) = line.strip_prefix('#') {
        let rest = rest.trim_start_matches('#');
        return rest.is_empty() || rest.starts_with(char::is_whitespace);
    }
    let lowered = line.get(..3).map(str::to_ascii_lowercase);
    matches!(
        lowered.as_deref(),
        Some("<h1" | "<h2" | "<h3" | "<h4" | "<h5" | "<h6")
    )
}

fn metadata_points(repo: &RepoMetadata) -> (u32, Vec<String>) {
    let mut points = 0;
    let mut notes = Vec::new();
    if repo.has_description() {
        points += DESCRIPTION_POINTS;
        notes.push("has description".to_string());
    }
    if let Some(language) = repo.language.as_deref() {
        let known = KNOWN_LANGUAGES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(language.trim()));
        if known {
            points += LANGUAGE_POINTS;
            notes.push(format!("language {}", language.trim()));
        }
    }
    (points, notes)
}

/// Score a README against `min_score`. Missing, empty and failed fetches
/// short-circuit to a zero score carrying the sentinel's description.
pub fn assess(readme: &ReadmeFetch, repo: &RepoMetadata, min_score: u32) -> QualityAssessment {
    let Some(text) = readme.content() else {
        return QualityAssessment::skipped(readme.skip_reason().unwrap_or_default());
    };

    let signals = ReadmeSignals::detect(text);
    let (meta_points, meta_notes) = metadata_points(repo);

    let raw = signals.length_points() + signals.structure_points() + meta_points;
    let score = if signals.is_scaffold() {
        0
    } else {
        raw.saturating_sub(signals.boilerplate_penalty)
    };

    let mut reasons = Vec::new();
    if signals.length_points() == 0 {
        reasons.push(format!("too short ({} words)", signals.words));
    } else {
        reasons.push(format!("{} words", signals.words));
    }
    reasons.push(structure_note(&signals));
    if signals.is_scaffold() {
        reasons.push("boilerplate detected (unmodified scaffold)".to_string());
    } else if signals.boilerplate_hits > 0 {
        reasons.push("boilerplate detected".to_string());
    }
    reasons.extend(meta_notes);

    tracing::debug!(
        repo = %repo.name,
        score,
        min_score,
        scaffold = signals.is_scaffold(),
        "assessed readme"
    );

    QualityAssessment {
        score,
        passed: score >= min_score,
        reason: reasons.join(", "),
    }
}

/// `assess` over raw fetch-step text, which may itself be a sentinel.
pub fn assess_text(readme: &str, repo: &RepoMetadata, min_score: u32) -> QualityAssessment {
    assess(&ReadmeFetch::from_text(readme), repo, min_score)
}

fn structure_note(signals: &ReadmeSignals) -> String {
    let present: Vec<&str> = [
        (signals.has_headings, "headings"),
        (signals.has_code_blocks, "code blocks"),
        (signals.has_lists, "lists"),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, name)| *name)
    .collect();

    match present.len() {
        0 => "no structure".to_string(),
        3 => "well-structured".to_string(),
        _ => format!("has {}", present.join(" and ")),
    }
}
