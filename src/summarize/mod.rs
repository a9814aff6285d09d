pub mod llm;
pub mod prompt;

use crate::analyze::summarize_heuristic;
use crate::error::Result;
use crate::report::sanitize::clean_text;
use crate::types::config::{SummaryConfig, SummaryMode};

pub const SUMMARY_ERROR_PREFIX: &str = "Error generating summary";

/// Text-in, text-out summarization backend.
pub trait SummaryService {
    fn summarize(&self, prompt: &str) -> Result<String>;
}

/// Service-backed summary, cleaned for rendering. Failures come back as text
/// starting with [`SUMMARY_ERROR_PREFIX`] instead of an `Err`.
pub fn summarize_project(
    service: &dyn SummaryService,
    readme: &str,
    snippets: &str,
    snippet_chars: usize,
) -> String {
    let prompt = prompt::build_prompt(readme, snippets, snippet_chars);
    match service.summarize(&prompt) {
        Ok(reply) => clean_text(&reply),
        Err(e) => {
            tracing::warn!(error = %e, "summary service failed");
            format!("{SUMMARY_ERROR_PREFIX}: {e}")
        }
    }
}

pub fn is_summary_error(summary: &str) -> bool {
    summary.starts_with(SUMMARY_ERROR_PREFIX)
}

/// Selects the summarization path for a run.
pub enum Summarizer<'a> {
    Heuristic,
    Service {
        service: &'a dyn SummaryService,
        snippet_chars: usize,
    },
}

impl<'a> Summarizer<'a> {
    pub fn for_mode(
        mode: SummaryMode,
        service: Option<&'a dyn SummaryService>,
        config: &SummaryConfig,
    ) -> Self {
        match (mode, service) {
            (SummaryMode::Llm, Some(service)) => Summarizer::Service {
                service,
                snippet_chars: config.snippet_chars,
            },
            _ => Summarizer::Heuristic,
        }
    }

    pub fn is_heuristic(&self) -> bool {
        matches!(self, Summarizer::Heuristic)
    }

    pub fn summarize(&self, readme: &str, snippets: &str) -> String {
        match self {
            Summarizer::Heuristic => summarize_heuristic(readme).to_text(),
            Summarizer::Service {
                service,
                snippet_chars,
            } => summarize_project(*service, readme, snippets, *snippet_chars),
        }
    }
}
