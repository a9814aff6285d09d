//! Sequential fetch, score and summarize loop over a user's repositories.

use crate::analyze::assess;
use crate::error::{FolioError, Result};
use crate::source::RepoSource;
use crate::summarize::{is_summary_error, Summarizer};
use crate::types::assessment::QualityAssessment;
use crate::types::repo::{ReadmeFetch, RepoMetadata};
use crate::types::report::{ProjectEntry, RunStats};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Include,
    Skip,
    Quit,
}

/// Operator interaction during a run.
pub trait Prompt {
    fn confirm(&mut self, question: &str) -> Result<bool>;

    fn review(
        &mut self,
        repo: &RepoMetadata,
        assessment: Option<&QualityAssessment>,
    ) -> Result<ReviewDecision>;
}

pub fn parse_confirm(input: &str) -> bool {
    let normalized = input.trim().to_ascii_lowercase();
    normalized == "y" || normalized == "yes"
}

pub fn parse_review(input: &str) -> ReviewDecision {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => ReviewDecision::Include,
        "q" | "quit" => ReviewDecision::Quit,
        _ => ReviewDecision::Skip,
    }
}

/// Reads answers from a terminal-like reader.
pub struct StdinPrompt<R> {
    input: R,
}

impl StdinPrompt<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> StdinPrompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        print!("{question}");
        io::stdout().flush().map_err(FolioError::Io)?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(FolioError::Io)?;
        Ok((read > 0).then_some(line))
    }
}

impl<R: BufRead> Prompt for StdinPrompt<R> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{question} (y/N): "))?;
        Ok(answer.as_deref().map(parse_confirm).unwrap_or(false))
    }

    fn review(
        &mut self,
        repo: &RepoMetadata,
        assessment: Option<&QualityAssessment>,
    ) -> Result<ReviewDecision> {
        let detail = assessment
            .map(|assessment| format!(" (score {}: {})", assessment.score, assessment.reason))
            .unwrap_or_default();
        let answer = self.ask(&format!(
            "Include {}{detail}? [y]es/[n]o/[q]uit: ",
            repo.name
        ))?;
        Ok(answer
            .as_deref()
            .map(parse_review)
            .unwrap_or(ReviewDecision::Quit))
    }
}

/// Accepts everything without asking.
pub struct AutoApprove;

impl Prompt for AutoApprove {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(true)
    }

    fn review(
        &mut self,
        _repo: &RepoMetadata,
        _assessment: Option<&QualityAssessment>,
    ) -> Result<ReviewDecision> {
        Ok(ReviewDecision::Include)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub min_score: u32,
    pub quality_check: bool,
    pub review: bool,
    pub confirm_cost: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub projects: Vec<ProjectEntry>,
    pub stats: RunStats,
    pub cancelled: bool,
}

pub fn run(
    source: &dyn RepoSource,
    summarizer: &Summarizer<'_>,
    prompt: &mut dyn Prompt,
    options: PipelineOptions,
) -> Result<RunReport> {
    let repos = source.list_repositories()?;
    let mut report = RunReport::default();
    report.stats.repositories = repos.len();
    println!("Found {} repositories", repos.len());

    if repos.is_empty() {
        return Ok(report);
    }

    if !summarizer.is_heuristic() && options.confirm_cost {
        let question = format!("Continue with up to {} LLM calls?", repos.len());
        if !prompt.confirm(&question)? {
            println!("Operation cancelled by user.");
            report.cancelled = true;
            return Ok(report);
        }
    }

    let total = repos.len();
    for (index, repo) in repos.iter().enumerate() {
        println!("[{}/{}] {}", index + 1, total, repo.name);

        let fetch = source.get_readme(repo.owner_login(), &repo.name);
        let Some(readme) = fetch.content() else {
            println!("  skipped: {}", fetch.skip_reason().unwrap_or_default());
            continue;
        };
        report.stats.with_readme += 1;

        let assessment = if options.quality_check {
            let assessment = assess(&fetch, repo, options.min_score);
            if !assessment.passed {
                println!(
                    "  skipped: score {} < {} ({})",
                    assessment.score, options.min_score, assessment.reason
                );
                continue;
            }
            println!("  quality: score {} ({})", assessment.score, assessment.reason);
            report.stats.passed_quality += 1;
            Some(assessment)
        } else {
            None
        };

        if options.review {
            match prompt.review(repo, assessment.as_ref())? {
                ReviewDecision::Include => {}
                ReviewDecision::Skip => {
                    println!("  skipped: declined in review");
                    continue;
                }
                ReviewDecision::Quit => {
                    println!("Run aborted by operator.");
                    info!(processed = index, "run aborted during review");
                    report.cancelled = true;
                    return Ok(report);
                }
            }
        }

        let summary = summarizer.summarize(readme, "");
        if is_summary_error(&summary) {
            println!("  failed: {summary}");
            report.stats.failed += 1;
            continue;
        }
        debug!(repo = %repo.name, chars = summary.len(), "summary ready");
        println!("  summary generated");
        report.stats.summarized += 1;
        report.projects.push(ProjectEntry {
            title: repo.name.clone(),
            summary,
        });
    }

    println!(
        "Successfully processed {} out of {} repositories",
        report.stats.summarized,
        report.stats.attempted()
    );
    Ok(report)
}

#[derive(Debug, Clone)]
pub struct AssessedRepo {
    pub repo: RepoMetadata,
    pub readme: ReadmeFetch,
    pub assessment: QualityAssessment,
}

/// Fetch and score the first `limit` repositories without summarizing.
pub fn assess_only(
    source: &dyn RepoSource,
    limit: usize,
    min_score: u32,
) -> Result<Vec<AssessedRepo>> {
    let repos = source.list_repositories()?;
    Ok(repos
        .into_iter()
        .take(limit)
        .map(|repo| {
            let readme = source.get_readme(repo.owner_login(), &repo.name);
            let assessment = assess(&readme, &repo, min_score);
            AssessedRepo {
                repo,
                readme,
                assessment,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::SummaryService;
    use crate::types::config::{SummaryConfig, SummaryMode};
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::collections::VecDeque;

    const GOOD_README: &str = "# Tool\n\nA command-line tool that converts spreadsheets into tidy JSON documents for downstream analytics pipelines, with streaming support for very large inputs and helpful diagnostics.\n\n## Features\n\n- Streaming conversion\n- Schema inference\n- Helpful errors\n\n## Usage\n\n```sh\ntool convert data.xlsx\n```\n";

    struct FakeSource {
        repos: Vec<RepoMetadata>,
        readmes: HashMap<String, ReadmeFetch>,
    }

    impl FakeSource {
        fn new(entries: &[(&str, ReadmeFetch)]) -> Self {
            Self {
                repos: entries
                    .iter()
                    .map(|(name, _)| RepoMetadata {
                        name: name.to_string(),
                        description: Some("desc".to_string()),
                        language: Some("Rust".to_string()),
                        ..Default::default()
                    })
                    .collect(),
                readmes: entries
                    .iter()
                    .map(|(name, fetch)| (name.to_string(), fetch.clone()))
                    .collect(),
            }
        }
    }

    impl RepoSource for FakeSource {
        fn list_repositories(&self) -> Result<Vec<RepoMetadata>> {
            Ok(self.repos.clone())
        }

        fn get_readme(&self, _owner: &str, repo: &str) -> ReadmeFetch {
            self.readmes
                .get(repo)
                .cloned()
                .unwrap_or(ReadmeFetch::NotFound)
        }
    }

    struct CountingService {
        calls: Cell<usize>,
        fail_on: Option<usize>,
    }

    impl SummaryService for CountingService {
        fn summarize(&self, _prompt: &str) -> Result<String> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if self.fail_on == Some(call) {
                return Err(FolioError::Service("boom".to_string()));
            }
            Ok("**Project Overview:**\nGenerated.".to_string())
        }
    }

    struct Scripted {
        confirms: VecDeque<bool>,
        reviews: VecDeque<ReviewDecision>,
    }

    impl Prompt for Scripted {
        fn confirm(&mut self, _question: &str) -> Result<bool> {
            Ok(self.confirms.pop_front().unwrap_or(false))
        }

        fn review(
            &mut self,
            _repo: &RepoMetadata,
            _assessment: Option<&QualityAssessment>,
        ) -> Result<ReviewDecision> {
            Ok(self.reviews.pop_front().unwrap_or(ReviewDecision::Quit))
        }
    }

    fn options() -> PipelineOptions {
        PipelineOptions {
            min_score: 3,
            quality_check: true,
            review: false,
            confirm_cost: true,
        }
    }

    fn found(text: &str) -> ReadmeFetch {
        ReadmeFetch::Found(text.to_string())
    }

    #[test]
    fn heuristic_run_skips_missing_and_low_quality_readmes() {
        let source = FakeSource::new(&[
            ("good", found(GOOD_README)),
            ("missing", ReadmeFetch::NotFound),
            ("broken", ReadmeFetch::Error("Error fetching README: 500".to_string())),
            ("thin", found("wip")),
        ]);

        let report = run(&source, &Summarizer::Heuristic, &mut AutoApprove, options())
            .expect("run should succeed");

        assert!(!report.cancelled);
        assert_eq!(report.stats.repositories, 4);
        assert_eq!(report.stats.with_readme, 2);
        assert_eq!(report.stats.passed_quality, 1);
        assert_eq!(report.stats.summarized, 1);
        assert_eq!(report.projects.len(), 1);
        assert_eq!(report.projects[0].title, "good");
        assert!(report.projects[0].summary.contains("Streaming conversion"));
    }

    #[test]
    fn disabling_quality_check_keeps_thin_readmes() {
        let source = FakeSource::new(&[("thin", found("wip"))]);
        let mut opts = options();
        opts.quality_check = false;

        let report = run(&source, &Summarizer::Heuristic, &mut AutoApprove, opts)
            .expect("run should succeed");
        assert_eq!(report.stats.summarized, 1);
        assert_eq!(report.stats.with_readme, 1);
        assert_eq!(report.stats.passed_quality, 0);
    }

    #[test]
    fn service_failures_are_excluded_and_counted() {
        let source = FakeSource::new(&[("one", found(GOOD_README)), ("two", found(GOOD_README))]);
        let service = CountingService {
            calls: Cell::new(0),
            fail_on: Some(1),
        };
        let summarizer =
            Summarizer::for_mode(SummaryMode::Llm, Some(&service), &SummaryConfig::default());

        let report = run(&source, &summarizer, &mut AutoApprove, options())
            .expect("run should succeed");

        assert_eq!(service.calls.get(), 2);
        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.stats.summarized, 1);
        assert_eq!(report.projects[0].title, "two");
        assert!(report.stats.is_partial());
    }

    #[test]
    fn declined_cost_confirmation_makes_no_service_calls() {
        let source = FakeSource::new(&[("one", found(GOOD_README))]);
        let service = CountingService {
            calls: Cell::new(0),
            fail_on: None,
        };
        let summarizer =
            Summarizer::for_mode(SummaryMode::Llm, Some(&service), &SummaryConfig::default());
        let mut prompt = Scripted {
            confirms: VecDeque::from([false]),
            reviews: VecDeque::new(),
        };

        let report = run(&source, &summarizer, &mut prompt, options()).expect("run should succeed");
        assert!(report.cancelled);
        assert_eq!(service.calls.get(), 0);
        assert!(report.projects.is_empty());
    }

    #[test]
    fn quitting_review_aborts_remaining_repositories() {
        let source = FakeSource::new(&[
            ("one", found(GOOD_README)),
            ("two", found(GOOD_README)),
            ("three", found(GOOD_README)),
        ]);
        let mut prompt = Scripted {
            confirms: VecDeque::new(),
            reviews: VecDeque::from([ReviewDecision::Skip, ReviewDecision::Quit]),
        };
        let mut opts = options();
        opts.review = true;

        let report = run(&source, &Summarizer::Heuristic, &mut prompt, opts)
            .expect("run should succeed");
        assert!(report.cancelled);
        assert!(report.projects.is_empty());
        assert_eq!(report.stats.with_readme, 2);
    }

    #[test]
    fn assess_only_respects_limit() {
        let source = FakeSource::new(&[
            ("good", found(GOOD_README)),
            ("missing", ReadmeFetch::NotFound),
            ("later", found(GOOD_README)),
        ]);

        let rows = assess_only(&source, 2, 3).expect("assess should succeed");
        assert_eq!(rows.len(), 2);
        assert!(rows[0].assessment.passed);
        assert!(!rows[1].assessment.passed);
        assert_eq!(rows[1].assessment.reason, "No README found");
    }

    #[test]
    fn stdin_prompt_parses_answers() {
        let mut prompt = StdinPrompt::new("yes\nq\n".as_bytes());
        assert!(prompt.confirm("Continue?").expect("confirm should read"));
        let decision = prompt
            .review(&RepoMetadata::default(), None)
            .expect("review should read");
        assert_eq!(decision, ReviewDecision::Quit);

        let decision = prompt
            .review(&RepoMetadata::default(), None)
            .expect("review should read at eof");
        assert_eq!(decision, ReviewDecision::Quit);
        assert!(!prompt.confirm("Again?").expect("confirm should read at eof"));
    }

    #[test]
    fn answers_are_case_insensitive() {
        assert!(parse_confirm(" Y \n"));
        assert!(!parse_confirm("no"));
        assert_eq!(parse_review("YES"), ReviewDecision::Include);
        assert_eq!(parse_review("n"), ReviewDecision::Skip);
        assert_eq!(parse_review("Quit"), ReviewDecision::Quit);
    }
}
