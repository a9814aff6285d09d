mod analyze;
mod cli;
mod config;
mod error;
mod pipeline;
mod report;
mod source;
mod summarize;
mod types;

use crate::analyze::inventory::{truncate_description, InventoryStats};
use crate::error::FolioError;
use crate::pipeline::{AutoApprove, PipelineOptions, Prompt, StdinPrompt};
use crate::source::github::GitHubClient;
use crate::source::RepoSource;
use crate::summarize::llm::LlmClient;
use crate::summarize::{Summarizer, SummaryService};
use crate::types::assessment::AssessmentTally;
use crate::types::config::{FolioConfig, SummaryMode, DEFAULT_OUTPUT_PATH};
use crate::types::repo::RepoMetadata;
use crate::types::report::Portfolio;
use chrono::{DateTime, Local};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const PARTIAL: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn github_client(cfg: &FolioConfig, user: Option<String>) -> Result<GitHubClient, FolioError> {
    let token = config::require_env(config::GITHUB_TOKEN_ENV)?;
    let mut github = cfg.github.clone();
    if user.is_some() {
        github.user = user;
    }
    Ok(GitHubClient::new(&github, token))
}

fn read_readme(path: &Path) -> Result<String, FolioError> {
    if !path.exists() {
        return Err(FolioError::PathNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// The stock output name follows the chosen format; a configured path is kept.
fn default_output(configured: &str, format: report::OutputFormat) -> PathBuf {
    let mut path = PathBuf::from(configured);
    if configured == DEFAULT_OUTPUT_PATH {
        path.set_extension(format.extension());
    }
    path
}

fn generate(cmd: cli::GenerateCommand, mut cfg: FolioConfig) -> Result<i32, FolioError> {
    if let Some(mode) = cmd.mode {
        cfg.summary.mode = mode.into();
    }
    if let Some(min_score) = cmd.min_score {
        cfg.quality.min_score = min_score;
    }
    if let Some(format) = cmd.format {
        cfg.output.format = format.into();
    }
    let format = report::OutputFormat::from(cfg.output.format);
    let output = cmd
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cfg.output.path, format));

    let source = github_client(&cfg, cmd.user.clone())?;
    let llm = match cfg.summary.mode {
        SummaryMode::Llm => Some(LlmClient::from_env(&cfg.summary)?),
        SummaryMode::Heuristic => None,
    };
    if let Some(client) = &llm {
        tracing::info!(model = client.model(), "summarizing with language model");
    }

    println!("Running preflight render check...");
    let size = report::preflight(&output, format)?;
    println!("Preflight passed ({size} bytes)");

    let summarizer = Summarizer::for_mode(
        cfg.summary.mode,
        llm.as_ref().map(|client| client as &dyn SummaryService),
        &cfg.summary,
    );
    let options = PipelineOptions {
        min_score: cfg.quality.min_score,
        quality_check: cfg.quality.enabled && !cmd.no_quality_check,
        review: cmd.review,
        confirm_cost: !cmd.yes,
    };

    let mut auto = AutoApprove;
    let mut interactive = StdinPrompt::stdin();
    let prompt: &mut dyn Prompt = if cmd.yes && !cmd.review {
        &mut auto
    } else {
        &mut interactive
    };

    let run = pipeline::run(&source, &summarizer, prompt, options)?;
    if run.cancelled {
        return Ok(exit_code::SUCCESS);
    }
    if run.projects.is_empty() {
        println!("No projects were successfully processed.");
        return Ok(exit_code::PARTIAL);
    }

    let portfolio = Portfolio {
        title: cfg.output.title.clone(),
        projects: run.projects,
    };
    let written = report::write_portfolio(&portfolio, &output, format)?;
    println!(
        "Portfolio generated: {} ({} projects, {written} bytes)",
        output.display(),
        portfolio.projects.len()
    );

    if run.stats.is_partial() {
        Ok(exit_code::PARTIAL)
    } else {
        Ok(exit_code::SUCCESS)
    }
}

fn assess(cmd: cli::AssessCommand, cfg: FolioConfig) -> Result<i32, FolioError> {
    let min_score = cmd.min_score.unwrap_or(cfg.quality.min_score);
    let source = github_client(&cfg, cmd.user)?;
    let rows = pipeline::assess_only(&source, cmd.limit, min_score)?;

    let mut tally = AssessmentTally::default();
    for (index, row) in rows.iter().enumerate() {
        let status = if row.assessment.passed {
            "INCLUDE"
        } else {
            "SKIP"
        };
        println!(
            "{:2}. {} - {status} - {}",
            index + 1,
            row.repo.name,
            row.assessment.reason
        );
        if let Some(text) = row.readme.content() {
            let mut snippet: String = text.chars().take(200).collect();
            snippet = snippet.replace('\n', " ").trim().to_string();
            if text.chars().count() > 200 {
                snippet.push_str("...");
            }
            println!("    README: {snippet}");
        }
        tally.record(&row.repo.name, &row.assessment);
    }

    println!();
    println!("would process {}:", tally.included.len());
    for (name, score) in &tally.included {
        println!("- {name} (score: {score})");
    }
    println!("would skip {}:", tally.skipped.len());
    for (name, reason) in &tally.skipped {
        println!("- {name}: {reason}");
    }
    println!(
        "LLM calls saved: {} of {} ({:.1}%)",
        tally.skipped.len(),
        tally.total(),
        tally.savings_percent()
    );
    Ok(exit_code::SUCCESS)
}

fn repos(cmd: cli::ReposCommand, cfg: FolioConfig) -> Result<i32, FolioError> {
    let source = github_client(&cfg, cmd.user)?;
    let repos = source.list_repositories()?;

    for (index, repo) in repos.iter().enumerate() {
        let visibility = if repo.private { "private" } else { "public" };
        let description = repo
            .description
            .as_deref()
            .filter(|description| !description.is_empty())
            .unwrap_or("No description");
        println!("{:2}. [{visibility}] {}", index + 1, repo.name);
        println!("    {}", truncate_description(description, 60));
        println!(
            "    {} | updated {} | stars {} | forks {}",
            repo.language.as_deref().unwrap_or("Unknown"),
            repo.updated_date(),
            repo.stars,
            repo.forks
        );
    }

    let stats = InventoryStats::from_repos(&repos);
    println!();
    println!("public repositories: {}", stats.public);
    println!("private repositories: {}", stats.private);
    println!("total repositories: {}", stats.total);
    println!("total stars: {}", stats.stars);
    println!("total forks: {}", stats.forks);

    println!("languages:");
    for share in &stats.languages {
        println!(
            "- {}: {} repos ({:.1}%)",
            share.language, share.repos, share.percent
        );
    }
    println!("most recently updated:");
    for (name, updated) in &stats.recently_updated {
        println!("- {name} ({updated})");
    }
    if !stats.most_starred.is_empty() {
        println!("most starred:");
        for (name, stars) in &stats.most_starred {
            println!("- {name} ({stars} stars)");
        }
    }
    Ok(exit_code::SUCCESS)
}

fn token(cfg: FolioConfig) -> Result<i32, FolioError> {
    let client = github_client(&cfg, None)?;
    let info = client.whoami()?;
    println!(
        "user: {} ({})",
        info.login,
        info.name.as_deref().unwrap_or("no name")
    );
    println!(
        "scopes: {}",
        info.scopes
            .as_deref()
            .filter(|scopes| !scopes.is_empty())
            .unwrap_or("unable to determine")
    );

    let limit = client.rate_limit()?;
    let reset = DateTime::from_timestamp(limit.reset, 0)
        .map(|reset| {
            reset
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| limit.reset.to_string());
    println!(
        "rate limit: {} used of {} ({} remaining, resets {reset})",
        limit.used, limit.limit, limit.remaining
    );
    Ok(exit_code::SUCCESS)
}

fn summarize_file(cmd: cli::SummarizeCommand, cfg: FolioConfig) -> Result<i32, FolioError> {
    let readme = read_readme(&cmd.path)?;
    let text = match SummaryMode::from(cmd.mode) {
        SummaryMode::Heuristic => analyze::summarize_heuristic(&readme).to_text(),
        SummaryMode::Llm => {
            let snippets = match &cmd.code {
                Some(path) => read_readme(path)?,
                None => String::new(),
            };
            let client = LlmClient::from_env(&cfg.summary)?;
            summarize::summarize_project(&client, &readme, &snippets, cfg.summary.snippet_chars)
        }
    };

    if summarize::is_summary_error(&text) {
        eprintln!("{text}");
        return Ok(exit_code::PARTIAL);
    }
    println!("{text}");
    Ok(exit_code::SUCCESS)
}

fn score_file(cmd: cli::ScoreCommand, cfg: FolioConfig) -> Result<i32, FolioError> {
    let readme = read_readme(&cmd.path)?;
    let repo = RepoMetadata {
        name: cmd.name.unwrap_or_else(|| "local".to_string()),
        description: cmd.description,
        language: cmd.language,
        ..Default::default()
    };
    let min_score = cmd.min_score.unwrap_or(cfg.quality.min_score);
    let assessment = analyze::assess_text(&readme, &repo, min_score);

    println!("score: {}", assessment.score);
    println!("passed: {}", assessment.passed);
    println!("reason: {}", assessment.reason);
    if assessment.passed {
        Ok(exit_code::SUCCESS)
    } else {
        Ok(exit_code::PARTIAL)
    }
}

fn run() -> Result<i32, FolioError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    config::load_env_files(&cwd);
    let cfg = config::load_config(&cwd)?;

    match cli.command {
        cli::Commands::Generate(cmd) => generate(cmd, cfg),
        cli::Commands::Assess(cmd) => assess(cmd, cfg),
        cli::Commands::Repos(cmd) => repos(cmd, cfg),
        cli::Commands::Token => token(cfg),
        cli::Commands::Summarize(cmd) => summarize_file(cmd, cfg),
        cli::Commands::Score(cmd) => score_file(cmd, cfg),
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
