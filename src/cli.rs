use crate::types::config::{DocumentFormat, SummaryMode};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repofolio",
    version,
    about = "Build a project portfolio from your GitHub READMEs"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, score and summarize repositories into a portfolio document
    Generate(GenerateCommand),
    /// Score READMEs of the first repositories without summarizing
    Assess(AssessCommand),
    /// List repositories with inventory statistics
    Repos(ReposCommand),
    /// Show token identity, scopes and rate limit
    Token,
    /// Summarize a local README file
    Summarize(SummarizeCommand),
    /// Score a local README file
    Score(ScoreCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Mode {
    Llm,
    Heuristic,
}

impl From<Mode> for SummaryMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Llm => SummaryMode::Llm,
            Mode::Heuristic => SummaryMode::Heuristic,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Pdf,
    Json,
    Md,
}

impl From<ReportFormat> for DocumentFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Json => DocumentFormat::Json,
            ReportFormat::Md => DocumentFormat::Md,
            ReportFormat::Pdf => DocumentFormat::Pdf,
        }
    }
}

#[derive(Args)]
pub struct GenerateCommand {
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,
    #[arg(long)]
    pub min_score: Option<u32>,
    /// Summarize every repository that has a README
    #[arg(long)]
    pub no_quality_check: bool,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    /// List another user's public repositories instead of the token owner's
    #[arg(long)]
    pub user: Option<String>,
    /// Skip the cost confirmation
    #[arg(long, short)]
    pub yes: bool,
    /// Confirm each repository before summarizing it
    #[arg(long)]
    pub review: bool,
}

#[derive(Args)]
pub struct AssessCommand {
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
    #[arg(long)]
    pub min_score: Option<u32>,
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Args)]
pub struct ReposCommand {
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Args)]
pub struct SummarizeCommand {
    pub path: PathBuf,
    #[arg(long, value_enum, default_value = "heuristic")]
    pub mode: Mode,
    /// Source file whose contents are sent as sample code
    #[arg(long)]
    pub code: Option<PathBuf>,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub min_score: Option<u32>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
}
