use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_MIN_SCORE: u32 = 3;
pub const DEFAULT_OUTPUT_PATH: &str = "GitHub_Portfolio.pdf";
pub const DEFAULT_TITLE: &str = "GitHub Portfolio";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub quality: QualityConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub user: Option<String>,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_sort")]
    pub sort: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user: None,
            per_page: default_per_page(),
            sort: default_sort(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_per_page() -> u32 {
    100
}

fn default_sort() -> String {
    "updated".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct QualityConfig {
    #[serde(default = "default_min_score")]
    pub min_score: u32,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            enabled: true,
        }
    }
}

fn default_min_score() -> u32 {
    DEFAULT_MIN_SCORE
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    #[default]
    Llm,
    Heuristic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    #[default]
    OpenAi,
    Anthropic,
}

impl LlmBackend {
    pub fn env_key(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "OPENAI_API_KEY",
            LlmBackend::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "gpt-4",
            LlmBackend::Anthropic => "claude-sonnet-4-20250514",
        }
    }

    pub fn api_url(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "https://api.openai.com/v1/chat/completions",
            LlmBackend::Anthropic => "https://api.anthropic.com/v1/messages",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
    #[serde(default)]
    pub mode: SummaryMode,
    #[serde(default)]
    pub backend: LlmBackend,
    pub model: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            mode: SummaryMode::default(),
            backend: LlmBackend::default(),
            model: None,
            max_tokens: default_max_tokens(),
            snippet_chars: default_snippet_chars(),
        }
    }
}

impl SummaryConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_snippet_chars() -> usize {
    1000
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Pdf,
    Md,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default)]
    pub format: DocumentFormat,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: DocumentFormat::default(),
            title: default_title(),
        }
    }
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl FolioConfig {
    pub fn per_page(&self) -> u32 {
        self.github.per_page.clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg: FolioConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.github.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.quality.min_score, DEFAULT_MIN_SCORE);
        assert!(cfg.quality.enabled);
        assert_eq!(cfg.summary.mode, SummaryMode::Llm);
        assert_eq!(cfg.summary.model(), "gpt-4");
        assert_eq!(cfg.output.format, DocumentFormat::Pdf);
        assert_eq!(cfg.output.path, DEFAULT_OUTPUT_PATH);
    }

    #[test]
    fn sections_parse_with_enums() {
        let cfg: FolioConfig = toml::from_str(
            r#"
[github]
user = "octocat"
per_page = 500

[quality]
min_score = 5
enabled = false

[summary]
mode = "heuristic"
backend = "anthropic"

[output]
format = "json"
title = "Work"
"#,
        )
        .expect("config should parse");

        assert_eq!(cfg.github.user.as_deref(), Some("octocat"));
        assert_eq!(cfg.per_page(), 100);
        assert_eq!(cfg.quality.min_score, 5);
        assert!(!cfg.quality.enabled);
        assert_eq!(cfg.summary.mode, SummaryMode::Heuristic);
        assert_eq!(cfg.summary.model(), "claude-sonnet-4-20250514");
        assert_eq!(cfg.output.format, DocumentFormat::Json);
        assert_eq!(cfg.output.title, "Work");
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let parsed: Result<FolioConfig, _> = toml::from_str(
            r#"
[summary]
mode = "magic"
"#,
        );
        assert!(parsed.is_err());
    }
}
