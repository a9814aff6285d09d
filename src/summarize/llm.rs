//! Chat-completion client for OpenAI and Anthropic, sync over ureq.

use super::SummaryService;
use crate::config::require_env;
use crate::error::{FolioError, Result};
use crate::types::config::{LlmBackend, SummaryConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: String,
}

#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

pub struct LlmClient {
    backend: LlmBackend,
    model: String,
    max_tokens: u32,
    api_key: String,
    agent: ureq::Agent,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(120)))
        .build()
        .new_agent()
}

impl LlmClient {
    pub fn new(config: &SummaryConfig, api_key: impl Into<String>) -> Self {
        Self {
            backend: config.backend,
            model: config.model().to_string(),
            max_tokens: config.max_tokens,
            api_key: api_key.into(),
            agent: make_agent(),
        }
    }

    pub fn from_env(config: &SummaryConfig) -> Result<Self> {
        let api_key = require_env(config.backend.env_key())?;
        Ok(Self::new(config, api_key))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn user_message(prompt: &str) -> Vec<Message> {
        vec![Message {
            role: "user",
            content: prompt.to_string(),
        }]
    }

    fn generate_openai(&self, prompt: &str) -> Result<String> {
        let body = OpenAiRequest {
            model: self.model.clone(),
            messages: Self::user_message(prompt),
            max_tokens: self.max_tokens,
        };
        let response = self
            .agent
            .post(self.backend.api_url())
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&body)?;

        let status = response.status().as_u16();
        if status >= 400 {
            let error_text = response.into_body().read_to_string().unwrap_or_default();
            return Err(FolioError::Service(format!("{status} - {error_text}")));
        }

        let parsed: OpenAiResponse = response
            .into_body()
            .read_json()
            .map_err(|e| FolioError::Decode(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| FolioError::Service("no response choices".to_string()))
    }

    fn generate_anthropic(&self, prompt: &str) -> Result<String> {
        let body = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: Self::user_message(prompt),
        };
        let response = self
            .agent
            .post(self.backend.api_url())
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .send_json(&body)?;

        let status = response.status().as_u16();
        if status >= 400 {
            let error_text = response.into_body().read_to_string().unwrap_or_default();
            return Err(FolioError::Service(format!("{status} - {error_text}")));
        }

        let parsed: AnthropicResponse = response
            .into_body()
            .read_json()
            .map_err(|e| FolioError::Decode(e.to_string()))?;
        parsed
            .content
            .into_iter()
            .find(|content| content.content_type == "text")
            .map(|content| content.text)
            .ok_or_else(|| FolioError::Service("no text content in response".to_string()))
    }
}

impl SummaryService for LlmClient {
    fn summarize(&self, prompt: &str) -> Result<String> {
        info!(backend = ?self.backend, model = %self.model, "requesting summary");
        match self.backend {
            LlmBackend::OpenAi => self.generate_openai(prompt),
            LlmBackend::Anthropic => self.generate_anthropic(prompt),
        }
    }
}
