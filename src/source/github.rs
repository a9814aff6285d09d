//! GitHub REST client over sync ureq.

use super::RepoSource;
use crate::error::{FolioError, Result};
use crate::types::config::GithubConfig;
use crate::types::repo::{ReadmeFetch, RepoMetadata, README_FETCH_ERROR_PREFIX};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use std::cell::OnceCell;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("repofolio/", env!("CARGO_PKG_VERSION"));

type HttpResponse = ureq::http::Response<ureq::Body>;

#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub login: String,
    pub name: Option<String>,
    pub scopes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimit {
    pub limit: u64,
    pub used: u64,
    pub remaining: u64,
    /// Unix seconds.
    pub reset: i64,
}

#[derive(Deserialize)]
struct UserPayload {
    login: String,
    name: Option<String>,
}

#[derive(Deserialize)]
struct ReadmePayload {
    content: String,
}

#[derive(Deserialize)]
struct RateLimitPayload {
    resources: RateLimitResources,
}

#[derive(Deserialize)]
struct RateLimitResources {
    core: RateLimit,
}

pub struct GitHubClient {
    api_url: String,
    token: String,
    user: Option<String>,
    per_page: u32,
    sort: String,
    login: OnceCell<String>,
    agent: ureq::Agent,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(30)))
        .build()
        .new_agent()
}

impl GitHubClient {
    pub fn new(config: &GithubConfig, token: impl Into<String>) -> Self {
        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: token.into(),
            user: config.user.clone(),
            per_page: config.per_page.clamp(1, 100),
            sort: config.sort.clone(),
            login: OnceCell::new(),
            agent: make_agent(),
        }
    }

    fn get(&self, url: &str) -> Result<HttpResponse> {
        debug!(url, "GET");
        let response = self
            .agent
            .get(url)
            .header("Authorization", &format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .call()?;
        Ok(response)
    }

    fn get_ok(&self, url: &str) -> Result<HttpResponse> {
        let response = self.get(url)?;
        let status = response.status().as_u16();
        if status != 200 {
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(FolioError::GitHubApi { status, message });
        }
        Ok(response)
    }

    pub(crate) fn repos_page_url(&self, page: u32) -> String {
        let base = match &self.user {
            Some(user) => format!("{}/users/{}/repos", self.api_url, user),
            None => format!("{}/user/repos", self.api_url),
        };
        format!(
            "{base}?page={page}&per_page={}&sort={}",
            self.per_page, self.sort
        )
    }

    pub(crate) fn readme_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{owner}/{repo}/readme", self.api_url)
    }

    pub fn whoami(&self) -> Result<TokenInfo> {
        let response = self.get_ok(&format!("{}/user", self.api_url))?;
        let scopes = response
            .headers()
            .get("x-oauth-scopes")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let user: UserPayload = response
            .into_body()
            .read_json()
            .map_err(|e| FolioError::Decode(e.to_string()))?;
        Ok(TokenInfo {
            login: user.login,
            name: user.name,
            scopes,
        })
    }

    pub fn rate_limit(&self) -> Result<RateLimit> {
        let response = self.get_ok(&format!("{}/rate_limit", self.api_url))?;
        let payload: RateLimitPayload = response
            .into_body()
            .read_json()
            .map_err(|e| FolioError::Decode(e.to_string()))?;
        Ok(payload.resources.core)
    }

    /// Owner to use for README lookups when the listing did not carry one.
    fn resolve_owner(&self, owner: &str) -> Result<String> {
        if !owner.is_empty() {
            return Ok(owner.to_string());
        }
        if let Some(user) = &self.user {
            return Ok(user.clone());
        }
        if let Some(login) = self.login.get() {
            return Ok(login.clone());
        }
        let login = self.whoami()?.login;
        Ok(self.login.get_or_init(|| login).clone())
    }

    fn fetch_readme(&self, owner: &str, repo: &str) -> Result<ReadmeFetch> {
        let owner = self.resolve_owner(owner)?;
        let response = self.get(&self.readme_url(&owner, repo))?;
        match response.status().as_u16() {
            200 => {
                let payload: ReadmePayload = response
                    .into_body()
                    .read_json()
                    .map_err(|e| FolioError::Decode(e.to_string()))?;
                Ok(ReadmeFetch::Found(decode_content(&payload.content)?))
            }
            404 => Ok(ReadmeFetch::NotFound),
            status => Ok(ReadmeFetch::Error(format!(
                "{README_FETCH_ERROR_PREFIX}: {status}"
            ))),
        }
    }
}

impl RepoSource for GitHubClient {
    fn list_repositories(&self) -> Result<Vec<RepoMetadata>> {
        let mut repos = Vec::new();
        let mut page = 1;
        loop {
            let response = self.get_ok(&self.repos_page_url(page))?;
            let batch: Vec<RepoMetadata> = response
                .into_body()
                .read_json()
                .map_err(|e| FolioError::Decode(e.to_string()))?;
            if batch.is_empty() {
                break;
            }
            info!(page, count = batch.len(), "fetched repository page");
            repos.extend(batch);
            page += 1;
        }
        Ok(repos)
    }

    fn get_readme(&self, owner: &str, repo: &str) -> ReadmeFetch {
        match self.fetch_readme(owner, repo) {
            Ok(fetch) => fetch,
            Err(e) => {
                warn!(repo, error = %e, "readme fetch failed");
                ReadmeFetch::Error(format!("{README_FETCH_ERROR_PREFIX}: {e}"))
            }
        }
    }
}

/// Decode the base64 `content` field of the readme endpoint. GitHub wraps the
/// payload at 60 columns.
pub fn decode_content(content: &str) -> Result<String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| FolioError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FolioError::Decode(e.to_string()))
}
