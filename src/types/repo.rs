use serde::Deserialize;

pub const README_NOT_FOUND: &str = "No README found";
pub const README_FETCH_ERROR_PREFIX: &str = "Error fetching README";
pub const README_EMPTY: &str = "README is empty";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// Repository snapshot as returned by the hosting API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepoMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, rename = "stargazers_count")]
    pub stars: u64,
    #[serde(default, rename = "forks_count")]
    pub forks: u64,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub owner: RepoOwner,
}

impl RepoMetadata {
    pub fn owner_login(&self) -> &str {
        &self.owner.login
    }

    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .map(|description| !description.trim().is_empty())
            .unwrap_or(false)
    }

    /// `YYYY-MM-DD` part of `updated_at`, or `Unknown`.
    pub fn updated_date(&self) -> &str {
        self.updated_at
            .as_deref()
            .map(|stamp| stamp.get(..10).unwrap_or(stamp))
            .unwrap_or("Unknown")
    }
}

/// Outcome of asking the hosting API for a repository README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeFetch {
    Found(String),
    NotFound,
    Error(String),
}

impl ReadmeFetch {
    /// Classify raw text, recognising the textual sentinels used by the fetch step.
    pub fn from_text(text: &str) -> Self {
        if text == README_NOT_FOUND {
            ReadmeFetch::NotFound
        } else if text.starts_with(README_FETCH_ERROR_PREFIX) {
            ReadmeFetch::Error(text.to_string())
        } else {
            ReadmeFetch::Found(text.to_string())
        }
    }

    /// README body when usable for scoring and summarization.
    pub fn content(&self) -> Option<&str> {
        match self {
            ReadmeFetch::Found(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }

    /// Why the README cannot be used, `None` when it can.
    pub fn skip_reason(&self) -> Option<String> {
        match self {
            ReadmeFetch::Found(text) if text.trim().is_empty() => Some(README_EMPTY.to_string()),
            ReadmeFetch::Found(_) => None,
            ReadmeFetch::NotFound => Some(README_NOT_FOUND.to_string()),
            ReadmeFetch::Error(message) => Some(message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_recognises_sentinels() {
        assert_eq!(ReadmeFetch::from_text("No README found"), ReadmeFetch::NotFound);
        assert_eq!(
            ReadmeFetch::from_text("Error fetching README: 403"),
            ReadmeFetch::Error("Error fetching README: 403".to_string())
        );
        assert_eq!(
            ReadmeFetch::from_text("# Title"),
            ReadmeFetch::Found("# Title".to_string())
        );
    }

    #[test]
    fn whitespace_only_readme_is_not_usable() {
        let fetch = ReadmeFetch::Found("  \n\t ".to_string());
        assert!(fetch.content().is_none());
        assert_eq!(fetch.skip_reason().as_deref(), Some(README_EMPTY));
    }

    #[test]
    fn metadata_deserializes_from_github_payload() {
        let repo: RepoMetadata = serde_json::from_str(
            r#"{
                "name": "repofolio",
                "description": null,
                "language": "Rust",
                "stargazers_count": 4,
                "forks_count": 1,
                "private": true,
                "updated_at": "2024-03-01T10:00:00Z",
                "owner": { "login": "octocat", "id": 1 }
            }"#,
        )
        .expect("payload should parse");

        assert_eq!(repo.owner_login(), "octocat");
        assert_eq!(repo.stars, 4);
        assert!(!repo.has_description());
        assert_eq!(repo.updated_date(), "2024-03-01");
    }
}
