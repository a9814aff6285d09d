pub mod github;

use crate::error::Result;
use crate::types::repo::{ReadmeFetch, RepoMetadata};

/// Repository hosting service the pipeline reads from.
pub trait RepoSource {
    fn list_repositories(&self) -> Result<Vec<RepoMetadata>>;

    /// Never fails: missing and unreadable READMEs come back as sentinels.
    fn get_readme(&self, owner: &str, repo: &str) -> ReadmeFetch;
}
