use crate::types::repo::RepoMetadata;
use std::collections::HashMap;

pub const TOP_N: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageShare {
    pub language: String,
    pub repos: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Default)]
pub struct InventoryStats {
    pub total: usize,
    pub public: usize,
    pub private: usize,
    pub stars: u64,
    pub forks: u64,
    pub languages: Vec<LanguageShare>,
    pub recently_updated: Vec<(String, String)>,
    pub most_starred: Vec<(String, u64)>,
}

impl InventoryStats {
    pub fn from_repos(repos: &[RepoMetadata]) -> Self {
        let private = repos.iter().filter(|repo| repo.private).count();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for language in repos.iter().filter_map(|repo| repo.language.as_deref()) {
            if !language.is_empty() {
                *counts.entry(language).or_default() += 1;
            }
        }
        let mut languages: Vec<LanguageShare> = counts
            .into_iter()
            .map(|(language, count)| LanguageShare {
                language: language.to_string(),
                repos: count,
                percent: count as f64 / repos.len() as f64 * 100.0,
            })
            .collect();
        languages.sort_by(|a, b| b.repos.cmp(&a.repos).then(a.language.cmp(&b.language)));

        let mut by_update: Vec<&RepoMetadata> = repos.iter().collect();
        by_update.sort_by(|a, b| {
            b.updated_at
                .as_deref()
                .unwrap_or_default()
                .cmp(a.updated_at.as_deref().unwrap_or_default())
        });
        let recently_updated = by_update
            .into_iter()
            .take(TOP_N)
            .map(|repo| (repo.name.clone(), repo.updated_date().to_string()))
            .collect();

        let mut starred: Vec<&RepoMetadata> = repos.iter().filter(|repo| repo.stars > 0).collect();
        starred.sort_by(|a, b| b.stars.cmp(&a.stars));
        let most_starred = starred
            .into_iter()
            .take(TOP_N)
            .map(|repo| (repo.name.clone(), repo.stars))
            .collect();

        Self {
            total: repos.len(),
            public: repos.len() - private,
            private,
            stars: repos.iter().map(|repo| repo.stars).sum(),
            forks: repos.iter().map(|repo| repo.forks).sum(),
            languages,
            recently_updated,
            most_starred,
        }
    }
}

/// Description cut to `max` characters with a trailing ellipsis.
pub fn truncate_description(description: &str, max: usize) -> String {
    if description.chars().count() > max {
        let cut: String = description.chars().take(max).collect();
        format!("{cut}...")
    } else {
        description.to_string()
    }
}
