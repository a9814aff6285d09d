#[derive(Debug, Clone)]
pub struct ProjectEntry {
    pub title: String,
    /// `**`-delimited summary text, from either summarization path.
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct Portfolio {
    pub title: String,
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub repositories: usize,
    pub with_readme: usize,
    pub passed_quality: usize,
    pub summarized: usize,
    pub failed: usize,
}

impl RunStats {
    pub fn attempted(&self) -> usize {
        self.summarized + self.failed
    }

    pub fn is_partial(&self) -> bool {
        self.failed > 0 || self.summarized == 0
    }
}
