#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityAssessment {
    pub score: u32,
    pub passed: bool,
    pub reason: String,
}

impl QualityAssessment {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            score: 0,
            passed: false,
            reason: reason.into(),
        }
    }
}

/// Include/skip bookkeeping for an `assess` run.
#[derive(Debug, Clone, Default)]
pub struct AssessmentTally {
    pub included: Vec<(String, u32)>,
    pub skipped: Vec<(String, String)>,
}

impl AssessmentTally {
    pub fn record(&mut self, repo_name: &str, assessment: &QualityAssessment) {
        if assessment.passed {
            self.included.push((repo_name.to_string(), assessment.score));
        } else {
            self.skipped
                .push((repo_name.to_string(), assessment.reason.clone()));
        }
    }

    pub fn total(&self) -> usize {
        self.included.len() + self.skipped.len()
    }

    /// Share of checked repositories that would not cost an LLM call.
    pub fn savings_percent(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.skipped.len() as f64 / self.total() as f64 * 100.0
    }
}
