pub const OVERVIEW_HEADER: &str = "Project Overview:";
pub const FEATURES_HEADER: &str = "Key Features:";
pub const TECHNOLOGIES_HEADER: &str = "Technologies Used:";
pub const IMPACT_HEADER: &str = "Impact & Benefits:";

pub const TECHNOLOGIES_UNSPECIFIED: &str = "Not specified";

/// Four-section project summary consumed by the document renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub overview: String,
    pub features: Vec<String>,
    /// Sorted, deduplicated; empty means nothing was detected.
    pub technologies: Vec<String>,
    pub impact: String,
}

impl ProjectSummary {
    pub fn technologies_line(&self) -> String {
        if self.technologies.is_empty() {
            TECHNOLOGIES_UNSPECIFIED.to_string()
        } else {
            self.technologies.join(", ")
        }
    }

    /// Textual form with `**` around each section header, the same shape the
    /// LLM is asked to produce.
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("**{OVERVIEW_HEADER}**\n{}\n\n", self.overview));
        output.push_str(&format!("**{FEATURES_HEADER}**\n"));
        for feature in &self.features {
            output.push_str(&format!("* {feature}\n"));
        }
        output.push('\n');
        output.push_str(&format!(
            "**{TECHNOLOGIES_HEADER}**\n{}\n\n",
            self.technologies_line()
        ));
        output.push_str(&format!("**{IMPACT_HEADER}**\n{}\n", self.impact));
        output
    }
}
