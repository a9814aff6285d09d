use crate::types::summary::{FEATURES_HEADER, IMPACT_HEADER, OVERVIEW_HEADER, TECHNOLOGIES_HEADER};

/// Portfolio prompt with the four `**`-delimited sections the renderer expects.
/// `snippets` is cut to `snippet_chars` characters.
pub fn build_prompt(readme: &str, snippets: &str, snippet_chars: usize) -> String {
    let snippet: String = snippets.chars().take(snippet_chars).collect();
    format!(
        "Create a professional portfolio summary for this project. Format your response with clear sections:

**{OVERVIEW_HEADER}**
[Write a compelling 2-3 sentence description of what this project does and its main purpose]

**{FEATURES_HEADER}**
* [List 3-5 main features or capabilities, each as a bullet point]
* [Each feature should be concise but descriptive]
* [Focus on the most impressive or unique aspects]

**{TECHNOLOGIES_HEADER}**
[List the main technologies, frameworks, languages, and tools used - keep it concise]

**{IMPACT_HEADER}**
[1-2 sentences about the value this project provides or problems it solves]

README Content:
{readme}

Sample Code:
{snippet}

Keep the response professional, engaging, and formatted exactly as shown above with the section headers and bullet points.
Use only unaccented ASCII characters and avoid special Unicode symbols.
"
    )
}
