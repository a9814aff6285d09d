//! Paginated document model. The cover page comes first, then one page per
//! project.

use super::sanitize::clean_text;
use crate::analyze::heuristic::{list_item, strip_emphasis};
use crate::types::report::Portfolio;
use chrono::NaiveDate;
use serde::Serialize;

pub const SUBTITLE: &str = "Project Showcase & Technical Summary";
pub const DEFAULT_FEATURE_BULLET: &str = "Details available in the repository.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Block {
    Title(String),
    Subtitle(String),
    Label(String),
    Heading(String),
    Paragraph(String),
    Bullet(String),
    Caption(String),
    Rule,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub number: usize,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub title: String,
    pub generated_on: String,
    pub pages: Vec<Page>,
}

pub fn build_document(portfolio: &Portfolio, generated_on: NaiveDate) -> Document {
    let generated_on = generated_on.format("%B %d, %Y").to_string();
    let title = clean_text(&portfolio.title);

    let mut pages = vec![Page {
        number: 1,
        blocks: vec![
            Block::Title(title.clone()),
            Block::Subtitle(SUBTITLE.to_string()),
            Block::Caption(format!("Generated on {generated_on}")),
            Block::Label(format!("Featuring {} Projects", portfolio.projects.len())),
        ],
    }];

    for (index, project) in portfolio.projects.iter().enumerate() {
        let mut blocks = vec![
            Block::Label(format!("Project {}", index + 1)),
            Block::Title(clean_text(&project.title)),
            Block::Rule,
        ];
        blocks.extend(summary_blocks(&project.summary));
        pages.push(Page {
            number: pages.len() + 1,
            blocks,
        });
    }

    Document {
        title,
        generated_on,
        pages,
    }
}

/// Split `**`-delimited summary text into blocks. Odd segments containing a
/// colon are headers; everything else is body text. Bold inside a list item
/// (`* **Fast:** streams`) belongs to the item, never to a header.
pub fn summary_blocks(summary: &str) -> Vec<Block> {
    let cleaned = unwrap_list_emphasis(&clean_text(summary));
    let mut blocks = Vec::new();
    let mut open_features = false;

    for (index, section) in cleaned.split("**").enumerate() {
        if section.trim().is_empty() {
            continue;
        }

        if index % 2 == 1 && section.contains(':') {
            close_features(&mut blocks, &mut open_features);
            let header = section.trim();
            open_features = header.starts_with("Key Features");
            blocks.push(Block::Heading(header.to_string()));
            continue;
        }

        for line in section.trim().lines().map(str::trim) {
            if line.starts_with('*') || line.starts_with('-') {
                let item = line.trim_start_matches(&['*', '-'][..]).trim();
                if !item.is_empty() {
                    blocks.push(Block::Bullet(item.to_string()));
                    open_features = false;
                }
            } else if !line.is_empty() {
                blocks.push(Block::Paragraph(line.to_string()));
                open_features = false;
            }
        }
    }
    close_features(&mut blocks, &mut open_features);
    blocks
}

fn unwrap_list_emphasis(text: &str) -> String {
    text.lines()
        .map(|line| match list_item(line) {
            Some(_) if line.contains("**") || line.contains("__") => {
                let indent = &line[..line.len() - line.trim_start().len()];
                format!("{indent}{}", strip_emphasis(line.trim_start()))
            }
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn close_features(blocks: &mut Vec<Block>, open_features: &mut bool) {
    if *open_features {
        blocks.push(Block::Bullet(DEFAULT_FEATURE_BULLET.to_string()));
        *open_features = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::summarize_heuristic;
    use crate::types::report::ProjectEntry;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).expect("date should be valid")
    }

    #[test]
    fn summary_headers_and_bullets_alternate() {
        let blocks = summary_blocks(
            "**Project Overview:**\nA tool.\n\n**Key Features:**\n* Fast\n* Small\n\n**Impact & Benefits:**\nUseful.",
        );
        assert_eq!(
            blocks,
            vec![
                Block::Heading("Project Overview:".to_string()),
                Block::Paragraph("A tool.".to_string()),
                Block::Heading("Key Features:".to_string()),
                Block::Bullet("Fast".to_string()),
                Block::Bullet("Small".to_string()),
                Block::Heading("Impact & Benefits:".to_string()),
                Block::Paragraph("Useful.".to_string()),
            ]
        );
    }

    #[test]
    fn empty_feature_list_gets_default_bullet() {
        let text = summarize_heuristic("").to_text();
        let blocks = summary_blocks(&text);
        let features = blocks
            .iter()
            .position(|block| *block == Block::Heading("Key Features:".to_string()))
            .expect("features heading should exist");
        assert_eq!(
            blocks[features + 1],
            Block::Bullet(DEFAULT_FEATURE_BULLET.to_string())
        );
    }

    #[test]
    fn bold_labels_inside_bullets_stay_bullets() {
        let blocks = summary_blocks(
            "**Key Features:**\n* **Fast:** streams data\n- __Small:__ one binary\n\n**Technologies Used:**\nrust",
        );
        assert_eq!(
            blocks,
            vec![
                Block::Heading("Key Features:".to_string()),
                Block::Bullet("Fast: streams data".to_string()),
                Block::Bullet("Small: one binary".to_string()),
                Block::Heading("Technologies Used:".to_string()),
                Block::Paragraph("rust".to_string()),
            ]
        );
    }

    #[test]
    fn heuristic_bold_features_render_without_default_bullet() {
        let text = summarize_heuristic(
            "A command-line tool that converts spreadsheets into JSON documents.\n\n\
             - **Streaming:** handles huge files\n- **Schemas:** infers types\n",
        )
        .to_text();
        let blocks = summary_blocks(&text);
        assert!(!blocks.contains(&Block::Bullet(DEFAULT_FEATURE_BULLET.to_string())));
        assert!(!blocks.contains(&Block::Heading("Streaming:".to_string())));
        assert!(blocks.contains(&Block::Bullet("Streaming: handles huge files".to_string())));
        assert!(blocks.contains(&Block::Bullet("Schemas: infers types".to_string())));
    }

    #[test]
    fn bold_text_without_colon_stays_body() {
        let blocks = summary_blocks("Uses **fast** parsing");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("Uses".to_string()),
                Block::Paragraph("fast".to_string()),
                Block::Paragraph("parsing".to_string()),
            ]
        );
    }

    #[test]
    fn document_has_cover_plus_one_page_per_project() {
        let portfolio = Portfolio {
            title: "GitHub Portfolio".to_string(),
            projects: vec![
                ProjectEntry {
                    title: "alpha".to_string(),
                    summary: "**Project Overview:**\nAlpha.".to_string(),
                },
                ProjectEntry {
                    title: "beta".to_string(),
                    summary: "**Project Overview:**\nBeta.".to_string(),
                },
            ],
        };

        let document = build_document(&portfolio, date());
        assert_eq!(document.pages.len(), 3);
        assert_eq!(document.generated_on, "March 05, 2024");
        assert!(document.pages[0]
            .blocks
            .contains(&Block::Label("Featuring 2 Projects".to_string())));
        assert_eq!(document.pages[2].number, 3);
        assert_eq!(document.pages[2].blocks[0], Block::Label("Project 2".to_string()));
        assert_eq!(document.pages[2].blocks[1], Block::Title("beta".to_string()));
    }

    #[test]
    fn document_text_is_ascii_only() {
        let portfolio = Portfolio {
            title: "Portfolio \u{2014} 2024".to_string(),
            projects: vec![ProjectEntry {
                title: "caf\u{e9}".to_string(),
                summary: "**Project Overview:**\n\u{2022} r\u{e9}sum\u{e9}".to_string(),
            }],
        };
        let document = build_document(&portfolio, date());
        let json = serde_json::to_string(&document).expect("document should serialize");
        assert!(json.is_ascii());
    }
}
