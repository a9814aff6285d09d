use super::document::{Block, Document};

pub const PAGE_BREAK: &str = "<div style=\"page-break-after: always;\"></div>";

pub fn to_markdown(document: &Document) -> String {
    let mut output = String::new();
    for page in &document.pages {
        let mut blocks = page.blocks.iter().peekable();
        while let Some(block) = blocks.next() {
            match block {
                Block::Title(text) => output.push_str(&format!("# {text}\n\n")),
                Block::Subtitle(text) => output.push_str(&format!("_{text}_\n\n")),
                Block::Label(text) => output.push_str(&format!("**{text}**\n\n")),
                Block::Heading(text) => output.push_str(&format!("### {text}\n\n")),
                Block::Paragraph(text) => output.push_str(&format!("{text}\n\n")),
                Block::Caption(text) => output.push_str(&format!("<small>{text}</small>\n\n")),
                Block::Rule => output.push_str("---\n\n"),
                Block::Bullet(text) => {
                    output.push_str(&format!("- {text}\n"));
                    if !matches!(blocks.peek(), Some(Block::Bullet(_))) {
                        output.push('\n');
                    }
                }
            }
        }
        output.push_str(&format!("<sub>Page {}</sub>\n\n", page.number));
        if page.number < document.pages.len() {
            output.push_str(PAGE_BREAK);
            output.push_str("\n\n");
        }
    }
    output
}
