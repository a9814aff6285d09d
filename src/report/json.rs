use super::document::Document;

pub fn to_json(document: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::document::{Block, Page};

    #[test]
    fn json_document_tags_blocks_by_kind() {
        let document = Document {
            title: "GitHub Portfolio".to_string(),
            generated_on: "March 05, 2024".to_string(),
            pages: vec![Page {
                number: 1,
                blocks: vec![Block::Heading("Key Features:".to_string()), Block::Rule],
            }],
        };

        let rendered = to_json(&document).expect("json should serialize");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("json should parse");
        assert_eq!(value["pages"][0]["number"], 1);
        assert_eq!(value["pages"][0]["blocks"][0]["kind"], "heading");
        assert_eq!(value["pages"][0]["blocks"][0]["text"], "Key Features:");
        assert_eq!(value["pages"][0]["blocks"][1]["kind"], "rule");
    }
}
