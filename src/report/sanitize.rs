/// Reduce text to ASCII for rendering: common typographic characters get
/// ASCII stand-ins, any other run of non-ASCII characters becomes one space.
pub fn clean_text(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut in_foreign_run = false;
    for c in text.chars() {
        let replacement = match c {
            '\u{2022}' => Some("* "),
            '\u{2013}' | '\u{2014}' => Some("-"),
            '\u{201C}' | '\u{201D}' => Some("\""),
            '\u{2018}' | '\u{2019}' => Some("'"),
            _ => None,
        };
        if let Some(replacement) = replacement {
            output.push_str(replacement);
            in_foreign_run = false;
        } else if c.is_ascii() {
            output.push(c);
            in_foreign_run = false;
        } else if !in_foreign_run {
            output.push(' ');
            in_foreign_run = true;
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typographic_characters_map_to_ascii() {
        assert_eq!(
            clean_text("\u{2022} one \u{2013} two \u{2014} \u{201C}three\u{201D} \u{2018}four\u{2019}"),
            "*  one - two - \"three\" 'four'"
        );
    }

    #[test]
    fn other_non_ascii_runs_collapse_to_one_space() {
        assert_eq!(clean_text("caf\u{e9}\u{e9}\u{e9} ok \u{1F680}\u{1F680}!"), "caf  ok  !");
    }

    #[test]
    fn ascii_text_is_unchanged() {
        let text = "Project #1 - Feature list @#$%^&*()[]{}";
        assert_eq!(clean_text(text), text);
    }
}
