pub trait StripCodeBlock {
    fn strip_code_block(&self) -> &str;
}

impl StripCodeBlock for str {
    fn strip_code_block(&self) -> &str {
        let trimmed = self.trim();
        if trimmed.starts_with("```")
            && let Some(pos) = trimmed.find('\n')
        {
            let inner = &trimmed[pos + 1..];
            if let Some(inner) = inner.strip_suffix("```") {
                return inner.trim();
            }
        }
        trimmed
    }
}

/// Balanced `{...}` objects in free text, one per opening brace, in order
/// of appearance. String literals are respected so braces inside them do not
/// count.
pub fn json_object_candidates(raw: &str) -> impl Iterator<Item = &str> {
    let text = raw.strip_code_block();
    text.match_indices('{')
        .filter_map(move |(start, _)| balanced_object(&text[start..]))
}

fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..=offset]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fenced_block() {
        let raw = "```json\n{\"steps\": []}\n```";
        assert_eq!(raw.strip_code_block(), "{\"steps\": []}");
    }

    #[test]
    fn extracts_object_surrounded_by_prose() {
        let raw = "Sure! Here is the plan:\n```json\n{\"steps\": [{\"tool\": \"wait\", \"params\": {}}]}\n```\nGood luck.";
        assert_eq!(
            json_object_candidates(raw).next(),
            Some("{\"steps\": [{\"tool\": \"wait\", \"params\": {}}]}")
        );
    }

    #[test]
    fn yields_every_opening_brace_in_order() {
        let raw = r#"I will click element {3} next. Plan: {"steps": [{"tool": "wait"}]}"#;
        let candidates: Vec<_> = json_object_candidates(raw).collect();
        assert_eq!(
            candidates,
            [
                "{3}",
                r#"{"steps": [{"tool": "wait"}]}"#,
                r#"{"tool": "wait"}"#,
            ]
        );
    }

    #[test]
    fn ignores_braces_inside_strings() {
        let raw = r#"plan: {"steps": [{"tool": "input_text", "params": {"text": "a } b"}}]} trailing"#;
        assert_eq!(
            json_object_candidates(raw).next(),
            Some(r#"{"steps": [{"tool": "input_text", "params": {"text": "a } b"}}]}"#)
        );
    }

    #[test]
    fn returns_none_without_object() {
        assert_eq!(json_object_candidates("no plan today").next(), None);
        assert_eq!(json_object_candidates("{ unterminated").next(), None);
    }
}
