use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static ELEMENT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d+)\]<([^\s>]+)([^>]*)>(.*?)/>").expect("element pattern"));

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_][\w:.-]*)=(?:'([^']*)'|"([^"]*)")"#).expect("attribute pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub index: i64,
    pub tag: String,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedElements {
    pub elements: Vec<ElementRecord>,
    pub raw_text: String,
}

/// Interactive-element snapshot as it is handed to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementSnapshot {
    Parsed(ParsedElements),
    /// Input that did not have the `{content: [...]}` shape, kept as is.
    Raw(Value),
}

impl ElementSnapshot {
    pub fn empty() -> Self {
        ElementSnapshot::Raw(Value::Array(Vec::new()))
    }

    pub fn elements(&self) -> &[ElementRecord] {
        match self {
            ElementSnapshot::Parsed(parsed) => &parsed.elements,
            ElementSnapshot::Raw(_) => &[],
        }
    }
}

/// Parses a `{content: [{text: ...}, ...]}` dump into element records.
///
/// Lines that do not look like `[<index>]<tag attrs>text/>` are skipped.
pub fn parse_snapshot(raw: Value) -> ElementSnapshot {
    let Some(content) = raw.get("content").and_then(Value::as_array) else {
        return ElementSnapshot::Raw(raw);
    };

    let raw_text = content
        .iter()
        .filter_map(|item| item.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("\n");

    let elements = raw_text.lines().filter_map(parse_line).collect();

    ElementSnapshot::Parsed(ParsedElements { elements, raw_text })
}

fn parse_line(line: &str) -> Option<ElementRecord> {
    let caps = ELEMENT_LINE.captures(line)?;
    let index = caps[1].parse::<i64>().ok()?;
    let tag = caps[2].to_string();

    let attributes = ATTRIBUTE
        .captures_iter(&caps[3])
        .filter_map(|attr| {
            let value = attr.get(2).or_else(|| attr.get(3))?;
            Some((attr[1].to_string(), value.as_str().to_string()))
        })
        .collect();

    Some(ElementRecord {
        index,
        tag,
        text: caps[4].trim().to_string(),
        attributes,
    })
}
