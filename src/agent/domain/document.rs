//! Agent document parsing: `---` delimited YAML header followed by a markdown body.

use super::agent::Agent;
use crate::error::ParseError;
use serde::Deserialize;
use std::collections::BTreeSet;

const SENTINEL: &str = "---";

/// Header keys recognized in an agent document. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct AgentHeader {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tools: Option<TagList>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    mcp: Option<TagList>,
}

/// A set-valued header entry written either as `a, b` or as a YAML list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagList {
    Inline(String),
    List(Vec<String>),
}

impl TagList {
    fn into_set(self) -> BTreeSet<String> {
        let items: Vec<String> = match self {
            TagList::Inline(s) => s.split(',').map(str::to_string).collect(),
            TagList::List(items) => items,
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

fn is_sentinel(line: &str) -> bool {
    line.trim_end() == SENTINEL
}

/// Split a raw document into `(header, body)`.
///
/// The first line must be the sentinel; the header ends at the next sentinel line
/// and the body is every byte after that line. Returns `None` when either
/// sentinel is missing.
pub fn split_document(raw: &str) -> Option<(&str, &str)> {
    let mut lines = raw.split_inclusive('\n');
    let first = lines.next()?;
    if !is_sentinel(first) {
        return None;
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if is_sentinel(line) {
            return Some((&raw[header_start..offset], &raw[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse one catalog document into an [`Agent`].
///
/// `identifier` is the document stem and `source` names the document in errors.
pub fn parse_agent(identifier: &str, source: &str, raw: &str) -> Result<Agent, ParseError> {
    let (header, body) = split_document(raw).ok_or_else(|| {
        ParseError::invalid_format(source, "missing '---' delimited header block")
    })?;

    let value: serde_yaml::Value = serde_yaml::from_str(header)
        .map_err(|e| ParseError::invalid_format(source, format!("malformed header: {}", e)))?;
    let header: AgentHeader = match value {
        serde_yaml::Value::Null => AgentHeader::default(),
        serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value).map_err(|e| {
            ParseError::invalid_format(source, format!("malformed header: {}", e))
        })?,
        _ => {
            return Err(ParseError::invalid_format(
                source,
                "header must be a key: value mapping",
            ))
        }
    };

    let description = header
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ParseError::missing_field(source, "description"))?;

    let name = header
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| identifier.to_string());

    let model = header
        .model
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());

    Ok(Agent {
        identifier: identifier.to_string(),
        name,
        description,
        tools: header.tools.map(TagList::into_set).unwrap_or_default(),
        model,
        integrations: header.mcp.map(TagList::into_set).unwrap_or_default(),
        content: body.to_string(),
        source: source.to_string(),
    })
}
