// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured-output parsing for backend answers.
//!
//! Backends are asked for JSON but frequently wrap it in Markdown fences or
//! prose, or drift from the schema. Parsing here is tolerant of that; when
//! nothing usable remains the caller gets [`ParsedOutput::Unstructured`] and
//! applies its own fallback.

use postcraft_core::types::GeneratedContent;
use serde::Deserialize;

/// Maximum hashtags kept from a structured answer.
pub const MAX_HASHTAGS: usize = 5;

/// Maximum platform tips kept from a structured answer.
pub const MAX_PLATFORM_TIPS: usize = 3;

/// Outcome of parsing a backend answer against the content schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedOutput {
    Structured(GeneratedContent),
    Unstructured { raw: String, reason: String },
}

/// A list field the backend may send as an array or as one string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListField {
    Many(Vec<serde_json::Value>),
    One(String),
}

impl Default for ListField {
    fn default() -> Self {
        ListField::Many(Vec::new())
    }
}

impl ListField {
    fn items(self, split_whitespace: bool) -> Vec<String> {
        match self {
            ListField::Many(values) => values
                .into_iter()
                .filter_map(|v| match v {
                    serde_json::Value::String(s) => Some(s),
                    serde_json::Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect(),
            ListField::One(s) if split_whitespace => {
                s.split_whitespace().map(str::to_string).collect()
            }
            ListField::One(s) => s.lines().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawContent {
    content: String,
    #[serde(default)]
    hashtags: Option<ListField>,
    #[serde(default)]
    suggested_time: Option<String>,
    #[serde(default)]
    linkedin_tips: Option<ListField>,
}

/// Strip Markdown code fences and surrounding prose, keeping the span from
/// the first `open` to the last `close` delimiter.
fn extract_span(raw: &str, open: char, close: char) -> Option<&str> {
    let start = raw.find(open)?;
    let end = raw.rfind(close)?;
    (end > start).then(|| &raw[start..=end])
}

/// Parse a backend answer as [`GeneratedContent`].
pub fn parse_generated_content(raw: &str) -> ParsedOutput {
    let unstructured = |reason: String| ParsedOutput::Unstructured {
        raw: raw.to_string(),
        reason,
    };

    let Some(json) = extract_span(raw.trim(), '{', '}') else {
        return unstructured("no JSON object in response".to_string());
    };

    let parsed: RawContent = match serde_json::from_str(json) {
        Ok(parsed) => parsed,
        Err(e) => return unstructured(format!("invalid JSON: {e}")),
    };

    let content = parsed.content.trim();
    if content.is_empty() {
        return unstructured("empty content field".to_string());
    }

    let hashtags = parsed
        .hashtags
        .unwrap_or_default()
        .items(true)
        .into_iter()
        .map(|tag| tag.trim().trim_start_matches('#').trim().to_string())
        .filter(|tag| !tag.is_empty())
        .take(MAX_HASHTAGS)
        .collect();

    let linkedin_tips = parsed
        .linkedin_tips
        .unwrap_or_default()
        .items(false)
        .into_iter()
        .map(|tip| tip.trim().to_string())
        .filter(|tip| !tip.is_empty())
        .take(MAX_PLATFORM_TIPS)
        .collect();

    ParsedOutput::Structured(GeneratedContent {
        content: content.to_string(),
        hashtags,
        suggested_time: parsed.suggested_time.unwrap_or_default().trim().to_string(),
        linkedin_tips,
    })
}

/// Parse a backend answer as a JSON array of strings.
///
/// Returns `None` when no array can be found or it contains no strings.
pub fn parse_string_list(raw: &str) -> Option<Vec<String>> {
    let json = extract_span(raw.trim(), '[', ']')?;
    let values: Vec<serde_json::Value> = serde_json::from_str(json).ok()?;
    let items: Vec<String> = values
        .into_iter()
        .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty())
        .collect();
    (!items.is_empty()).then_some(items)
}
