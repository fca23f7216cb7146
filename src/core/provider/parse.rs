//! Parsing of chat completion responses
//!
//! Search content follows response schema v1: a JSON array of entries,
//! or an object with a `results` array and an optional `error` string.
//! The model may wrap the JSON in a Markdown fence or add prose around
//! it, so the first complete JSON value embedded in the text is parsed.
//!
//! Entry fields and accepted aliases:
//!
//! | field            | aliases                     |
//! |------------------|-----------------------------|
//! | `title`          | `name`                      |
//! | `url`            | `link`, `href`              |
//! | `description`    | `snippet`, `summary`        |
//! | `source`         | `platform`, `site`          |
//! | `published_date` | `date`, `publishedDate`     |

use crate::core::error::{GrokSearchError, Result};
use crate::core::types::SearchResult;
use serde_json::{Map, Value};

/// Pull the assistant text out of a chat completion body
///
/// Accepts both string content and the array-of-parts form.
pub fn extract_message_content(body: &Value) -> Option<String> {
    let content = body
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?;

    let text = match content {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join(""),
        _ => return None,
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse search content into at most `max_results` ranked results
///
/// Entries without a title or url are skipped.
pub fn parse_search_content(content: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let value = parse_json_lenient(content).ok_or_else(|| {
        GrokSearchError::SearchError(format!(
            "response content is not valid JSON: {}",
            preview(content, 120)
        ))
    })?;

    let entries = match value {
        Value::Array(items) => items,
        Value::Object(map) => entries_from_object(map)?,
        other => {
            return Err(GrokSearchError::SearchError(format!(
                "expected a JSON array of results, got {}",
                json_kind(&other)
            )))
        }
    };

    Ok(entries
        .iter()
        .filter_map(entry_to_result)
        .take(max_results)
        .enumerate()
        .map(|(i, result)| result.with_rank(i + 1))
        .collect())
}

fn entries_from_object(mut map: Map<String, Value>) -> Result<Vec<Value>> {
    let error = map
        .get("error")
        .and_then(|e| e.as_str())
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string);

    let results = match map.remove("results") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(GrokSearchError::SearchError(
                "'results' field is not an array".to_string(),
            ))
        }
        None if error.is_none() && has_any(&map, &["url", "link", "href"]) => {
            vec![Value::Object(map)]
        }
        None => Vec::new(),
    };

    if let Some(message) = error {
        if !results.iter().any(|entry| entry_to_result(entry).is_some()) {
            return Err(GrokSearchError::SearchError(format!(
                "backend reported: {message}"
            )));
        }
    }

    Ok(results)
}

fn entry_to_result(entry: &Value) -> Option<SearchResult> {
    let obj = entry.as_object()?;

    let title = str_field(obj, &["title", "name"])?;
    let url = str_field(obj, &["url", "link", "href"])?;
    let snippet = str_field(obj, &["description", "snippet", "summary"]).unwrap_or_default();

    let mut result = SearchResult::new(title, url, snippet)?;
    if let Some(source) = str_field(obj, &["source", "platform", "site"]) {
        result = result.with_source(source);
    }
    if let Some(date) = str_field(obj, &["published_date", "date", "publishedDate"]) {
        result = result.with_published_date(date);
    }
    Some(result)
}

fn str_field<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| obj.get(*name).and_then(|v| v.as_str()))
        .find(|s| !s.trim().is_empty())
}

fn has_any(obj: &Map<String, Value>, names: &[&str]) -> bool {
    names.iter().any(|name| obj.contains_key(*name))
}

fn parse_json_lenient(content: &str) -> Option<Value> {
    let stripped = strip_code_fence(content.trim());
    if let Ok(value) = serde_json::from_str(stripped) {
        return Some(value);
    }

    first_embedded_value(stripped)
}

/// First array or object embedded in prose
///
/// Each `[`/`{` is tried in turn and parsing stops at the end of the
/// first complete value, so brackets in text before or after the JSON
/// (`Results for [rust]:`, `Sources: [1]`) do not matter. Arrays of
/// bare scalars are citation markers, not results.
fn first_embedded_value(content: &str) -> Option<Value> {
    content
        .char_indices()
        .filter(|(_, c)| *c == '[' || *c == '{')
        .find_map(|(start, _)| {
            let value = serde_json::Deserializer::from_str(&content[start..])
                .into_iter::<Value>()
                .next()?
                .ok()?;
            match &value {
                Value::Object(_) => Some(value),
                Value::Array(items)
                    if items.is_empty() || items.iter().any(Value::is_object) =>
                {
                    Some(value)
                }
                _ => None,
            }
        })
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Skip the info string (```json)
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// First `max_chars` characters of `text`, on one line
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars).collect();
    format!("{cut}...")
}
