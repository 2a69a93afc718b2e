//! Generation request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for the `:generate` method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: Prompt,

    /// Sampling temperature (0.0-1.0)
    pub temperature: f64,

    /// Maximum tokens to generate
    pub max_output_tokens: u32,
}

/// Text prompt wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub text: String,
}

impl GenerateRequest {
    pub fn new(text: impl Into<String>, temperature: f64, max_output_tokens: u32) -> Self {
        Self {
            prompt: Prompt { text: text.into() },
            temperature,
            max_output_tokens,
        }
    }
}

/// Pull the answer text out of a successful response body
///
/// Shapes are tried in order:
///
/// 1. `candidates`: text of the first candidate, or that candidate as JSON
///    when it carries no text
/// 2. `output`: text of every entry joined by newlines, or the array as JSON
///    when the join is empty
/// 3. anything else: the whole body as JSON
///
/// Entry text is the concatenation of `content[].text`, or of
/// `content.parts[].text` for the newer response shape.
pub fn extract_text(body: &Value) -> String {
    if let Some(first) = non_empty_array(body, "candidates").and_then(|c| c.first()) {
        let text = entry_text(first);
        return if text.is_empty() { first.to_string() } else { text };
    }

    if let Some(outputs) = non_empty_array(body, "output") {
        let text = outputs.iter().map(entry_text).collect::<Vec<_>>().join("\n");
        return if text.is_empty() {
            Value::Array(outputs.clone()).to_string()
        } else {
            text
        };
    }

    body.to_string()
}

fn non_empty_array<'a>(body: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    body.get(key)
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
}

fn entry_text(entry: &Value) -> String {
    let parts = match entry.get("content") {
        Some(Value::Array(parts)) => parts,
        Some(content) => match content.get("parts").and_then(Value::as_array) {
            Some(parts) => parts,
            None => return String::new(),
        },
        None => return String::new(),
    };

    parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect()
}
