use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::models::Event;

const PREVIEW_CHARS: usize = 500;

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        format!("{}...", text.chars().take(PREVIEW_CHARS).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Parse an events file.
pub fn parse_events_json(json_path: &Path) -> Result<Vec<Event>> {
    let json_content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;

    parse_events_json_str(&json_content)
}

/// Parse events from a string.
///
/// Accepts either a bare array of events or the API envelope
/// `{"events": [...]}`. Extra fields on events are ignored. A malformed
/// event fails the whole payload, naming the offending index.
pub fn parse_events_json_str(json_str: &str) -> Result<Vec<Event>> {
    let json_value: Value = serde_json::from_str(json_str).with_context(|| {
        format!(
            "Invalid JSON syntax. First {} chars: {}",
            PREVIEW_CHARS,
            preview(json_str)
        )
    })?;

    parse_events_value(json_value)
}

/// Parse events from an already decoded JSON value (same shapes as
/// [`parse_events_json_str`]).
pub fn parse_events_value(json_value: Value) -> Result<Vec<Event>> {
    let items = match json_value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("events") {
            Some(Value::Array(items)) => items,
            Some(other) => anyhow::bail!(
                "'events' must be an array, found {}",
                json_type_name(&other)
            ),
            None => anyhow::bail!(
                "JSON object must contain an 'events' key. Found keys: {:?}",
                object.keys().collect::<Vec<_>>()
            ),
        },
        other => anyhow::bail!(
            "Expected an array of events or an object with 'events', found {}",
            json_type_name(&other)
        ),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let id_hint = item
                .get("id")
                .map(|id| id.to_string())
                .unwrap_or_else(|| "<missing>".to_string());
            serde_json::from_value::<Event>(item)
                .with_context(|| format!("Error in event at index {} (id {})", idx, id_hint))
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
