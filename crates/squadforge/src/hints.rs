//! Planner hint sources.
//!
//! Hints are free text. A planner answers with a JSON object carrying a
//! `seed_names` list; anything else is a [`HintError`], which callers turn
//! into "no hints" through [`resolve_hints`].

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::HintError;

/// Supplies an ordered list of hints.
pub trait HintSource {
    fn hints(&self) -> Result<Vec<String>, HintError>;
}

/// A fixed hint list.
#[derive(Debug, Clone, Default)]
pub struct StaticHintSource {
    hints: Vec<String>,
}

impl StaticHintSource {
    pub fn new<I, S>(hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hints: hints.into_iter().map(Into::into).collect(),
        }
    }
}

impl HintSource for StaticHintSource {
    fn hints(&self) -> Result<Vec<String>, HintError> {
        Ok(self.hints.clone())
    }
}

/// A raw planner reply, parsed on demand.
#[derive(Debug, Clone)]
pub struct PayloadHintSource {
    payload: String,
}

impl PayloadHintSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl HintSource for PayloadHintSource {
    fn hints(&self) -> Result<Vec<String>, HintError> {
        parse_hint_payload(&self.payload)
    }
}

#[derive(Debug, Deserialize)]
struct HintPayload {
    #[serde(default)]
    seed_names: Value,
}

/// Parses a planner reply of the form `{"seed_names": ["..", ..]}`.
///
/// A reply wrapped in a Markdown code fence is unwrapped first. A missing or
/// null `seed_names` yields an empty list.
///
/// # Example
///
/// ```
/// use squadforge::hints::parse_hint_payload;
///
/// let hints = parse_hint_payload(r#"{"seed_names": ["Saka", "Haaland"]}"#).unwrap();
/// assert_eq!(hints, vec!["Saka", "Haaland"]);
/// assert!(parse_hint_payload(r#"{"seed_names": "Saka"}"#).is_err());
/// ```
pub fn parse_hint_payload(payload: &str) -> Result<Vec<String>, HintError> {
    let payload: HintPayload = serde_json::from_str(strip_code_fence(payload))?;
    match payload.seed_names {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                Value::String(name) => Ok(name),
                _ => Err(HintError::NotAString(index)),
            })
            .collect(),
        Value::Bool(_) => Err(HintError::NotAList("a boolean")),
        Value::Number(_) => Err(HintError::NotAList("a number")),
        Value::String(_) => Err(HintError::NotAList("a string")),
        Value::Object(_) => Err(HintError::NotAList("an object")),
    }
}

fn strip_code_fence(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_suffix("```").unwrap_or(body);
    // Drop an info string such as `json` on the opening line.
    match body.split_once('\n') {
        Some((info, rest)) if !info.trim_start().starts_with('{') => rest.trim(),
        _ => body.trim(),
    }
}

/// Reads hints, degrading any error to an empty list.
pub fn resolve_hints(source: &dyn HintSource) -> Vec<String> {
    match source.hints() {
        Ok(hints) => hints,
        Err(error) => {
            warn!(event = "hints_unavailable", error = %error);
            Vec::new()
        }
    }
}
