// file: src/models/schema.rs
// description: declared response shapes and coercion of raw agent answers into them
// reference: https://docs.rs/schemars

use crate::error::ParseError;
use lazy_static::lazy_static;
use regex::Regex;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

lazy_static! {
    static ref FENCED_JSON: Regex =
        Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("valid regex");
}

/// A typed answer the agent is asked to produce.
pub trait ResponseShape: Serialize + DeserializeOwned + JsonSchema + Send + 'static {
    const NAME: &'static str;
}

/// Type-erased form of a [`ResponseShape`] that travels with a task.
#[derive(Debug, Clone)]
pub struct ResponseSchema {
    pub name: &'static str,
    pub definition: Value,
    check: fn(&str) -> bool,
}

impl ResponseSchema {
    pub fn of<S: ResponseShape>() -> Self {
        let definition = serde_json::to_value(schemars::schema_for!(S)).unwrap_or(Value::Null);
        Self {
            name: S::NAME,
            definition,
            check: fits::<S>,
        }
    }

    /// Whether `raw` would parse into the shape this schema was built from.
    pub fn accepts(&self, raw: &str) -> bool {
        (self.check)(raw)
    }

    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.definition).unwrap_or_else(|_| "{}".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CodeReviewResponse {
    pub repository: String,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ResponseShape for CodeReviewResponse {
    const NAME: &'static str = "CodeReviewResponse";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SentryIssuesResponse {
    #[serde(alias = "sentryIssues")]
    pub sentry_issues: Vec<String>,
    #[serde(alias = "recommendedFixes")]
    pub recommended_fixes: Vec<String>,
}

impl ResponseShape for SentryIssuesResponse {
    const NAME: &'static str = "SentryIssuesResponse";
}

/// Coerces a free-form model answer into `S`.
///
/// Accepts bare JSON, a fenced ```json block, or prose surrounding a single
/// JSON object.
pub fn parse_into_schema<S: ResponseShape>(raw: &str) -> Result<S, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let candidate = extract_json_object(trimmed).ok_or(ParseError::NoJsonObject)?;

    serde_json::from_str(candidate).map_err(|source| ParseError::Mismatch {
        schema: S::NAME,
        source,
    })
}

fn fits<S: ResponseShape>(raw: &str) -> bool {
    parse_into_schema::<S>(raw).is_ok()
}

/// Finds the JSON object in a model answer: a fenced block first, otherwise
/// the first `{` in the prose that opens a complete, non-empty object.
fn extract_json_object(text: &str) -> Option<&str> {
    if let Some(captures) = FENCED_JSON.captures(text) {
        return captures.get(1).map(|m| m.as_str());
    }

    text.match_indices('{').find_map(|(start, _)| {
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(map))) if !map.is_empty() => Some(&text[start..start + stream.byte_offset()]),
            _ => None,
        }
    })
}
