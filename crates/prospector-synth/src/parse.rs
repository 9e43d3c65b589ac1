//! Single-entity response parsing.
//!
//! Model replies are free text that usually wrap one JSON object. The parser
//! takes the widest `{...}` span, decodes it, and normalizes field shapes
//! without rejecting the reply for missing fields; required-field backfill is
//! left to the orchestrator.

use std::sync::LazyLock;

use prospector_core::{CompanyAnalysis, DecisionMaker};
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ParseError;

/// Greedy: first `{` through last `}`, across newlines.
static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid JSON span regex"));

/// Return the first JSON-object-shaped span of `raw`, if any.
#[must_use]
pub fn extract_json_span(raw: &str) -> Option<&str> {
    JSON_OBJECT.find(raw).map(|m| m.as_str())
}

/// Parse a model reply into a [`CompanyAnalysis`].
///
/// Normalization rules:
/// - `painPoints` and each decision maker's `concerns` accept a bare string
///   as a one-element list.
/// - `decisionMakers` absent, not a list, or with no usable entries falls back
///   to [`DecisionMaker::defaults`]. Entries that are not objects, or lack a
///   string `title`, are skipped.
/// - Missing or ill-typed `profile`, `painPoints`, `techStack`,
///   `outreachAngle` come back empty.
///
/// # Errors
///
/// [`ParseError::NoJsonObject`] when the reply has no `{...}` span, and
/// [`ParseError::InvalidJson`] when the span does not decode.
pub fn parse_analysis(raw: &str) -> Result<CompanyAnalysis, ParseError> {
    let span = extract_json_span(raw).ok_or(ParseError::NoJsonObject)?;
    let value: Value = serde_json::from_str(span).map_err(ParseError::InvalidJson)?;
    let Value::Object(fields) = value else {
        return Err(ParseError::NoJsonObject);
    };

    Ok(CompanyAnalysis {
        profile: string_field(&fields, "profile"),
        pain_points: string_list(fields.get("painPoints")),
        tech_stack: string_field(&fields, "techStack"),
        outreach_angle: string_field(&fields, "outreachAngle"),
        decision_makers: decision_makers(fields.get("decisionMakers")),
    })
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn decision_makers(value: Option<&Value>) -> Vec<DecisionMaker> {
    let Some(Value::Array(entries)) = value else {
        return DecisionMaker::defaults();
    };

    let parsed: Vec<DecisionMaker> = entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|entry| {
            let title = entry.get("title")?.as_str()?.trim();
            if title.is_empty() {
                return None;
            }
            Some(DecisionMaker {
                title: title.to_string(),
                concerns: string_list(entry.get("concerns")),
            })
        })
        .collect();

    if parsed.is_empty() {
        DecisionMaker::defaults()
    } else {
        parsed
    }
}
