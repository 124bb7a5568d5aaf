//! Narrative stage parsing and validation.
//!
//! Scenario calls run in JSON mode with a response schema, but model
//! output still drifts: fenced code blocks, trailing commas, camelCase
//! keys. This module recovers what it can and validates the result, so
//! a malformed response becomes a clean error (and then a fallback)
//! instead of a broken stage.

use babai_types::StageScenario;
use serde_json::{json, Value};

use crate::error::ContentError;

/// Number of choices every stage offers.
const OPTION_COUNT: usize = 3;

/// The response schema sent with scenario requests.
///
/// Mirrors [`StageScenario`]; keeping the schema next to the parser
/// means a field rename cannot silently split the two.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "text": {"type": "STRING", "description": "Situation description"},
            "options": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "Exactly 3 player choices"
            },
            "correct_answer": {
                "type": "INTEGER",
                "description": "Index (0, 1 or 2) of the evicting choice"
            },
            "success_text": {"type": "STRING", "description": "Outcome of the correct choice"},
            "failure_text": {"type": "STRING", "description": "Outcome of a wrong choice"}
        },
        "required": ["text", "options", "correct_answer", "success_text", "failure_text"]
    })
}

/// Raw wire shape, tolerant of camelCase key spellings.
#[derive(Debug, serde::Deserialize)]
struct RawScenario {
    text: String,
    options: Vec<String>,
    #[serde(alias = "correctAnswer")]
    correct_answer: usize,
    #[serde(alias = "successText")]
    success_text: String,
    #[serde(alias = "failureText")]
    failure_text: String,
}

/// Parse a scenario response through multiple recovery strategies.
///
/// 1. Direct `serde_json` deserialization
/// 2. Extract JSON from a fenced code block
/// 3. Strip trailing commas and retry
///
/// # Errors
///
/// Returns [`ContentError::Parse`] when every strategy fails or the
/// parsed scenario fails validation.
pub fn parse_scenario(raw: &str) -> Result<StageScenario, ContentError> {
    let trimmed = raw.trim();

    if let Ok(parsed) = serde_json::from_str::<RawScenario>(trimmed) {
        return validate(parsed);
    }

    if let Some(inner) = extract_json_from_codeblock(trimmed)
        && let Ok(parsed) = serde_json::from_str::<RawScenario>(inner)
    {
        return validate(parsed);
    }

    let cleaned = strip_trailing_commas(trimmed);
    if let Ok(parsed) = serde_json::from_str::<RawScenario>(&cleaned) {
        return validate(parsed);
    }

    Err(ContentError::Parse(format!(
        "all scenario parse strategies failed for: {trimmed}"
    )))
}

/// Check the parsed scenario is actually playable.
fn validate(raw: RawScenario) -> Result<StageScenario, ContentError> {
    if raw.text.trim().is_empty() {
        return Err(ContentError::Parse("scenario text is empty".to_owned()));
    }
    if raw.options.len() != OPTION_COUNT {
        return Err(ContentError::Parse(format!(
            "expected {OPTION_COUNT} options, got {}",
            raw.options.len()
        )));
    }
    if raw.correct_answer >= raw.options.len() {
        return Err(ContentError::Parse(format!(
            "correct_answer {} out of range",
            raw.correct_answer
        )));
    }
    Ok(StageScenario {
        text: raw.text,
        options: raw.options,
        correct_answer: raw.correct_answer,
        success_text: raw.success_text,
        failure_text: raw.failure_text,
    })
}

/// Extract the body of the first fenced code block, if any.
fn extract_json_from_codeblock(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = text.get(start.checked_add(3)?..)?;
    // Skip an optional language tag on the fence line.
    let body_start = after_fence.find('\n').map_or(0, |i| i.saturating_add(1));
    let body = after_fence.get(body_start..)?;
    let end = body.find("```")?;
    body.get(..end)
}

/// Remove trailing commas before closing brackets.
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ',' {
            // Lookahead past whitespace for a closing bracket.
            let mut rest = chars.clone();
            let mut next_meaningful = None;
            for n in rest.by_ref() {
                if !n.is_whitespace() {
                    next_meaningful = Some(n);
                    break;
                }
            }
            if matches!(next_meaningful, Some('}' | ']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}
