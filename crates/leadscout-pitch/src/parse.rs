//! Lenient parsing of untrusted model output.
//!
//! The reply is untrusted free-form text. Three shapes are accepted once any
//! Markdown code fence is stripped:
//!
//! - `{"pitches": [{"placeId": ..., ...}, ...]}`
//! - a bare array of pitch objects
//! - an object keyed by place id: `{"<placeId>": {"vibeSummary": ..., ...}}`
//!
//! Entries without a place id or message are dropped individually.

use std::sync::LazyLock;

use leadscout_core::Pitch;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::PitchError;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)\s*```\s*$").expect("valid fence regex")
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPitch {
    #[serde(default, alias = "place_id")]
    place_id: Option<String>,
    #[serde(default, alias = "vibe_summary")]
    vibe_summary: Option<String>,
    #[serde(default)]
    angle: Option<String>,
    #[serde(default, alias = "personalized_message", alias = "message")]
    personalized_message: Option<String>,
}

/// Removes a surrounding Markdown code fence (with or without a language tag).
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    match CODE_FENCE.captures(text).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => text.trim(),
    }
}

/// Parses pitches out of raw model output.
///
/// # Errors
///
/// Returns [`PitchError::Parse`] when no JSON value of a recognised shape
/// can be found in `raw`.
pub fn parse_pitches(raw: &str) -> Result<Vec<Pitch>, PitchError> {
    let text = strip_code_fences(raw);
    let mut first_outcome = None;

    for value in json_candidates(text) {
        match pitches_from_value(value) {
            Ok(pitches) if !pitches.is_empty() => return Ok(pitches),
            outcome => {
                first_outcome.get_or_insert(outcome);
            }
        }
    }

    first_outcome
        .unwrap_or_else(|| Err(PitchError::Parse("output is not valid JSON".to_string())))
}

fn pitches_from_value(value: Value) -> Result<Vec<Pitch>, PitchError> {
    let entries: Vec<(Option<String>, Value)> = match value {
        Value::Array(items) => items.into_iter().map(|v| (None, v)).collect(),
        Value::Object(mut map) => match map.remove("pitches") {
            Some(Value::Array(items)) => items.into_iter().map(|v| (None, v)).collect(),
            Some(_) => {
                return Err(PitchError::Parse("\"pitches\" is not an array".to_string()));
            }
            None if is_single_pitch(&map) => vec![(None, Value::Object(map))],
            None => map
                .into_iter()
                .filter(|(_, v)| v.is_object())
                .map(|(k, v)| (Some(k), v))
                .collect(),
        },
        _ => {
            return Err(PitchError::Parse(
                "expected a JSON object or array".to_string(),
            ));
        }
    };

    let total = entries.len();
    let pitches: Vec<Pitch> = entries
        .into_iter()
        .filter_map(|(key, v)| to_pitch(key, v))
        .collect();

    if pitches.len() != total {
        tracing::debug!(
            total,
            kept = pitches.len(),
            "dropped incomplete pitch entries"
        );
    }

    Ok(pitches)
}

/// A lone pitch object rather than a map keyed by place id.
fn is_single_pitch(map: &Map<String, Value>) -> bool {
    ["placeId", "place_id", "personalizedMessage", "personalized_message"]
        .iter()
        .any(|key| map.get(*key).is_some_and(Value::is_string))
}

/// JSON values worth trying, in order: the whole text, then the outermost
/// `{...}` and `[...]` spans starting with whichever delimiter comes first.
/// Tolerates prose around the JSON.
fn json_candidates(text: &str) -> Vec<Value> {
    if let Ok(v) = serde_json::from_str::<Value>(text) {
        return vec![v];
    }

    let mut spans: Vec<(usize, char)> = [('{', '}'), ('[', ']')]
        .iter()
        .filter_map(|&(open, close)| text.find(open).map(|start| (start, close)))
        .collect();
    spans.sort_by_key(|&(start, _)| start);

    spans
        .into_iter()
        .filter_map(|(start, close)| {
            let end = text.rfind(close)?;
            if end <= start {
                return None;
            }
            serde_json::from_str::<Value>(&text[start..=end]).ok()
        })
        .collect()
}

fn to_pitch(key: Option<String>, value: Value) -> Option<Pitch> {
    let raw: RawPitch = serde_json::from_value(value).ok()?;
    let place_id = non_blank(raw.place_id).or_else(|| key.and_then(|k| non_blank(Some(k))))?;
    let personalized_message = non_blank(raw.personalized_message)?;
    Some(Pitch {
        place_id,
        vibe_summary: non_blank(raw.vibe_summary).unwrap_or_default(),
        angle: non_blank(raw.angle).unwrap_or_default(),
        personalized_message,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
