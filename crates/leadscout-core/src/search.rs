//! Inbound search request and the rules that turn a raw body into a typed
//! [`SearchRequest`].
//!
//! Validation collects every violated field before returning, so a client
//! can fix its whole form in one round trip.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const MIN_TEXT_CHARS: usize = 2;
pub const DEFAULT_RADIUS: u32 = 5_000;
pub const RADIUS_RANGE: RangeInclusive<u32> = 500..=50_000;
pub const DEFAULT_MAX_RESULTS: u32 = 5;
pub const MAX_RESULTS_RANGE: RangeInclusive<u32> = 1..=8;
pub const MAX_VIBE_CHARS: usize = 280;
pub const MAX_TONE_CHARS: usize = 120;

/// Request body as received from a client, before any type or range checks.
///
/// Every field is an untyped JSON value so that a wrong type (for example
/// `"radius": "far"`) becomes a field-level error instead of rejecting the
/// whole body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchRequest {
    #[serde(default)]
    pub query: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default)]
    pub radius: Option<Value>,
    #[serde(default)]
    pub max_results: Option<Value>,
    #[serde(default)]
    pub vibe: Option<Value>,
    #[serde(default)]
    pub tone: Option<Value>,
}

/// A validated search request. Radius is in metres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub location: String,
    pub radius: u32,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

/// Per-field validation messages, keyed by the camelCase field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid search request: {0}")]
pub struct ValidationError(pub FieldErrors);

impl RawSearchRequest {
    /// Checks every field and returns a typed request, or all violations at once.
    ///
    /// `radius` and `maxResults` fall back to their defaults when absent or
    /// `null`. Integer fields also accept numeric strings, which is what HTML
    /// form inputs submit. Blank `vibe`/`tone` values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every invalid field.
    pub fn validate(self) -> Result<SearchRequest, ValidationError> {
        let mut errors = FieldErrors::default();

        let query = required_text(&mut errors, "query", self.query);
        let location = required_text(&mut errors, "location", self.location);
        let radius = bounded_int(
            &mut errors,
            "radius",
            self.radius,
            DEFAULT_RADIUS,
            &RADIUS_RANGE,
        );
        let max_results = bounded_int(
            &mut errors,
            "maxResults",
            self.max_results,
            DEFAULT_MAX_RESULTS,
            &MAX_RESULTS_RANGE,
        );
        let vibe = optional_text(&mut errors, "vibe", self.vibe, MAX_VIBE_CHARS);
        let tone = optional_text(&mut errors, "tone", self.tone, MAX_TONE_CHARS);

        match (query, location, radius, max_results, vibe, tone) {
            (Some(query), Some(location), Some(radius), Some(max_results), Some(vibe), Some(tone))
                if errors.is_empty() =>
            {
                Ok(SearchRequest {
                    query,
                    location,
                    radius,
                    max_results,
                    vibe,
                    tone,
                })
            }
            _ => Err(ValidationError(errors)),
        }
    }
}

impl SearchRequest {
    /// Number of candidates to detail-fetch: twice `max_results`, capped at
    /// what the search actually returned.
    #[must_use]
    pub fn candidate_limit(&self, available: usize) -> usize {
        let wanted = usize::try_from(self.max_results.saturating_mul(2)).unwrap_or(usize::MAX);
        available.min(wanted)
    }

    #[must_use]
    pub fn max_results_usize(&self) -> usize {
        usize::try_from(self.max_results).unwrap_or(usize::MAX)
    }
}

fn required_text(errors: &mut FieldErrors, field: &str, value: Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => {
            errors.push(field, format!("{field} is required"));
            None
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.chars().count() < MIN_TEXT_CHARS {
                errors.push(
                    field,
                    format!("{field} must be at least {MIN_TEXT_CHARS} characters"),
                );
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            errors.push(field, format!("{field} must be a string"));
            None
        }
    }
}

fn optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<Value>,
    max_chars: usize,
) -> Option<Option<String>> {
    match value {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(None)
            } else if trimmed.chars().count() > max_chars {
                errors.push(
                    field,
                    format!("{field} must be at most {max_chars} characters"),
                );
                None
            } else {
                Some(Some(trimmed.to_string()))
            }
        }
        Some(_) => {
            errors.push(field, format!("{field} must be a string"));
            None
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn bounded_int(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<Value>,
    default: u32,
    range: &RangeInclusive<u32>,
) -> Option<u32> {
    let parsed = match value {
        None | Some(Value::Null) => return Some(default),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
                    .map(|f| f as i128)
            }),
        Some(Value::String(s)) => s.trim().parse::<i128>().ok(),
        Some(_) => None,
    };

    let Some(parsed) = parsed else {
        errors.push(field, format!("{field} must be an integer"));
        return None;
    };

    match u32::try_from(parsed) {
        Ok(v) if range.contains(&v) => Some(v),
        _ => {
            errors.push(
                field,
                format!(
                    "{field} must be between {} and {}",
                    range.start(),
                    range.end()
                ),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(body: Value) -> RawSearchRequest {
        serde_json::from_value(body).expect("raw request should deserialize")
    }

    #[test]
    fn defaults_applied_when_radius_and_max_results_omitted() {
        let req = raw(json!({ "query": "restaurant", "location": "Paris, France" }))
            .validate()
            .expect("valid request");
        assert_eq!(req.radius, 5_000);
        assert_eq!(req.max_results, 5);
        assert!(req.vibe.is_none());
        assert!(req.tone.is_none());
    }

    #[test]
    fn null_numeric_fields_use_defaults() {
        let req = raw(json!({
            "query": "bakery",
            "location": "Lyon",
            "radius": null,
            "maxResults": null
        }))
        .validate()
        .expect("valid request");
        assert_eq!(req.radius, DEFAULT_RADIUS);
        assert_eq!(req.max_results, DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn accepts_bounds_inclusive() {
        let low = raw(json!({ "query": "ab", "location": "cd", "radius": 500, "maxResults": 1 }))
            .validate()
            .expect("lower bounds are valid");
        assert_eq!((low.radius, low.max_results), (500, 1));

        let high = raw(json!({
            "query": "ab", "location": "cd", "radius": 50_000, "maxResults": 8
        }))
        .validate()
        .expect("upper bounds are valid");
        assert_eq!((high.radius, high.max_results), (50_000, 8));
    }

    #[test]
    fn rejects_out_of_range_integers() {
        let err = raw(json!({
            "query": "cafe", "location": "Rome", "radius": 499, "maxResults": 9
        }))
        .validate()
        .expect_err("out of range");
        assert_eq!(
            err.0.get("radius"),
            Some(&["radius must be between 500 and 50000".to_string()][..])
        );
        assert_eq!(
            err.0.get("maxResults"),
            Some(&["maxResults must be between 1 and 8".to_string()][..])
        );
    }

    #[test]
    fn rejects_negative_and_fractional_integers() {
        let err = raw(json!({
            "query": "cafe", "location": "Rome", "radius": -10, "maxResults": 2.5
        }))
        .validate()
        .expect_err("invalid integers");
        assert!(err.0.get("radius").is_some());
        assert_eq!(
            err.0.get("maxResults"),
            Some(&["maxResults must be an integer".to_string()][..])
        );
    }

    #[test]
    fn accepts_numeric_strings_from_forms() {
        let req = raw(json!({
            "query": "gym", "location": "Berlin", "radius": "2500", "maxResults": "3"
        }))
        .validate()
        .expect("numeric strings are accepted");
        assert_eq!(req.radius, 2_500);
        assert_eq!(req.max_results, 3);
    }

    #[test]
    fn integers_beyond_i64_are_out_of_range_not_malformed() {
        let err = raw(json!({
            "query": "cafe",
            "location": "Paris",
            "radius": 18_446_744_073_709_551_615_u64,
            "maxResults": "99999999999999999999"
        }))
        .validate()
        .expect_err("too large");
        assert_eq!(
            err.0.get("radius"),
            Some(&["radius must be between 500 and 50000".to_string()][..])
        );
        assert_eq!(
            err.0.get("maxResults"),
            Some(&["maxResults must be between 1 and 8".to_string()][..])
        );
    }

    #[test]
    fn whole_float_is_accepted_as_integer() {
        let req = raw(json!({ "query": "gym", "location": "Berlin", "radius": 1000.0 }))
            .validate()
            .expect("1000.0 is a whole number");
        assert_eq!(req.radius, 1_000);
    }

    #[test]
    fn short_query_reports_query_field() {
        let err = raw(json!({ "query": "a", "location": "Paris" }))
            .validate()
            .expect_err("query too short");
        assert_eq!(err.0.len(), 1);
        assert_eq!(
            err.0.get("query"),
            Some(&["query must be at least 2 characters".to_string()][..])
        );
    }

    #[test]
    fn whitespace_padding_does_not_count_towards_length() {
        let err = raw(json!({ "query": "  a  ", "location": "Paris" }))
            .validate()
            .expect_err("trimmed query too short");
        assert!(err.0.get("query").is_some());
    }

    #[test]
    fn collects_every_violation_at_once() {
        let err = raw(json!({
            "query": 42,
            "radius": "far",
            "vibe": "x".repeat(281),
            "tone": "y".repeat(121)
        }))
        .validate()
        .expect_err("many violations");
        let fields: Vec<&str> = err.0.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["location", "query", "radius", "tone", "vibe"]);
        assert_eq!(
            err.0.get("location"),
            Some(&["location is required".to_string()][..])
        );
        assert_eq!(
            err.0.get("query"),
            Some(&["query must be a string".to_string()][..])
        );
    }

    #[test]
    fn vibe_and_tone_at_limit_are_kept() {
        let vibe = "v".repeat(MAX_VIBE_CHARS);
        let tone = "t".repeat(MAX_TONE_CHARS);
        let req = raw(json!({
            "query": "florist", "location": "Austin", "vibe": vibe, "tone": tone
        }))
        .validate()
        .expect("limits are inclusive");
        assert_eq!(req.vibe.as_deref().map(str::len), Some(MAX_VIBE_CHARS));
        assert_eq!(req.tone.as_deref().map(str::len), Some(MAX_TONE_CHARS));
    }

    #[test]
    fn blank_vibe_and_tone_become_none() {
        let req = raw(json!({
            "query": "florist", "location": "Austin", "vibe": "", "tone": "   "
        }))
        .validate()
        .expect("blank optional text is allowed");
        assert!(req.vibe.is_none());
        assert!(req.tone.is_none());
    }

    #[test]
    fn candidate_limit_over_fetches_by_two() {
        let req = raw(json!({ "query": "restaurant", "location": "Paris", "maxResults": 3 }))
            .validate()
            .expect("valid");
        assert_eq!(req.candidate_limit(20), 6);
        assert_eq!(req.candidate_limit(4), 4);
        assert_eq!(req.candidate_limit(0), 0);
    }

    #[test]
    fn field_errors_display_joins_messages() {
        let mut errors = FieldErrors::default();
        errors.push("query", "query is required");
        errors.push("radius", "radius must be an integer");
        assert_eq!(
            errors.to_string(),
            "query: query is required; radius: radius must be an integer"
        );
    }

    #[test]
    fn search_request_serializes_camel_case_without_empty_hints() {
        let req = raw(json!({ "query": "barber", "location": "Leeds", "maxResults": 2 }))
            .validate()
            .expect("valid");
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json["maxResults"], 2);
        assert!(json.get("vibe").is_none());
        assert!(json.get("tone").is_none());
    }
}
