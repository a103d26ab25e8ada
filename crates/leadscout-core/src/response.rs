use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::business::{Coordinates, EnrichedBusiness};
use crate::search::FieldErrors;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetadata {
    /// Listings returned by the text search, before any filtering.
    pub total_found: usize,
    /// Businesses left after the website filter and truncation.
    pub total_without_website: usize,
    pub query: String,
    pub location: String,
    pub coordinates: Coordinates,
    pub radius: u32,
    pub searched_at: DateTime<Utc>,
    pub pitches_generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Successful search response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub businesses: Vec<EnrichedBusiness>,
    pub metadata: SearchMetadata,
}

/// Error response body: `{ "error": "...", "details": { field: [messages] } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldErrors>,
}

impl ErrorEnvelope {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(error: impl Into<String>, details: FieldErrors) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}
