use thiserror::Error;

use crate::types::ApiStatus;

/// Errors returned by the mapping-provider client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network, timeout, TLS, or non-2xx failure from the HTTP client.
    ///
    /// The request URL is stripped before wrapping because it carries the
    /// API key as a query parameter.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a status other than `OK` (or `ZERO_RESULTS`
    /// where that is a valid outcome).
    #[error("{endpoint} returned status {status}")]
    Api {
        endpoint: &'static str,
        status: ApiStatus,
        message: Option<String>,
    },

    /// The provider reported `OK` but the payload held nothing usable.
    #[error("{endpoint} returned no usable result for \"{input}\"")]
    EmptyResult {
        endpoint: &'static str,
        input: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl PlacesError {
    /// The provider's own `error_message`, when it sent one.
    #[must_use]
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
