use thiserror::Error;

/// Failures inside pitch generation. These are logged and absorbed by
/// [`crate::PitchGenerator::generate`]; they never reach the HTTP caller.
#[derive(Debug, Error)]
pub enum PitchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("completion response contained no message content")]
    EmptyCompletion,

    #[error("could not parse pitches from model output: {0}")]
    Parse(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
