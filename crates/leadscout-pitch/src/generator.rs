//! Capability-gated pitch generation.
//!
//! Whether pitches can be generated is decided once, when the generator is
//! built from configuration. Callers always call [`PitchGenerator::generate`]
//! and get back a (possibly empty) list; they never branch on the gate.

use leadscout_core::{AppConfig, Pitch, PlaceDetails};

use crate::client::{ChatClient, ChatConfig};
use crate::error::PitchError;
use crate::parse::parse_pitches;
use crate::prompt::{build_instructions, build_payload};
use crate::types::ChatMessage;

/// Search context folded into the instructions.
#[derive(Debug, Clone, Copy)]
pub struct PitchContext<'a> {
    pub query: &'a str,
    pub vibe: Option<&'a str>,
    pub tone: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct PitchGenerator {
    client: Option<ChatClient>,
}

impl PitchGenerator {
    /// Builds the generator from configuration. Without an `OPENAI_API_KEY`
    /// the generator is disabled and makes no outbound calls.
    ///
    /// # Errors
    ///
    /// Returns [`PitchError`] if a credential is configured but the client
    /// cannot be constructed (for example an unparseable base URL).
    pub fn from_config(config: &AppConfig) -> Result<Self, PitchError> {
        let Some(api_key) = config.openai_api_key.clone() else {
            tracing::info!("OPENAI_API_KEY not set; pitch generation disabled");
            return Ok(Self::disabled());
        };

        let client = ChatClient::new(ChatConfig {
            api_key,
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            temperature: config.openai_temperature,
            timeout_secs: config.pitch_timeout_secs,
            user_agent: config.user_agent.clone(),
        })?;

        tracing::info!(model = %client.model(), "pitch generation enabled");
        Ok(Self::with_client(client))
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { client: None }
    }

    #[must_use]
    pub fn with_client(client: ChatClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Generates one pitch per business in a single bundled request.
    ///
    /// Returns an empty list when the generator is disabled, when there is
    /// nothing to pitch, or when the request or parsing fails. Failures are
    /// logged, never returned.
    pub async fn generate(
        &self,
        businesses: &[PlaceDetails],
        context: &PitchContext<'_>,
    ) -> Vec<Pitch> {
        let Some(client) = &self.client else {
            return Vec::new();
        };
        if businesses.is_empty() {
            return Vec::new();
        }

        match request_pitches(client, businesses, context).await {
            Ok(pitches) => {
                tracing::debug!(
                    businesses = businesses.len(),
                    pitches = pitches.len(),
                    "pitches generated"
                );
                pitches
            }
            Err(e) => {
                tracing::warn!(error = %e, "pitch generation failed; continuing without pitches");
                Vec::new()
            }
        }
    }
}

async fn request_pitches(
    client: &ChatClient,
    businesses: &[PlaceDetails],
    context: &PitchContext<'_>,
) -> Result<Vec<Pitch>, PitchError> {
    let payload = serde_json::to_string(&build_payload(businesses)).map_err(|e| {
        PitchError::Deserialize {
            context: "pitch payload".to_string(),
            source: e,
        }
    })?;

    let messages = vec![
        ChatMessage::system(build_instructions(context)),
        ChatMessage::user(payload),
    ];

    let raw = client.complete(messages).await?;
    parse_pitches(&raw)
}
