mod search;

use std::any::Any;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use leadscout_core::{AppConfig, ErrorEnvelope};
use leadscout_pitch::PitchGenerator;
use leadscout_places::PlacesClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::middleware::request_id;
use crate::pipeline::SearchError;

#[derive(Clone)]
pub struct AppState {
    /// `None` when no maps credential is configured; searches then fail with
    /// a configuration error.
    pub places: Option<PlacesClient>,
    pub pitches: PitchGenerator,
}

impl AppState {
    /// Builds the outbound clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let places = match config.google_maps_api_key.as_deref() {
            Some(key) => Some(PlacesClient::with_base_url(
                key,
                config.http_timeout_secs,
                &config.user_agent,
                &config.maps_base_url,
            )?),
            None => {
                tracing::warn!("GOOGLE_MAPS_API_KEY not set; searches will be rejected");
                None
            }
        };
        let pitches = PitchGenerator::from_config(config)?;
        Ok(Self { places, pitches })
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorEnvelope,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    maps: &'static str,
    pitches: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, body: ErrorEnvelope) -> Self {
        Self { status, body }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorEnvelope::new(message))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorEnvelope::new(message))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(error: SearchError) -> Self {
        match error {
            SearchError::Configuration => {
                tracing::error!(error = %error, "search rejected");
                Self::internal("Search is unavailable: the maps API key is not configured.")
            }
            SearchError::Validation(e) => {
                tracing::debug!(error = %e, "search request failed validation");
                Self::new(
                    StatusCode::BAD_REQUEST,
                    ErrorEnvelope::with_details("Invalid request", e.0),
                )
            }
            SearchError::LocationResolution { .. } => {
                tracing::warn!(error = %error, "location resolution failed");
                Self::internal(
                    "Unable to locate this area. Try a more specific location, such as a city and country.",
                )
            }
            SearchError::PlacesSearch(ref source) => {
                tracing::warn!(error = %error, "place search failed");
                match source.upstream_message() {
                    Some(message) => Self::internal(format!("Place search failed: {message}")),
                    None => Self::internal("Place search failed. Please try again later."),
                }
            }
            SearchError::Internal(ref detail) => {
                tracing::error!(detail = %detail, "unexpected failure while handling request");
                Self::internal("An unexpected error occurred. Please try again.")
            }
        }
    }
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::from(SearchError::Internal(detail)).into_response()
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
        .expose_headers([HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/search", post(search::search))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(build_cors())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthData {
        status: "ok",
        maps: if state.places.is_some() {
            "configured"
        } else {
            "missing"
        },
        pitches: if state.pitches.is_enabled() {
            "enabled"
        } else {
            "disabled"
        },
    })
}
