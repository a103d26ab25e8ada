//! Shared domain model, request validation, and configuration for leadscout.

pub mod app_config;
pub mod business;
pub mod config;
pub mod error;
pub mod response;
pub mod search;

pub use app_config::AppConfig;
pub use business::{
    google_maps_url, Coordinates, EnrichedBusiness, Pitch, PlaceDetails, PlaceSummary, Review,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use response::{ErrorEnvelope, SearchMetadata, SearchResponse};
pub use search::{FieldErrors, RawSearchRequest, SearchRequest, ValidationError};
