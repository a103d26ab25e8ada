//! Client for the mapping provider's geocoding, text-search, and place
//! details endpoints, plus the concurrent detail enrichment and website
//! filter built on top of it.

pub mod client;
pub mod enrich;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::PlacesClient;
pub use enrich::{fetch_details_concurrently, retain_without_website};
pub use error::PlacesError;
pub use types::ApiStatus;
