//! HTTP client for the mapping provider's web service endpoints.
//!
//! Wraps `reqwest` with credential handling, envelope status checks, and
//! typed response deserialization. Each endpoint inspects the `"status"`
//! field and surfaces anything other than a valid outcome as
//! [`PlacesError::Api`].

use std::time::Duration;

use leadscout_core::{Coordinates, PlaceDetails, PlaceSummary};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::normalize::{normalize_details, normalize_summary};
use crate::types::{
    ApiStatus, DetailsResponse, GeocodeResponse, TextSearchResponse, TextSearchResult,
};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";

const GEOCODE_ENDPOINT: &str = "geocode/json";
const TEXT_SEARCH_ENDPOINT: &str = "place/textsearch/json";
const DETAILS_ENDPOINT: &str = "place/details/json";

/// Fields requested from the details endpoint. `website` must stay in the
/// list: its absence is what the website filter keys on.
pub const DETAIL_FIELDS: &str = "place_id,name,formatted_address,formatted_phone_number,\
international_phone_number,website,rating,user_ratings_total,business_status,types,\
opening_hours,reviews,editorial_summary,geometry";

/// Client for the geocoding, text-search, and place-details endpoints.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so relative endpoint paths are joined
        // under the base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Resolves a free-text address to coordinates.
    ///
    /// The first result wins; multiple matches are not disambiguated.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the status is anything but `OK`
    ///   (including `ZERO_RESULTS`).
    /// - [`PlacesError::EmptyResult`] if `OK` came back with no results.
    /// - [`PlacesError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body does not match.
    pub async fn geocode(&self, address: &str) -> Result<Coordinates, PlacesError> {
        let url = self.build_url(GEOCODE_ENDPOINT, &[("address", address)])?;
        let body: GeocodeResponse = self.request_json(url, "geocode").await?;

        if body.status != ApiStatus::Ok {
            return Err(PlacesError::Api {
                endpoint: "geocode",
                status: body.status,
                message: body.error_message,
            });
        }

        let first = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| PlacesError::EmptyResult {
                endpoint: "geocode",
                input: address.to_string(),
            })?;

        tracing::debug!(
            address,
            resolved = first.formatted_address.as_deref().unwrap_or(""),
            lat = first.geometry.location.lat,
            lng = first.geometry.location.lng,
            "geocoded location"
        );

        Ok(first.geometry.location.into())
    }

    /// Runs a text search scoped to `radius` metres around `near`.
    ///
    /// `ZERO_RESULTS` is a valid outcome and yields an empty list. Results
    /// keep the provider's order. Listings that fail to parse are skipped.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] for any failure status, carrying the
    ///   provider's `error_message` when present.
    /// - [`PlacesError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`PlacesError::Deserialize`] if the envelope does not match.
    pub async fn text_search(
        &self,
        query: &str,
        near: Coordinates,
        radius: u32,
    ) -> Result<Vec<PlaceSummary>, PlacesError> {
        let location = format!("{},{}", near.lat, near.lng);
        let radius = radius.to_string();
        let url = self.build_url(
            TEXT_SEARCH_ENDPOINT,
            &[("query", query), ("location", &location), ("radius", &radius)],
        )?;
        let body: TextSearchResponse = self.request_json(url, "textsearch").await?;

        match body.status {
            ApiStatus::Ok => {}
            ApiStatus::ZeroResults => return Ok(Vec::new()),
            status @ ApiStatus::Failure(_) => {
                return Err(PlacesError::Api {
                    endpoint: "textsearch",
                    status,
                    message: body.error_message,
                });
            }
        }

        let raw_count = body.results.len();
        let summaries: Vec<PlaceSummary> = body
            .results
            .into_iter()
            .filter_map(|v| serde_json::from_value::<TextSearchResult>(v).ok())
            .filter_map(normalize_summary)
            .collect();

        if summaries.len() != raw_count {
            tracing::warn!(
                query,
                raw = raw_count,
                kept = summaries.len(),
                "skipped malformed text search results"
            );
        }

        Ok(summaries)
    }

    /// Fetches the full record for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the status is not `OK`.
    /// - [`PlacesError::EmptyResult`] if `OK` came back without a result.
    /// - [`PlacesError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body does not match.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.build_url(
            DETAILS_ENDPOINT,
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        )?;
        let body: DetailsResponse = self.request_json(url, "details").await?;

        if body.status != ApiStatus::Ok {
            return Err(PlacesError::Api {
                endpoint: "details",
                status: body.status,
                message: body.error_message,
            });
        }

        let result = body.result.ok_or_else(|| PlacesError::EmptyResult {
            endpoint: "details",
            input: place_id.to_string(),
        })?;

        Ok(normalize_details(place_id, result))
    }

    /// Builds the full request URL with percent-encoded query parameters,
    /// appending the API key last.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body.
    ///
    /// `context` names the endpoint in errors; the URL itself is never
    /// included because it carries the API key.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, PlacesError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| PlacesError::Http(e.without_url()))?;
        let body = response
            .text()
            .await
            .map_err(|e| PlacesError::Http(e.without_url()))?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> PlacesClient {
        PlacesClient::with_base_url("test-key", 5, "leadscout-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_joins_endpoint_under_base_path() {
        let client = test_client("https://maps.googleapis.com/maps/api");
        let url = client
            .build_url(GEOCODE_ENDPOINT, &[("address", "Paris")])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/geocode/json?address=Paris&key=test-key"
        );
    }

    #[test]
    fn build_url_strips_duplicate_trailing_slashes() {
        let client = test_client("https://maps.googleapis.com/maps/api//");
        let url = client
            .build_url(DETAILS_ENDPOINT, &[("place_id", "abc")])
            .expect("url");
        assert!(url
            .as_str()
            .starts_with("https://maps.googleapis.com/maps/api/place/details/json?"));
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://maps.googleapis.com/maps/api/");
        let url = client
            .build_url(TEXT_SEARCH_ENDPOINT, &[("query", "fish & chips")])
            .expect("url");
        assert!(
            url.as_str().contains("fish+%26+chips") || url.as_str().contains("fish%20%26%20chips"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn with_base_url_rejects_garbage() {
        let err = PlacesClient::with_base_url("k", 5, "ua", "not a url").expect_err("invalid");
        assert!(matches!(err, PlacesError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn detail_fields_include_website() {
        assert!(DETAIL_FIELDS.split(',').any(|f| f == "website"));
    }
}
