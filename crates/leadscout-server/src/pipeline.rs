//! Search orchestration: geocode, text search, detail enrichment, website
//! filter, pitch generation, and response assembly.

use std::collections::HashSet;

use chrono::Utc;
use leadscout_core::{
    Coordinates, EnrichedBusiness, PlaceSummary, SearchMetadata, SearchRequest, SearchResponse,
    ValidationError,
};
use leadscout_pitch::{attach_pitches, PitchContext, PitchGenerator};
use leadscout_places::{
    fetch_details_concurrently, retain_without_website, PlacesClient, PlacesError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("GOOGLE_MAPS_API_KEY is not configured")]
    Configuration,

    #[error("invalid search request: {0}")]
    Validation(#[from] ValidationError),

    #[error("could not resolve location \"{location}\": {source}")]
    LocationResolution {
        location: String,
        #[source]
        source: PlacesError,
    },

    #[error("place search failed: {0}")]
    PlacesSearch(#[source] PlacesError),

    #[error("unexpected failure: {0}")]
    Internal(String),
}

/// Runs one search end to end.
///
/// Only geocoding and the text search can fail the request. Detail lookups
/// that fail are skipped and pitch generation degrades to no pitches.
///
/// # Errors
///
/// - [`SearchError::LocationResolution`] if the location cannot be geocoded.
/// - [`SearchError::PlacesSearch`] if the text search fails.
pub async fn run_search(
    places: &PlacesClient,
    pitches: &PitchGenerator,
    request: &SearchRequest,
) -> Result<SearchResponse, SearchError> {
    let coordinates = places.geocode(&request.location).await.map_err(|source| {
        SearchError::LocationResolution {
            location: request.location.clone(),
            source,
        }
    })?;

    let summaries = places
        .text_search(&request.query, coordinates, request.radius)
        .await
        .map_err(SearchError::PlacesSearch)?;
    let total_found = summaries.len();

    if summaries.is_empty() {
        tracing::info!("text search returned no businesses");
        let note = format!(
            "No businesses matching \"{}\" were found within {} m of {}.",
            request.query, request.radius, request.location
        );
        return Ok(assemble(request, coordinates, total_found, Vec::new(), Some(note)));
    }

    let candidate_ids = unique_candidate_ids(summaries, request.candidate_limit(total_found));
    let details = fetch_details_concurrently(places, &candidate_ids).await;
    let fetched = details.len();
    let retained = retain_without_website(details, request.max_results_usize());

    tracing::info!(
        total_found,
        candidates = candidate_ids.len(),
        fetched,
        retained = retained.len(),
        "detail enrichment finished"
    );

    if retained.is_empty() {
        let note = if fetched == 0 {
            format!("Details could not be retrieved for any of the {total_found} businesses found.")
        } else {
            format!("All {fetched} businesses checked already have a website.")
        };
        return Ok(assemble(request, coordinates, total_found, Vec::new(), Some(note)));
    }

    let context = PitchContext {
        query: &request.query,
        vibe: request.vibe.as_deref(),
        tone: request.tone.as_deref(),
    };
    let generated = pitches.generate(&retained, &context).await;
    let businesses = attach_pitches(retained, generated);

    Ok(assemble(request, coordinates, total_found, businesses, None))
}

/// First `limit` distinct place ids in search order. The provider can list
/// one place twice; it is fetched and returned once.
fn unique_candidate_ids(summaries: Vec<PlaceSummary>, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    summaries
        .into_iter()
        .map(|s| s.place_id)
        .filter(|id| seen.insert(id.clone()))
        .take(limit)
        .collect()
}

fn assemble(
    request: &SearchRequest,
    coordinates: Coordinates,
    total_found: usize,
    businesses: Vec<EnrichedBusiness>,
    note: Option<String>,
) -> SearchResponse {
    let pitches_generated = businesses.iter().any(|b| b.pitch.is_some());
    SearchResponse {
        metadata: SearchMetadata {
            total_found,
            total_without_website: businesses.len(),
            query: request.query.clone(),
            location: request.location.clone(),
            coordinates,
            radius: request.radius,
            searched_at: Utc::now(),
            pitches_generated,
            note,
        },
        businesses,
    }
}
