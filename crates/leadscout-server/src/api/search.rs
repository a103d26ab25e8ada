use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use leadscout_core::{RawSearchRequest, SearchResponse};
use tracing::Instrument;

use super::{ApiError, AppState};
use crate::pipeline::{run_search, SearchError};

pub(super) async fn search(
    State(state): State<AppState>,
    body: Result<Json<RawSearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(raw) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "search body rejected");
        ApiError::bad_request("Invalid request body")
    })?;

    let places = state.places.as_ref().ok_or(SearchError::Configuration)?;
    let request = raw.validate().map_err(SearchError::from)?;

    let span = tracing::info_span!(
        "search",
        query = %request.query,
        location = %request.location,
        radius = request.radius,
        max_results = request.max_results,
    );
    let response = run_search(places, &state.pitches, &request)
        .instrument(span)
        .await?;

    tracing::info!(
        total_found = response.metadata.total_found,
        returned = response.businesses.len(),
        pitches_generated = response.metadata.pitches_generated,
        "search completed"
    );
    Ok(Json(response))
}
