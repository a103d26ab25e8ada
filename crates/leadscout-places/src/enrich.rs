//! Concurrent detail enrichment and the website filter.

use futures::future::join_all;
use leadscout_core::PlaceDetails;

use crate::client::PlacesClient;

/// Fetches details for every id concurrently.
///
/// Each lookup is independent: a failed or empty lookup is logged and
/// contributes no entry, and never cancels its siblings. Output keeps the
/// order of `place_ids`.
pub async fn fetch_details_concurrently(
    client: &PlacesClient,
    place_ids: &[String],
) -> Vec<PlaceDetails> {
    let lookups = place_ids.iter().map(|place_id| async move {
        match client.place_details(place_id).await {
            Ok(details) => Some(details),
            Err(e) => {
                tracing::warn!(place_id = %place_id, error = %e, "place details lookup failed; skipping");
                None
            }
        }
    });

    let fetched: Vec<PlaceDetails> = join_all(lookups).await.into_iter().flatten().collect();

    tracing::debug!(
        requested = place_ids.len(),
        fetched = fetched.len(),
        "place details fetched"
    );

    fetched
}

/// Drops every place with a website, then keeps at most `max_results`.
#[must_use]
pub fn retain_without_website(details: Vec<PlaceDetails>, max_results: usize) -> Vec<PlaceDetails> {
    details
        .into_iter()
        .filter(|d| !d.has_website())
        .take(max_results)
        .collect()
}
