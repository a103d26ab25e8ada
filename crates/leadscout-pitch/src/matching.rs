use std::collections::HashMap;

use leadscout_core::{EnrichedBusiness, PlaceDetails, Pitch};

/// Pairs each business with the pitch carrying its place id.
///
/// Pitches for unknown ids are dropped, a business without a matching pitch
/// gets `None`, and when the model repeats an id the first pitch wins.
#[must_use]
pub fn attach_pitches(businesses: Vec<PlaceDetails>, pitches: Vec<Pitch>) -> Vec<EnrichedBusiness> {
    let mut by_id: HashMap<String, Pitch> = HashMap::with_capacity(pitches.len());
    for pitch in pitches {
        by_id.entry(pitch.place_id.clone()).or_insert(pitch);
    }

    let enriched: Vec<EnrichedBusiness> = businesses
        .into_iter()
        .map(|details| {
            let pitch = by_id.remove(&details.place_id);
            EnrichedBusiness::new(details, pitch)
        })
        .collect();

    if !by_id.is_empty() {
        tracing::debug!(
            unmatched = by_id.len(),
            "ignored pitches for unknown place ids"
        );
    }

    enriched
}
