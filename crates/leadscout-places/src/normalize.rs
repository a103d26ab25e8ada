//! Conversion from provider wire types to the shared domain model.

use leadscout_core::{Coordinates, PlaceDetails, PlaceSummary, Review};

use crate::types::{DetailsResult, LatLng, TextSearchResult, WireReview};

impl From<LatLng> for Coordinates {
    fn from(value: LatLng) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

/// Blank strings are as good as missing.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Returns `None` for listings without a usable place id.
#[must_use]
pub fn normalize_summary(raw: TextSearchResult) -> Option<PlaceSummary> {
    let place_id = raw.place_id.trim().to_string();
    if place_id.is_empty() {
        return None;
    }
    Some(PlaceSummary {
        name: non_blank(raw.name).unwrap_or_else(|| place_id.clone()),
        place_id,
        address: non_blank(raw.formatted_address),
        rating: raw.rating,
        business_status: non_blank(raw.business_status),
        types: raw.types,
    })
}

/// Builds a [`PlaceDetails`], falling back to `requested_id` when the
/// provider omits `place_id` from the result.
#[must_use]
pub fn normalize_details(requested_id: &str, raw: DetailsResult) -> PlaceDetails {
    let place_id = non_blank(raw.place_id).unwrap_or_else(|| requested_id.to_string());
    PlaceDetails {
        name: non_blank(raw.name).unwrap_or_else(|| place_id.clone()),
        place_id,
        address: non_blank(raw.formatted_address),
        phone: non_blank(raw.formatted_phone_number),
        international_phone: non_blank(raw.international_phone_number),
        website: non_blank(raw.website),
        rating: raw.rating,
        user_ratings_total: raw.user_ratings_total,
        business_status: non_blank(raw.business_status),
        types: raw.types,
        opening_hours: raw.opening_hours.map(|h| h.weekday_text).unwrap_or_default(),
        reviews: raw.reviews.into_iter().filter_map(normalize_review).collect(),
        editorial_summary: raw.editorial_summary.and_then(|e| non_blank(e.overview)),
        location: raw.geometry.map(|g| g.location.into()),
    }
}

fn normalize_review(raw: WireReview) -> Option<Review> {
    let text = non_blank(raw.text)?;
    Some(Review {
        author_name: non_blank(raw.author_name),
        rating: raw.rating,
        text,
        relative_time: non_blank(raw.relative_time_description),
    })
}
