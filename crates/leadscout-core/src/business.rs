//! Place records produced by the mapping provider and the enriched business
//! record returned to clients.

use serde::{Deserialize, Serialize};

const MAPS_PLACE_URL_PREFIX: &str = "https://www.google.com/maps/place/?q=place_id:";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Minimal listing returned by the text-search stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub business_status: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub author_name: Option<String>,
    pub rating: Option<u8>,
    pub text: String,
    pub relative_time: Option<String>,
}

/// Full record for one place.
///
/// `website` is `None` both when the provider omits it and when it is blank;
/// it is the key the website filter runs on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub international_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub business_status: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub opening_hours: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub editorial_summary: Option<String>,
    pub location: Option<Coordinates>,
}

impl PlaceDetails {
    #[must_use]
    pub fn has_website(&self) -> bool {
        self.website.as_deref().is_some_and(|w| !w.trim().is_empty())
    }
}

/// Generated outreach copy for one business, tied to it by `place_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pitch {
    pub place_id: String,
    pub vibe_summary: String,
    pub angle: String,
    pub personalized_message: String,
}

/// A website-free business as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedBusiness {
    #[serde(flatten)]
    pub details: PlaceDetails,
    pub google_maps_url: String,
    pub pitch: Option<Pitch>,
}

impl EnrichedBusiness {
    #[must_use]
    pub fn new(details: PlaceDetails, pitch: Option<Pitch>) -> Self {
        let google_maps_url = google_maps_url(&details.place_id);
        Self {
            details,
            google_maps_url,
            pitch,
        }
    }

    #[must_use]
    pub fn place_id(&self) -> &str {
        &self.details.place_id
    }
}

/// Deterministic maps link for a place id.
#[must_use]
pub fn google_maps_url(place_id: &str) -> String {
    format!("{MAPS_PLACE_URL_PREFIX}{place_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(place_id: &str, website: Option<&str>) -> PlaceDetails {
        PlaceDetails {
            place_id: place_id.to_string(),
            name: format!("Place {place_id}"),
            address: Some("1 Rue de Rivoli, Paris".to_string()),
            phone: Some("01 23 45 67 89".to_string()),
            international_phone: None,
            website: website.map(str::to_string),
            rating: Some(4.4),
            user_ratings_total: Some(87),
            business_status: Some("OPERATIONAL".to_string()),
            types: vec!["restaurant".to_string()],
            opening_hours: Vec::new(),
            reviews: Vec::new(),
            editorial_summary: None,
            location: Some(Coordinates {
                lat: 48.86,
                lng: 2.34,
            }),
        }
    }

    #[test]
    fn google_maps_url_uses_place_id_query() {
        assert_eq!(
            google_maps_url("ChIJ123"),
            "https://www.google.com/maps/place/?q=place_id:ChIJ123"
        );
    }

    #[test]
    fn has_website_ignores_blank_values() {
        assert!(!details("a", None).has_website());
        assert!(!details("a", Some("  ")).has_website());
        assert!(details("a", Some("https://example.com")).has_website());
    }

    #[test]
    fn enriched_business_flattens_details_and_omits_missing_website() {
        let business = EnrichedBusiness::new(details("p1", None), None);
        let json = serde_json::to_value(&business).expect("serialize");
        assert_eq!(json["placeId"], "p1");
        assert_eq!(
            json["googleMapsUrl"],
            "https://www.google.com/maps/place/?q=place_id:p1"
        );
        assert!(json.get("website").is_none());
        assert!(json["pitch"].is_null());
        assert_eq!(json["userRatingsTotal"], 87);
    }

    #[test]
    fn enriched_business_serializes_pitch_in_camel_case() {
        let pitch = Pitch {
            place_id: "p1".to_string(),
            vibe_summary: "Cosy neighbourhood bistro".to_string(),
            angle: "Online booking".to_string(),
            personalized_message: "Bonjour!".to_string(),
        };
        let business = EnrichedBusiness::new(details("p1", None), Some(pitch));
        let json = serde_json::to_value(&business).expect("serialize");
        assert_eq!(json["pitch"]["placeId"], "p1");
        assert_eq!(json["pitch"]["vibeSummary"], "Cosy neighbourhood bistro");
        assert_eq!(json["pitch"]["personalizedMessage"], "Bonjour!");
    }
}
