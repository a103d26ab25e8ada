//! Instructions and payload for the bundled pitch request.

use leadscout_core::PlaceDetails;

use crate::generator::PitchContext;
use crate::types::BusinessBrief;

pub const MAX_SAMPLE_REVIEWS: usize = 2;
pub const MAX_REVIEW_CHARS: usize = 400;

/// Builds the system instructions, folding in the optional vibe and tone hints.
#[must_use]
pub fn build_instructions(context: &PitchContext<'_>) -> String {
    let mut out = String::with_capacity(1_600);
    out.push_str(
        "You write cold outreach for a small studio that builds websites for local businesses.\n",
    );
    out.push_str(&format!(
        "The user message is a JSON array of businesses found for the search \"{}\". \
         None of them has a website.\n\n",
        context.query
    ));
    out.push_str("For each business produce:\n");
    out.push_str(
        "- vibeSummary: one or two sentences on the business's perceived vibe, drawn from its \
         category, rating, reviews and summary.\n",
    );
    out.push_str(
        "- angle: one sentence naming the most compelling reason this particular business \
         would gain from a website.\n",
    );
    out.push_str(
        "- personalizedMessage: a short outreach message (under 120 words) that greets the \
         business by name and mentions something specific about it.\n",
    );

    if let Some(vibe) = context.vibe {
        out.push_str(&format!(
            "\nThe sender describes the vibe they are going for as: \"{vibe}\". \
             Let it shape the vibe summaries and the angle.\n"
        ));
    }
    if let Some(tone) = context.tone {
        out.push_str(&format!(
            "\nWrite every personalizedMessage in this tone: \"{tone}\".\n"
        ));
    }

    out.push_str(
        "\nRespond with JSON only. No prose, no Markdown, no code fences. Use exactly this shape:\n\
         {\"pitches\":[{\"placeId\":\"<placeId from the input>\",\"vibeSummary\":\"...\",\
         \"angle\":\"...\",\"personalizedMessage\":\"...\"}]}\n\
         Return one entry per business and copy every placeId exactly as given.\n",
    );
    out
}

/// Condenses each business to the attributes the model needs.
#[must_use]
pub fn build_payload(businesses: &[PlaceDetails]) -> Vec<BusinessBrief> {
    businesses
        .iter()
        .map(|d| BusinessBrief {
            place_id: d.place_id.clone(),
            name: d.name.clone(),
            address: d.address.clone(),
            phone: d.phone.clone().or_else(|| d.international_phone.clone()),
            rating: d.rating,
            review_count: d.user_ratings_total,
            types: d.types.clone(),
            editorial_summary: d.editorial_summary.clone(),
            sample_reviews: d
                .reviews
                .iter()
                .take(MAX_SAMPLE_REVIEWS)
                .map(|r| truncate_chars(&r.text, MAX_REVIEW_CHARS))
                .collect(),
        })
        .collect()
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use leadscout_core::Review;

    use super::*;

    fn business(place_id: &str, reviews: usize) -> PlaceDetails {
        PlaceDetails {
            place_id: place_id.to_string(),
            name: "Atelier Lumière".to_string(),
            address: Some("5 Rue des Martyrs".to_string()),
            phone: None,
            international_phone: Some("+33 1 23 45 67 89".to_string()),
            website: None,
            rating: Some(4.8),
            user_ratings_total: Some(64),
            business_status: Some("OPERATIONAL".to_string()),
            types: vec!["florist".to_string()],
            opening_hours: vec!["Monday: Closed".to_string()],
            reviews: (0..reviews)
                .map(|i| Review {
                    author_name: Some(format!("Reviewer {i}")),
                    rating: Some(5),
                    text: format!("Review number {i}"),
                    relative_time: None,
                })
                .collect(),
            editorial_summary: Some("Tiny florist with seasonal bouquets".to_string()),
            location: None,
        }
    }

    #[test]
    fn payload_caps_sample_reviews_at_two() {
        let payload = build_payload(&[business("p1", 5)]);
        assert_eq!(payload[0].sample_reviews.len(), 2);
        assert_eq!(payload[0].sample_reviews[0], "Review number 0");
    }

    #[test]
    fn payload_falls_back_to_international_phone() {
        let payload = build_payload(&[business("p1", 0)]);
        assert_eq!(payload[0].phone.as_deref(), Some("+33 1 23 45 67 89"));
        assert_eq!(payload[0].review_count, Some(64));
    }

    #[test]
    fn payload_serializes_camel_case_keys() {
        let payload = build_payload(&[business("p1", 1)]);
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json[0]["placeId"], "p1");
        assert_eq!(json[0]["reviewCount"], 64);
        assert_eq!(json[0]["editorialSummary"], "Tiny florist with seasonal bouquets");
        assert!(json[0].get("openingHours").is_none());
    }

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé…");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn instructions_include_hints_only_when_present() {
        let bare = build_instructions(&PitchContext {
            query: "florist",
            vibe: None,
            tone: None,
        });
        assert!(bare.contains("\"florist\""));
        assert!(!bare.contains("tone:"));
        assert!(!bare.contains("vibe they are going for"));

        let hinted = build_instructions(&PitchContext {
            query: "florist",
            vibe: Some("earthy and handmade"),
            tone: Some("warm, casual"),
        });
        assert!(hinted.contains("earthy and handmade"));
        assert!(hinted.contains("warm, casual"));
        assert!(hinted.contains("\"pitches\""));
    }
}
