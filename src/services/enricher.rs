// src/services/enricher.rs
// DOCUMENTATION: Place detail enrichment
// PURPOSE: Turn a details payload into the fields cached on a place row

use crate::errors::PlacesError;
use crate::models::EnrichedPlace;
use crate::services::google_places_client::{GooglePlacesClient, PlaceDetails, Review};

/// Photo references resolved per place
pub const PHOTO_LIMIT: usize = 5;

/// Review-derived descriptions are cut at this many characters
pub const DESCRIPTION_MAX_CHARS: usize = 300;

const ELLIPSIS: &str = "...";

/// Detail-fetch abstraction
/// DOCUMENTATION: Mirrors the aggregator's SearchProvider; the concrete
/// Google client implements this, tests substitute stubs
#[allow(async_fn_in_trait)]
pub trait DetailsProvider {
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;

    fn photo_url(&self, photo_reference: &str) -> String;
}

impl DetailsProvider for GooglePlacesClient {
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        GooglePlacesClient::place_details(self, place_id).await
    }

    fn photo_url(&self, photo_reference: &str) -> String {
        GooglePlacesClient::photo_url(self, photo_reference)
    }
}

/// Detail enricher
/// DOCUMENTATION: Fetch failures propagate with their error kind so the
/// caller decides whether it can degrade to cached values; a payload that
/// arrived OK but is missing required fields yields Ok(None)
pub struct PlaceEnricher;

impl PlaceEnricher {
    /// Fetch and map details for one place ID
    pub async fn enrich<P: DetailsProvider>(
        provider: &P,
        place_id: &str,
    ) -> Result<Option<EnrichedPlace>, PlacesError> {
        let details = provider.place_details(place_id).await?;

        let enriched = Self::from_details(provider, &details);
        if enriched.is_none() {
            log::warn!("Details for {} missing required fields", place_id);
        }

        Ok(enriched)
    }

    /// Map a details payload into an enrichment record
    /// DOCUMENTATION: Name, address and coordinates are required; a payload
    /// without them counts as a failed enrichment. Photo references are
    /// bounded and resolved into fetchable URLs.
    pub fn from_details<P: DetailsProvider>(
        provider: &P,
        details: &PlaceDetails,
    ) -> Option<EnrichedPlace> {
        let name = details.name.clone()?;
        let formatted_address = details.formatted_address.clone()?;
        let location = details.geometry.as_ref()?.location.clone();

        let photo_urls: Vec<String> = details
            .photos
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|photo| photo.photo_reference.as_deref())
            .take(PHOTO_LIMIT)
            .map(|reference| provider.photo_url(reference))
            .collect();

        let description = Self::extract_description(
            details
                .editorial_summary
                .as_ref()
                .and_then(|summary| summary.overview.as_deref()),
            details.reviews.as_deref().unwrap_or_default(),
        );

        Some(EnrichedPlace {
            name,
            formatted_address,
            latitude: location.lat,
            longitude: location.lng,
            rating: details.rating,
            user_ratings_total: details.user_ratings_total,
            price_level: details.price_level,
            place_types: details.types.clone().unwrap_or_default(),
            description,
            photo_urls,
        })
    }

    /// Choose a description for a place
    /// DOCUMENTATION: Editorial summary verbatim when present; else the
    /// first review truncated to 300 characters with an ellipsis marker;
    /// else empty
    pub fn extract_description(editorial_summary: Option<&str>, reviews: &[Review]) -> String {
        if let Some(summary) = editorial_summary {
            if !summary.is_empty() {
                return summary.to_string();
            }
        }

        if let Some(text) = reviews.first().and_then(|review| review.text.as_deref()) {
            if !text.is_empty() {
                return truncate_with_ellipsis(text, DESCRIPTION_MAX_CHARS);
            }
        }

        String::new()
    }
}

fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}{}", truncated, ELLIPSIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::google_places_client::{
        EditorialSummary, Geometry, Location, PhotoReference,
    };
    use std::time::Duration;

    fn test_client() -> GooglePlacesClient {
        GooglePlacesClient::new("test_key".to_string(), Duration::from_secs(30)).unwrap()
    }

    fn review(text: &str) -> Review {
        Review {
            author_name: Some("A traveller".to_string()),
            rating: Some(5),
            text: Some(text.to_string()),
            time: Some(1_700_000_000),
            relative_time_description: Some("a month ago".to_string()),
        }
    }

    fn base_details() -> PlaceDetails {
        PlaceDetails {
            name: Some("Vembanad Lake".to_string()),
            formatted_address: Some("Kumarakom, Kottayam, Kerala".to_string()),
            geometry: Some(Geometry {
                location: Location { lat: 9.59, lng: 76.42 },
            }),
            rating: Some(4.6),
            user_ratings_total: Some(1820),
            types: Some(vec!["tourist_attraction".to_string(), "natural_feature".to_string()]),
            url: None,
            price_level: None,
            photos: None,
            editorial_summary: None,
            reviews: None,
        }
    }

    /// Stub provider with a scripted details outcome
    enum StubOutcome {
        Details(PlaceDetails),
        NotFound,
        Unavailable,
    }

    struct StubDetails {
        outcome: StubOutcome,
    }

    impl DetailsProvider for StubDetails {
        async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
            match &self.outcome {
                StubOutcome::Details(details) => Ok(details.clone()),
                StubOutcome::NotFound => Err(PlacesError::NotFound(place_id.to_string())),
                StubOutcome::Unavailable => {
                    Err(PlacesError::UpstreamUnavailable("stub outage".to_string()))
                }
            }
        }

        fn photo_url(&self, photo_reference: &str) -> String {
            format!("http://photos.test/{}", photo_reference)
        }
    }

    #[test]
    fn test_editorial_summary_used_verbatim() {
        let description = PlaceEnricher::extract_description(
            Some("The largest lake in Kerala."),
            &[review("Beautiful place, we stayed on a houseboat.")],
        );

        assert_eq!(description, "The largest lake in Kerala.");
    }

    #[test]
    fn test_long_review_is_truncated_to_300_chars() {
        let long_review = "x".repeat(450);
        let description = PlaceEnricher::extract_description(None, &[review(&long_review)]);

        assert_eq!(description.chars().count(), 303);
        assert!(description.ends_with("..."));
        assert_eq!(&description[..300], "x".repeat(300));
    }

    #[test]
    fn test_short_review_is_kept_whole() {
        let description =
            PlaceEnricher::extract_description(None, &[review("Quiet and scenic.")]);

        assert_eq!(description, "Quiet and scenic.");
    }

    #[test]
    fn test_review_of_exactly_300_chars_gets_no_ellipsis() {
        let exact = "y".repeat(300);
        let description = PlaceEnricher::extract_description(None, &[review(&exact)]);

        assert_eq!(description.chars().count(), 300);
        assert!(!description.ends_with("..."));
    }

    #[test]
    fn test_no_summary_and_no_reviews_gives_empty_description() {
        assert_eq!(PlaceEnricher::extract_description(None, &[]), "");
    }

    #[test]
    fn test_photo_urls_bounded_and_resolved() {
        let client = test_client();
        let mut details = base_details();
        details.photos = Some(
            (0..8)
                .map(|i| PhotoReference {
                    photo_reference: Some(format!("ref{}", i)),
                    width: Some(800),
                    height: Some(600),
                })
                .collect(),
        );

        let enriched = PlaceEnricher::from_details(&client, &details).unwrap();

        assert_eq!(enriched.photo_urls.len(), PHOTO_LIMIT);
        assert!(enriched.photo_urls[0].contains("photoreference=ref0"));
        assert!(enriched.photo_urls[0].contains("maxwidth=800"));
    }

    #[test]
    fn test_details_missing_address_count_as_failure() {
        let client = test_client();
        let mut details = base_details();
        details.formatted_address = None;

        assert!(PlaceEnricher::from_details(&client, &details).is_none());
    }

    #[test]
    fn test_from_details_maps_all_fields() {
        let client = test_client();
        let mut details = base_details();
        details.editorial_summary = Some(EditorialSummary {
            overview: Some("Backwater destination.".to_string()),
        });

        let enriched = PlaceEnricher::from_details(&client, &details).unwrap();

        assert_eq!(enriched.name, "Vembanad Lake");
        assert_eq!(enriched.formatted_address, "Kumarakom, Kottayam, Kerala");
        assert_eq!(enriched.latitude, 9.59);
        assert_eq!(enriched.longitude, 76.42);
        assert_eq!(enriched.rating, Some(4.6));
        assert_eq!(enriched.user_ratings_total, Some(1820));
        assert_eq!(enriched.description, "Backwater destination.");
        assert_eq!(enriched.place_types.len(), 2);
    }

    #[tokio::test]
    async fn test_enrich_maps_successful_details() {
        let mut details = base_details();
        details.photos = Some(vec![PhotoReference {
            photo_reference: Some("ref0".to_string()),
            width: Some(800),
            height: Some(600),
        }]);
        let provider = StubDetails {
            outcome: StubOutcome::Details(details),
        };

        let enriched = PlaceEnricher::enrich(&provider, "ChIJabc").await.unwrap();

        let enriched = enriched.unwrap();
        assert_eq!(enriched.name, "Vembanad Lake");
        assert_eq!(enriched.photo_urls, vec!["http://photos.test/ref0"]);
    }

    #[tokio::test]
    async fn test_enrich_incomplete_payload_yields_none() {
        let mut details = base_details();
        details.geometry = None;
        let provider = StubDetails {
            outcome: StubOutcome::Details(details),
        };

        let result = PlaceEnricher::enrich(&provider, "ChIJabc").await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_enrich_preserves_upstream_failure() {
        let provider = StubDetails {
            outcome: StubOutcome::Unavailable,
        };

        let result = PlaceEnricher::enrich(&provider, "ChIJabc").await;

        assert!(matches!(result, Err(PlacesError::UpstreamUnavailable(_))));
    }

    #[tokio::test]
    async fn test_enrich_preserves_not_found() {
        let provider = StubDetails {
            outcome: StubOutcome::NotFound,
        };

        let result = PlaceEnricher::enrich(&provider, "ChIJmissing").await;

        assert!(matches!(result, Err(PlacesError::NotFound(_))));
    }
}
