// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Handle communication with the text-search, details and photo endpoints

use crate::errors::PlacesError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// Field mask for the v1 text-search endpoint
/// Search only needs the identity and position of each hit; everything
/// else comes from the details endpoint per unique place
const SEARCH_FIELD_MASK: &str = "places.displayName,places.id,places.location";

/// Fields requested from the details endpoint
const DETAILS_FIELDS: &str = "name,formatted_address,geometry,rating,user_ratings_total,types,url,price_level,photos,editorial_summary,reviews";

/// Width used when resolving photo references into fetchable URLs
const PHOTO_MAX_WIDTH: u32 = 800;

/// Google Places API client
/// DOCUMENTATION: Holds one reqwest client with a bounded timeout;
/// constructed once at startup and injected into handlers
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    search_url: String,
    details_url: String,
    photo_base_url: String,
}

/// Response from the v1 text-search endpoint
#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    #[serde(default)]
    pub places: Vec<TextSearchPlace>,
}

/// One hit from text search, shaped by SEARCH_FIELD_MASK
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSearchPlace {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedText {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Detailed place payload from the legacy details endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i32>,
    pub types: Option<Vec<String>>,
    pub url: Option<String>,
    pub price_level: Option<i32>,
    pub photos: Option<Vec<PhotoReference>>,
    pub editorial_summary: Option<EditorialSummary>,
    pub reviews: Option<Vec<Review>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Geometry {
    pub location: Location,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Photo reference entry; resolved to a URL via photo_url()
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhotoReference {
    pub photo_reference: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// Provider-supplied short description of a place
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EditorialSummary {
    pub overview: Option<String>,
}

/// User review from the details endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Review {
    pub author_name: Option<String>,
    pub rating: Option<i32>,
    pub text: Option<String>,
    pub time: Option<i64>,
    pub relative_time_description: Option<String>,
}

impl GooglePlacesClient {
    /// Create a new Google Places API client
    /// DOCUMENTATION: Fails with ConfigurationError when the key is absent;
    /// the service cannot run without it
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PlacesError> {
        if api_key.is_empty() {
            return Err(PlacesError::ConfigurationError(
                "GOOGLE_API_KEY is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlacesError::ConfigurationError(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            search_url: "https://places.googleapis.com/v1/places:searchText".to_string(),
            details_url: "https://maps.googleapis.com/maps/api/place/details/json".to_string(),
            photo_base_url: "https://maps.googleapis.com/maps/api/place/photo".to_string(),
        })
    }

    /// Search for places using a natural-language text query
    /// DOCUMENTATION: POST with the API key and field mask headers;
    /// result count is bounded per call by the caller
    pub async fn text_search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<TextSearchPlace>, PlacesError> {
        let payload = json!({
            "textQuery": query,
            "maxResultCount": max_results,
            "languageCode": "en"
        });

        log::debug!("Places text search: {}", query);

        let response = self
            .client
            .post(&self.search_url)
            .header("Content-Type", "application/json")
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", SEARCH_FIELD_MASK)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Places search request failed: {}", e);
                PlacesError::UpstreamUnavailable(format!("Search request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Places search error {}: {}", status, body);
            return Err(PlacesError::UpstreamUnavailable(format!(
                "Search error {}",
                status
            )));
        }

        let body: TextSearchResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse search response: {}", e);
            PlacesError::UpstreamUnavailable(format!("Search parse error: {}", e))
        })?;

        log::info!("Text search '{}' returned {} places", query, body.places.len());
        Ok(body.places)
    }

    /// Get detailed information about a specific place
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let params = [
            ("place_id", place_id),
            ("fields", DETAILS_FIELDS),
            ("key", &self.api_key),
        ];

        log::debug!("Place details lookup: place_id={}", place_id);

        let response = self
            .client
            .get(&self.details_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Place details request failed: {}", e);
                PlacesError::UpstreamUnavailable(format!("Details request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(PlacesError::UpstreamUnavailable(format!(
                "Details error {}",
                response.status()
            )));
        }

        #[derive(Deserialize)]
        struct DetailsResponse {
            result: Option<PlaceDetails>,
            status: String,
        }

        let body: DetailsResponse = response.json().await.map_err(|e| {
            PlacesError::UpstreamUnavailable(format!("Details parse error: {}", e))
        })?;

        match body.status.as_str() {
            "OK" => body.result.ok_or_else(|| {
                PlacesError::UpstreamUnavailable("Details response missing result".to_string())
            }),
            "NOT_FOUND" | "ZERO_RESULTS" | "INVALID_REQUEST" => {
                Err(PlacesError::NotFound(place_id.to_string()))
            }
            other => {
                log::error!("Place details unexpected status: {}", other);
                Err(PlacesError::UpstreamUnavailable(format!(
                    "Details status: {}",
                    other
                )))
            }
        }
    }

    /// Resolve a photo reference into a fetchable URL
    pub fn photo_url(&self, photo_reference: &str) -> String {
        format!(
            "{}?maxwidth={}&photoreference={}&key={}",
            self.photo_base_url, PHOTO_MAX_WIDTH, photo_reference, self.api_key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GooglePlacesClient {
        GooglePlacesClient::new("test_key".to_string(), Duration::from_secs(30)).unwrap()
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let result = GooglePlacesClient::new(String::new(), Duration::from_secs(30));
        assert!(matches!(result, Err(PlacesError::ConfigurationError(_))));
    }

    #[test]
    fn test_photo_url_format() {
        let client = test_client();
        let url = client.photo_url("ref123");

        assert_eq!(
            url,
            "https://maps.googleapis.com/maps/api/place/photo?maxwidth=800&photoreference=ref123&key=test_key"
        );
    }

    #[test]
    fn test_search_response_parsing() {
        let raw = r#"{
            "places": [
                {
                    "id": "ChIJabc",
                    "displayName": {"text": "Vembanad Lake", "languageCode": "en"},
                    "location": {"latitude": 9.59, "longitude": 76.42}
                },
                {"id": "ChIJdef"}
            ]
        }"#;

        let parsed: TextSearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.places.len(), 2);
        assert_eq!(parsed.places[0].id.as_deref(), Some("ChIJabc"));
        assert_eq!(
            parsed.places[0].display_name.as_ref().unwrap().text,
            "Vembanad Lake"
        );
        assert!(parsed.places[1].location.is_none());
    }

    #[test]
    fn test_empty_search_response_parsing() {
        // ZERO_RESULTS responses omit the places array entirely
        let parsed: TextSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.places.is_empty());
    }
}
