// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Defines all serialization/deserialization models for API and database

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Represents a complete place record from the database
/// DOCUMENTATION: This struct maps directly to the places table in PostgreSQL.
/// A row doubles as the cache entry for the external provider: it is created
/// from the first search hit, updated in place on every re-enrichment and
/// never physically deleted (is_active soft flag).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Place {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Google's unique place identifier (stable dedup/cache key)
    pub google_place_id: String,

    /// Place name
    pub name: String,

    /// Full formatted address; holds the placeholder value until enriched
    pub formatted_address: String,

    /// Geographic coordinates
    pub latitude: f64,
    pub longitude: f64,

    /// Rating from Google (0-5)
    pub rating: Option<f64>,

    /// Number of ratings on Google
    pub user_ratings_total: Option<i32>,

    /// Price level from Google (0-4: free to very expensive)
    pub price_level: Option<i32>,

    /// Place type tags from Google
    pub place_types: Vec<String>,

    /// Editorial summary or review-derived description
    pub description: String,

    /// Resolved photo URLs (bounded at enrichment time)
    pub photo_urls: Vec<String>,

    /// Cached weather snapshot (raw JSON as stamped by the enricher)
    pub weather_data: Option<Value>,

    /// When the weather snapshot was taken
    pub last_weather_update: Option<DateTime<Utc>>,

    /// Soft delete flag (true = active, false = deactivated)
    pub is_active: bool,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Record produced by the search aggregator for an unseen place
/// DOCUMENTATION: Carries only what the text-search field mask returns;
/// the rest of the row starts as placeholders until the enricher runs
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub google_place_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Everything the detail enricher extracts for a place
/// DOCUMENTATION: Applied to the cached row via
/// PlaceRepository::apply_enrichment; a failed enrichment produces no
/// record and the row keeps its prior values
#[derive(Debug, Clone)]
pub struct EnrichedPlace {
    pub name: String,
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i32>,
    pub price_level: Option<i32>,
    pub place_types: Vec<String>,
    pub description: String,
    pub photo_urls: Vec<String>,
}

/// Query parameters for the recommendations endpoint
/// DOCUMENTATION: Explicit districts/geographies (comma-separated names)
/// override the stored user preferences
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub user_id: Option<Uuid>,
    pub districts: Option<String>,
    pub geographies: Option<String>,
}

/// Query parameter carrying the acting user
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Option<Uuid>,
}

/// Compact list entry for recommendation responses
/// DOCUMENTATION: Mirrors what list views need: thumbnail + favorite flag
#[derive(Debug, Serialize)]
pub struct PlaceListItem {
    pub id: Uuid,
    pub google_place_id: String,
    pub name: String,
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i32>,
    pub price_level: Option<i32>,
    pub place_types: Vec<String>,
    pub description: String,
    pub first_photo_url: Option<String>,
    pub is_favorited: bool,
}

/// Full place payload for the detail endpoint
#[derive(Debug, Serialize)]
pub struct PlaceDetailResponse {
    pub id: Uuid,
    pub google_place_id: String,
    pub name: String,
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i32>,
    pub price_level: Option<i32>,
    pub place_types: Vec<String>,
    pub description: String,
    pub photo_urls: Vec<String>,
    pub weather: Option<Value>,
    pub is_favorited: bool,
    pub created_at: DateTime<Utc>,
}

/// Recommendation list response
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub places: Vec<PlaceListItem>,
    pub total: usize,
}

impl Place {
    /// Convert Place to a list entry
    pub fn to_list_item(&self, is_favorited: bool) -> PlaceListItem {
        PlaceListItem {
            id: self.id,
            google_place_id: self.google_place_id.clone(),
            name: self.name.clone(),
            formatted_address: self.formatted_address.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            rating: self.rating,
            user_ratings_total: self.user_ratings_total,
            price_level: self.price_level,
            place_types: self.place_types.clone(),
            description: self.description.clone(),
            first_photo_url: self.photo_urls.first().cloned(),
            is_favorited,
        }
    }

    /// Convert Place to the detail payload
    /// DOCUMENTATION: Weather is returned exactly as cached; the snapshot
    /// carries its own last_updated stamp
    pub fn to_detail_response(&self, is_favorited: bool) -> PlaceDetailResponse {
        PlaceDetailResponse {
            id: self.id,
            google_place_id: self.google_place_id.clone(),
            name: self.name.clone(),
            formatted_address: self.formatted_address.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            rating: self.rating,
            user_ratings_total: self.user_ratings_total,
            price_level: self.price_level,
            place_types: self.place_types.clone(),
            description: self.description.clone(),
            photo_urls: self.photo_urls.clone(),
            weather: self.weather_data.clone(),
            is_favorited,
            created_at: self.created_at,
        }
    }
}
