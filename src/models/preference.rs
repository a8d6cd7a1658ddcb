// src/models/preference.rs
// DOCUMENTATION: Reference data and user travel preferences
// PURPOSE: Districts, geography categories and per-user preference rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Kerala district with bounding box coordinates
/// DOCUMENTATION: Static reference data, loaded by the seed binary
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct District {
    /// Short district code (e.g., "KTM")
    pub code: String,
    /// Display name (e.g., "Kottayam")
    pub name: String,
    /// Bounding box: southwest corner
    pub sw_longitude: f64,
    pub sw_latitude: f64,
    /// Bounding box: northeast corner
    pub ne_longitude: f64,
    pub ne_latitude: f64,
}

impl District {
    /// Bounding box in "sw_lon,sw_lat,ne_lon,ne_lat" form for rect filters
    #[allow(dead_code)]
    pub fn bounding_box(&self) -> String {
        format!(
            "{},{},{},{}",
            self.sw_longitude, self.sw_latitude, self.ne_longitude, self.ne_latitude
        )
    }
}

/// Geography category (beaches, hills, backwaters, ...)
/// DOCUMENTATION: api_code is the identifier used toward external providers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Geography {
    pub code: String,
    pub name: String,
    pub api_code: String,
    pub description: String,
}

/// Per-user travel preferences
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserPreference {
    pub user_id: Uuid,
    /// District codes the user selected
    pub preferred_districts: Vec<String>,
    /// Geography codes the user selected
    pub preferred_geographies: Vec<String>,
    /// "low", "medium" or "high"
    pub budget_range: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for PUT /preferences/{user_id}
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePreferencesRequest {
    #[validate(length(min = 1, message = "at least one district is required"))]
    pub preferred_districts: Vec<String>,

    #[validate(length(min = 1, message = "at least one geography is required"))]
    pub preferred_geographies: Vec<String>,

    #[serde(default)]
    pub budget_range: Option<String>,
}

/// Response wrapper for the reference-data listings
#[derive(Debug, Serialize)]
pub struct DistrictsResponse {
    pub districts: Vec<District>,
}

#[derive(Debug, Serialize)]
pub struct GeographiesResponse {
    pub geographies: Vec<Geography>,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: UserPreference,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_format() {
        let district = District {
            code: "KTM".to_string(),
            name: "Kottayam".to_string(),
            sw_longitude: 76.27,
            sw_latitude: 9.25,
            ne_longitude: 76.81,
            ne_latitude: 9.76,
        };

        assert_eq!(district.bounding_box(), "76.27,9.25,76.81,9.76");
    }
}
