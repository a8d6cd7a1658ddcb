// src/services/cache.rs
// DOCUMENTATION: Freshness policy for cached place rows
// PURPOSE: Decide when a row must be re-enriched or its weather refetched

use crate::models::Place;
use chrono::{DateTime, Duration, Utc};

/// Address value a row carries between creation and first enrichment
pub const ADDRESS_PLACEHOLDER: &str = "Address not available";

/// Cached weather older than this is refetched
pub const WEATHER_MAX_AGE_MINUTES: i64 = 60;

/// Whether a cached row must be re-enriched on read
/// DOCUMENTATION: True for rows still carrying creation placeholders:
/// an empty or placeholder address, or no cached photos. A row with a
/// real address and photos is served as-is.
pub fn needs_enrichment(place: &Place) -> bool {
    let address = place.formatted_address.trim();
    address.is_empty() || address == ADDRESS_PLACEHOLDER || place.photo_urls.is_empty()
}

/// Whether a cached weather snapshot is still fresh
/// DOCUMENTATION: Pure function of (now - last_update) against the 1-hour
/// window; absent weather is never fresh
pub fn weather_is_fresh(last_update: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last_update {
        Some(updated_at) => now - updated_at < Duration::minutes(WEATHER_MAX_AGE_MINUTES),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn place_with(address: &str, photo_urls: Vec<String>) -> Place {
        Place {
            id: Uuid::new_v4(),
            google_place_id: "ChIJtest".to_string(),
            name: "Test Place".to_string(),
            formatted_address: address.to_string(),
            latitude: 9.59,
            longitude: 76.42,
            rating: None,
            user_ratings_total: None,
            price_level: None,
            place_types: vec![],
            description: String::new(),
            photo_urls,
            weather_data: None,
            last_weather_update: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_placeholder_address_triggers_enrichment() {
        let place = place_with(ADDRESS_PLACEHOLDER, vec!["http://p/1".to_string()]);
        assert!(needs_enrichment(&place));
    }

    #[test]
    fn test_empty_address_triggers_enrichment() {
        let place = place_with("", vec!["http://p/1".to_string()]);
        assert!(needs_enrichment(&place));
    }

    #[test]
    fn test_missing_photos_trigger_enrichment() {
        let place = place_with("Kumarakom, Kottayam, Kerala", vec![]);
        assert!(needs_enrichment(&place));
    }

    #[test]
    fn test_real_address_with_photos_is_fresh() {
        let place = place_with(
            "Kumarakom, Kottayam, Kerala",
            vec!["http://p/1".to_string()],
        );
        assert!(!needs_enrichment(&place));
    }

    #[test]
    fn test_weather_absent_is_stale() {
        assert!(!weather_is_fresh(None, Utc::now()));
    }

    #[test]
    fn test_weather_59_minutes_old_is_fresh() {
        let now = Utc::now();
        assert!(weather_is_fresh(Some(now - Duration::minutes(59)), now));
    }

    #[test]
    fn test_weather_61_minutes_old_is_stale() {
        let now = Utc::now();
        assert!(!weather_is_fresh(Some(now - Duration::minutes(61)), now));
    }

    #[test]
    fn test_weather_exactly_one_hour_old_is_stale() {
        let now = Utc::now();
        assert!(!weather_is_fresh(Some(now - Duration::minutes(60)), now));
    }
}
