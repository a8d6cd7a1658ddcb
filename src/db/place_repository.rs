// src/db/place_repository.rs
// DOCUMENTATION: Database access layer for cached places
// PURPOSE: Abstract database operations from business logic

use crate::errors::PlacesError;
use crate::models::{EnrichedPlace, Place, SearchHit};
use crate::services::cache::ADDRESS_PLACEHOLDER;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

const PLACE_COLUMNS: &str = r#"
    id, google_place_id, name, formatted_address,
    latitude, longitude, rating, user_ratings_total, price_level,
    place_types, description, photo_urls,
    weather_data, last_weather_update,
    is_active, created_at, updated_at
"#;

/// PlaceRepository: All database operations for places
/// DOCUMENTATION: The places table is the cache for the external provider,
/// keyed by google_place_id. Every write path goes through a single
/// statement per row so concurrent requests settle last-write-wins without
/// ever duplicating an external ID.
pub struct PlaceRepository;

impl PlaceRepository {
    /// Upsert a search hit by Google Place ID
    /// DOCUMENTATION: Atomic insert-or-update in one statement. A new row
    /// starts with the address placeholder and no photos, which is exactly
    /// what the freshness policy treats as "needs enrichment". An existing
    /// row only gets its name/coordinates refreshed; enriched fields are
    /// left untouched.
    pub async fn upsert_search_hit(pool: &PgPool, hit: &SearchHit) -> Result<Place, PlacesError> {
        let sql = format!(
            r#"
            INSERT INTO places (
                google_place_id, name, formatted_address,
                latitude, longitude, place_types, description, photo_urls,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, '{{}}', '', '{{}}', NOW(), NOW())
            ON CONFLICT (google_place_id) DO UPDATE
            SET name = EXCLUDED.name,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                is_active = true,
                updated_at = NOW()
            RETURNING {}
            "#,
            PLACE_COLUMNS
        );

        let place = sqlx::query_as::<_, Place>(&sql)
            .bind(&hit.google_place_id)
            .bind(&hit.name)
            .bind(ADDRESS_PLACEHOLDER)
            .bind(hit.latitude)
            .bind(hit.longitude)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to upsert place {}: {}", hit.google_place_id, e);
                PlacesError::DatabaseError(e.to_string())
            })?;

        Ok(place)
    }

    /// Apply enrichment results to a cached row
    /// DOCUMENTATION: Called only when the freshness policy demanded it;
    /// replaces every detail field in one statement
    pub async fn apply_enrichment(
        pool: &PgPool,
        google_place_id: &str,
        enriched: &EnrichedPlace,
    ) -> Result<Place, PlacesError> {
        let sql = format!(
            r#"
            UPDATE places
            SET name = $1,
                formatted_address = $2,
                latitude = $3,
                longitude = $4,
                rating = $5,
                user_ratings_total = $6,
                price_level = $7,
                place_types = $8,
                description = $9,
                photo_urls = $10,
                updated_at = NOW()
            WHERE google_place_id = $11
            RETURNING {}
            "#,
            PLACE_COLUMNS
        );

        let place = sqlx::query_as::<_, Place>(&sql)
            .bind(&enriched.name)
            .bind(&enriched.formatted_address)
            .bind(enriched.latitude)
            .bind(enriched.longitude)
            .bind(enriched.rating)
            .bind(enriched.user_ratings_total)
            .bind(enriched.price_level)
            .bind(&enriched.place_types)
            .bind(&enriched.description)
            .bind(&enriched.photo_urls)
            .bind(google_place_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to enrich place {}: {}", google_place_id, e);
                PlacesError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| PlacesError::NotFound(google_place_id.to_string()))?;

        log::debug!("Enriched place {}", google_place_id);
        Ok(place)
    }

    /// Store a fresh weather snapshot on a place row
    pub async fn update_weather(
        pool: &PgPool,
        place_id: Uuid,
        weather: &Value,
        fetched_at: DateTime<Utc>,
    ) -> Result<Place, PlacesError> {
        let sql = format!(
            r#"
            UPDATE places
            SET weather_data = $1,
                last_weather_update = $2,
                updated_at = NOW()
            WHERE id = $3
            RETURNING {}
            "#,
            PLACE_COLUMNS
        );

        let place = sqlx::query_as::<_, Place>(&sql)
            .bind(weather)
            .bind(fetched_at)
            .bind(place_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to update weather for {}: {}", place_id, e);
                PlacesError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| PlacesError::NotFound(place_id.to_string()))?;

        Ok(place)
    }

    /// Look up a place by its external ID
    /// DOCUMENTATION: Returns None for unseen IDs so the caller can decide
    /// whether to create the row from fresh provider data
    pub async fn find_by_google_place_id(
        pool: &PgPool,
        google_place_id: &str,
    ) -> Result<Option<Place>, PlacesError> {
        let sql = format!(
            "SELECT {} FROM places WHERE google_place_id = $1 AND is_active = true",
            PLACE_COLUMNS
        );

        sqlx::query_as::<_, Place>(&sql)
            .bind(google_place_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to get place {}: {}", google_place_id, e);
                PlacesError::DatabaseError(e.to_string())
            })
    }

    /// Retrieve place by internal ID
    #[allow(dead_code)]
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Place, PlacesError> {
        let sql = format!(
            "SELECT {} FROM places WHERE id = $1 AND is_active = true",
            PLACE_COLUMNS
        );

        sqlx::query_as::<_, Place>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching place: {}", e);
                PlacesError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| {
                log::warn!("Place not found: {}", id);
                PlacesError::NotFound(id.to_string())
            })
    }

    /// Soft-deactivate a place
    /// DOCUMENTATION: Rows are never physically deleted
    #[allow(dead_code)]
    pub async fn deactivate(pool: &PgPool, id: Uuid) -> Result<(), PlacesError> {
        let rows = sqlx::query(
            "UPDATE places SET is_active = false, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Deactivate failed for place {}: {}", id, e);
            PlacesError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(PlacesError::NotFound(id.to_string()));
        }

        log::info!("Deactivated place: {}", id);
        Ok(())
    }
}
