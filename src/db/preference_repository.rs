// src/db/preference_repository.rs
// DOCUMENTATION: Reference data and user preference operations
// PURPOSE: Districts/geographies lookups and the preference upsert

use crate::errors::PlacesError;
use crate::models::{District, Geography, UpdatePreferencesRequest, UserPreference};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PreferenceRepository;

impl PreferenceRepository {
    /// All districts, alphabetical
    pub async fn list_districts(pool: &PgPool) -> Result<Vec<District>, PlacesError> {
        sqlx::query_as::<_, District>(
            r#"
            SELECT code, name, sw_longitude, sw_latitude, ne_longitude, ne_latitude
            FROM districts
            ORDER BY name
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("District listing failed: {}", e);
            PlacesError::DatabaseError(e.to_string())
        })
    }

    /// All geography categories, alphabetical
    pub async fn list_geographies(pool: &PgPool) -> Result<Vec<Geography>, PlacesError> {
        sqlx::query_as::<_, Geography>(
            "SELECT code, name, api_code, description FROM geographies ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Geography listing failed: {}", e);
            PlacesError::DatabaseError(e.to_string())
        })
    }

    /// Resolve district codes to display names, preserving input order
    pub async fn district_names(
        pool: &PgPool,
        codes: &[String],
    ) -> Result<Vec<String>, PlacesError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT code, name FROM districts WHERE code = ANY($1)")
                .bind(codes)
                .fetch_all(pool)
                .await
                .map_err(|e| {
                    log::error!("District name resolution failed: {}", e);
                    PlacesError::DatabaseError(e.to_string())
                })?;

        Ok(codes
            .iter()
            .filter_map(|code| {
                rows.iter()
                    .find(|(c, _)| c == code)
                    .map(|(_, name)| name.clone())
            })
            .collect())
    }

    /// Resolve geography codes to display names, preserving input order
    pub async fn geography_names(
        pool: &PgPool,
        codes: &[String],
    ) -> Result<Vec<String>, PlacesError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT code, name FROM geographies WHERE code = ANY($1)")
                .bind(codes)
                .fetch_all(pool)
                .await
                .map_err(|e| {
                    log::error!("Geography name resolution failed: {}", e);
                    PlacesError::DatabaseError(e.to_string())
                })?;

        Ok(codes
            .iter()
            .filter_map(|code| {
                rows.iter()
                    .find(|(c, _)| c == code)
                    .map(|(_, name)| name.clone())
            })
            .collect())
    }

    /// A user's stored preferences, if any
    pub async fn get_preferences(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<UserPreference>, PlacesError> {
        sqlx::query_as::<_, UserPreference>(
            r#"
            SELECT user_id, preferred_districts, preferred_geographies,
                   budget_range, created_at, updated_at
            FROM user_preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Preference lookup failed for {}: {}", user_id, e);
            PlacesError::DatabaseError(e.to_string())
        })
    }

    /// Upsert a user's preferences
    /// DOCUMENTATION: Rejects codes that are not in the reference tables
    /// before writing anything
    pub async fn set_preferences(
        pool: &PgPool,
        user_id: Uuid,
        req: &UpdatePreferencesRequest,
    ) -> Result<UserPreference, PlacesError> {
        Self::verify_codes(pool, "districts", &req.preferred_districts).await?;
        Self::verify_codes(pool, "geographies", &req.preferred_geographies).await?;

        let preference = sqlx::query_as::<_, UserPreference>(
            r#"
            INSERT INTO user_preferences (
                user_id, preferred_districts, preferred_geographies, budget_range,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET preferred_districts = EXCLUDED.preferred_districts,
                preferred_geographies = EXCLUDED.preferred_geographies,
                budget_range = COALESCE(EXCLUDED.budget_range, user_preferences.budget_range),
                updated_at = NOW()
            RETURNING user_id, preferred_districts, preferred_geographies,
                      budget_range, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&req.preferred_districts)
        .bind(&req.preferred_geographies)
        .bind(&req.budget_range)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Preference upsert failed for {}: {}", user_id, e);
            PlacesError::DatabaseError(e.to_string())
        })?;

        log::info!("Updated preferences for user {}", user_id);
        Ok(preference)
    }

    /// Ensure every code exists in the named reference table
    async fn verify_codes(
        pool: &PgPool,
        table: &str,
        codes: &[String],
    ) -> Result<(), PlacesError> {
        let sql = format!("SELECT code FROM {} WHERE code = ANY($1)", table);
        let known: Vec<(String,)> = sqlx::query_as(&sql)
            .bind(codes)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Code verification failed: {}", e);
                PlacesError::DatabaseError(e.to_string())
            })?;

        let unknown: Vec<&String> = codes
            .iter()
            .filter(|code| !known.iter().any(|(c,)| c == *code))
            .collect();

        if !unknown.is_empty() {
            return Err(PlacesError::ValidationError(format!(
                "Unknown {} codes: {}",
                table,
                unknown
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        Ok(())
    }
}
