// src/db/favorite_repository.rs
// DOCUMENTATION: Favorite and visit database operations
// PURPOSE: Toggle semantics for favorites, append-only visit log

use crate::errors::PlacesError;
use crate::models::{Place, PlaceVisit, UserFavorite};
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

pub struct FavoriteRepository;

impl FavoriteRepository {
    /// Toggle a (user, place) favorite pair
    /// DOCUMENTATION: Delete-if-present, insert otherwise, inside one
    /// transaction. Returns the state after the toggle; toggling twice
    /// always lands back on "not favorited" with the row gone.
    pub async fn toggle(
        pool: &PgPool,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<bool, PlacesError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to begin favorite toggle: {}", e);
            PlacesError::DatabaseError(e.to_string())
        })?;

        let deleted = sqlx::query(
            "DELETE FROM user_favorites WHERE user_id = $1 AND place_id = $2",
        )
        .bind(user_id)
        .bind(place_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Favorite delete failed: {}", e);
            PlacesError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        let favorited = deleted == 0;

        if favorited {
            let favorite = sqlx::query_as::<_, UserFavorite>(
                r#"
                INSERT INTO user_favorites (user_id, place_id)
                VALUES ($1, $2)
                RETURNING id, user_id, place_id, created_at
                "#,
            )
            .bind(user_id)
            .bind(place_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Favorite insert failed: {}", e);
                PlacesError::DatabaseError(e.to_string())
            })?;

            log::debug!("Created favorite {}", favorite.id);
        }

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit favorite toggle: {}", e);
            PlacesError::DatabaseError(e.to_string())
        })?;

        log::debug!(
            "Favorite toggled for user {} place {}: favorited={}",
            user_id,
            place_id,
            favorited
        );
        Ok(favorited)
    }

    /// Check whether a user has favorited a place
    pub async fn is_favorited(
        pool: &PgPool,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<bool, PlacesError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM user_favorites WHERE user_id = $1 AND place_id = $2)",
        )
        .bind(user_id)
        .bind(place_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Favorite lookup failed: {}", e);
            PlacesError::DatabaseError(e.to_string())
        })?;

        Ok(exists)
    }

    /// Which of the given places the user has favorited
    /// DOCUMENTATION: One query for marking a whole result list
    pub async fn favorited_subset(
        pool: &PgPool,
        user_id: Uuid,
        place_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, PlacesError> {
        if place_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT place_id FROM user_favorites WHERE user_id = $1 AND place_id = ANY($2)",
        )
        .bind(user_id)
        .bind(place_ids)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Favorite subset lookup failed: {}", e);
            PlacesError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// List a user's favorite places, newest favorite first
    pub async fn favorites_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<Place>, PlacesError> {
        let places = sqlx::query_as::<_, Place>(
            r#"
            SELECT p.id, p.google_place_id, p.name, p.formatted_address,
                   p.latitude, p.longitude, p.rating, p.user_ratings_total, p.price_level,
                   p.place_types, p.description, p.photo_urls,
                   p.weather_data, p.last_weather_update,
                   p.is_active, p.created_at, p.updated_at
            FROM places p
            JOIN user_favorites f ON f.place_id = p.id
            WHERE f.user_id = $1 AND p.is_active = true
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Favorites listing failed for {}: {}", user_id, e);
            PlacesError::DatabaseError(e.to_string())
        })?;

        Ok(places)
    }

    /// Append a visit to the log
    /// DOCUMENTATION: Write-once; there is no update or delete path
    pub async fn record_visit(
        pool: &PgPool,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<PlaceVisit, PlacesError> {
        sqlx::query_as::<_, PlaceVisit>(
            r#"
            INSERT INTO place_visits (user_id, place_id)
            VALUES ($1, $2)
            RETURNING id, user_id, place_id, visited_at
            "#,
        )
        .bind(user_id)
        .bind(place_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Visit insert failed: {}", e);
            PlacesError::DatabaseError(e.to_string())
        })
    }
}
