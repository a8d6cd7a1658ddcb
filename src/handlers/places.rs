// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place operations
// PURPOSE: Parse requests, call services, return responses

use crate::db::PreferenceRepository;
use crate::errors::PlacesError;
use crate::models::{RecommendationQuery, UserQuery};
use crate::services::{GooglePlacesClient, PlaceService, WeatherClient};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

/// GET /places/recommendations
/// Aggregated recommendations for the caller's preferences. Explicit
/// comma-separated districts/geographies override the stored preferences.
pub async fn recommendations(
    pool: web::Data<PgPool>,
    google: web::Data<GooglePlacesClient>,
    query: web::Query<RecommendationQuery>,
) -> Result<impl Responder, PlacesError> {
    let query = query.into_inner();
    let (districts, geographies) = resolve_search_terms(pool.get_ref(), &query).await?;

    let result = PlaceService::recommendations(
        pool.get_ref(),
        google.get_ref(),
        &districts,
        &geographies,
        query.user_id,
    )
    .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// GET /places/favorites
/// The caller's favorite places
pub async fn favorites(
    pool: web::Data<PgPool>,
    query: web::Query<UserQuery>,
) -> Result<impl Responder, PlacesError> {
    let user_id = query
        .user_id
        .ok_or_else(|| PlacesError::InvalidInput("user_id is required".to_string()))?;

    let result = PlaceService::favorites(pool.get_ref(), user_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /places/{place_id}
/// Full place details with photos and weather; records a visit when the
/// caller identifies themselves
pub async fn get_place(
    pool: web::Data<PgPool>,
    google: web::Data<GooglePlacesClient>,
    weather: web::Data<WeatherClient>,
    path: web::Path<String>,
    query: web::Query<UserQuery>,
) -> Result<impl Responder, PlacesError> {
    let place_id = path.into_inner();

    let result = PlaceService::place_detail(
        pool.get_ref(),
        google.get_ref(),
        weather.get_ref(),
        &place_id,
        query.user_id,
    )
    .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// POST /places/{place_id}/favorite
/// Toggle the favorite state for the caller
pub async fn toggle_favorite(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    query: web::Query<UserQuery>,
) -> Result<impl Responder, PlacesError> {
    let user_id = query
        .user_id
        .ok_or_else(|| PlacesError::InvalidInput("user_id is required".to_string()))?;

    let place_id = path.into_inner();
    let result = PlaceService::toggle_favorite(pool.get_ref(), user_id, &place_id).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Resolve the district/geography names the aggregator should search
/// DOCUMENTATION: Explicit query parameters win; otherwise the stored
/// preference codes are resolved to display names
async fn resolve_search_terms(
    pool: &PgPool,
    query: &RecommendationQuery,
) -> Result<(Vec<String>, Vec<String>), PlacesError> {
    if let (Some(districts), Some(geographies)) = (&query.districts, &query.geographies) {
        return Ok((split_csv(districts), split_csv(geographies)));
    }

    let user_id = query.user_id.ok_or_else(|| {
        PlacesError::InvalidInput(
            "user_id or explicit districts/geographies are required".to_string(),
        )
    })?;

    let preferences = PreferenceRepository::get_preferences(pool, user_id)
        .await?
        .ok_or_else(|| {
            PlacesError::NotFound(format!("No preferences stored for user {}", user_id))
        })?;

    let districts = PreferenceRepository::district_names(pool, &preferences.preferred_districts).await?;
    let geographies =
        PreferenceRepository::geography_names(pool, &preferences.preferred_geographies).await?;

    Ok((districts, geographies))
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Configuration for place routes
/// DOCUMENTATION: Literal segments registered before the {place_id} catch-all
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/places")
            .route("/recommendations", web::get().to(recommendations))
            .route("/favorites", web::get().to(favorites))
            .route("/{place_id}", web::get().to(get_place))
            .route("/{place_id}/favorite", web::post().to(toggle_favorite)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_csv_trims_and_drops_empties() {
        assert_eq!(
            split_csv("Kottayam, Idukki ,,  Alappuzha"),
            vec!["Kottayam", "Idukki", "Alappuzha"]
        );
        assert!(split_csv("  ,").is_empty());
    }
}
