// src/services/place_service.rs
// DOCUMENTATION: Business logic for places
// PURPOSE: Orchestrates aggregation, cache freshness, enrichment and weather

use crate::db::{FavoriteRepository, PlaceRepository};
use crate::errors::PlacesError;
use crate::models::{
    FavoriteToggleResponse, FavoritesResponse, Place, PlaceDetailResponse,
    RecommendationResponse, SearchHit,
};
use crate::services::cache;
use crate::services::{GooglePlacesClient, PlaceAggregator, PlaceEnricher, WeatherClient};
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

pub struct PlaceService;

impl PlaceService {
    /// Build the recommendation list for a set of preference names
    /// DOCUMENTATION: Aggregate (one search per pair, deduplicated), upsert
    /// every unique hit, enrich the rows the freshness policy flags, and
    /// respond in first-seen order
    pub async fn recommendations(
        pool: &PgPool,
        google: &GooglePlacesClient,
        districts: &[String],
        geographies: &[String],
        user_id: Option<Uuid>,
    ) -> Result<RecommendationResponse, PlacesError> {
        if districts.is_empty() || geographies.is_empty() {
            return Err(PlacesError::InvalidInput(
                "At least one district and one geography are required".to_string(),
            ));
        }

        let hits = PlaceAggregator::search_by_preferences(google, districts, geographies).await;

        log::info!(
            "Aggregated {} unique places from {} preference pairs",
            hits.len(),
            districts.len() * geographies.len()
        );

        let mut places: Vec<Place> = Vec::with_capacity(hits.len());
        for hit in &hits {
            let place = Self::cache_and_enrich(pool, google, hit).await?;
            places.push(place);
        }

        let place_ids: Vec<Uuid> = places.iter().map(|p| p.id).collect();
        let favorited = match user_id {
            Some(uid) => FavoriteRepository::favorited_subset(pool, uid, &place_ids).await?,
            None => HashSet::new(),
        };

        let items = places
            .iter()
            .map(|place| place.to_list_item(favorited.contains(&place.id)))
            .collect::<Vec<_>>();

        Ok(RecommendationResponse {
            total: items.len(),
            places: items,
        })
    }

    /// Upsert one search hit and enrich it when the cache says so
    /// DOCUMENTATION: A failed enrichment leaves the placeholder row in
    /// place; it will be retried on the next read
    async fn cache_and_enrich(
        pool: &PgPool,
        google: &GooglePlacesClient,
        hit: &SearchHit,
    ) -> Result<Place, PlacesError> {
        let place = PlaceRepository::upsert_search_hit(pool, hit).await?;

        if !cache::needs_enrichment(&place) {
            return Ok(place);
        }

        match PlaceEnricher::enrich(google, &hit.google_place_id).await {
            Ok(Some(enriched)) => {
                PlaceRepository::apply_enrichment(pool, &hit.google_place_id, &enriched).await
            }
            Ok(None) => Ok(place),
            Err(e) => {
                log::warn!(
                    "Enrichment failed for {}, keeping placeholder: {}",
                    hit.google_place_id,
                    e
                );
                Ok(place)
            }
        }
    }

    /// Full place payload: details, photos and weather
    /// DOCUMENTATION: Unseen IDs are resolved through the details endpoint
    /// and cached; stale weather is refetched and stamped; a visit is
    /// appended when the caller identifies themselves
    pub async fn place_detail(
        pool: &PgPool,
        google: &GooglePlacesClient,
        weather: &WeatherClient,
        place_id: &str,
        user_id: Option<Uuid>,
    ) -> Result<PlaceDetailResponse, PlacesError> {
        if place_id.trim().is_empty() {
            return Err(PlacesError::InvalidInput("place_id is required".to_string()));
        }

        let mut place = match PlaceRepository::find_by_google_place_id(pool, place_id).await? {
            Some(existing) => {
                if cache::needs_enrichment(&existing) {
                    match PlaceEnricher::enrich(google, place_id).await {
                        Ok(Some(enriched)) => {
                            PlaceRepository::apply_enrichment(pool, place_id, &enriched).await?
                        }
                        Ok(None) => existing,
                        Err(e) => {
                            log::warn!(
                                "Re-enrichment failed for {}, serving cached values: {}",
                                place_id,
                                e
                            );
                            existing
                        }
                    }
                } else {
                    existing
                }
            }
            None => {
                // First sighting of this ID: no cached row to fall back
                // on, so provider failures propagate with their own
                // status (404 only for a genuinely unknown ID)
                let enriched = PlaceEnricher::enrich(google, place_id).await?.ok_or_else(|| {
                    PlacesError::UpstreamUnavailable(format!(
                        "Details response for {} was missing required fields",
                        place_id
                    ))
                })?;

                let hit = SearchHit {
                    google_place_id: place_id.to_string(),
                    name: enriched.name.clone(),
                    latitude: enriched.latitude,
                    longitude: enriched.longitude,
                };
                PlaceRepository::upsert_search_hit(pool, &hit).await?;
                PlaceRepository::apply_enrichment(pool, place_id, &enriched).await?
            }
        };

        if !cache::weather_is_fresh(place.last_weather_update, Utc::now()) {
            match weather.fetch(place.latitude, place.longitude).await {
                Ok(snapshot) => {
                    if let Ok(value) = serde_json::to_value(&snapshot) {
                        place = PlaceRepository::update_weather(
                            pool,
                            place.id,
                            &value,
                            snapshot.last_updated,
                        )
                        .await?;
                    }
                }
                Err(e) => {
                    log::warn!(
                        "Weather refresh failed for {}, serving cached weather: {}",
                        place.google_place_id,
                        e
                    );
                }
            }
        }

        let favorited = match user_id {
            Some(uid) => FavoriteRepository::is_favorited(pool, uid, place.id).await?,
            None => false,
        };

        if let Some(uid) = user_id {
            let visit = FavoriteRepository::record_visit(pool, uid, place.id).await?;
            log::debug!(
                "Recorded visit {} to place {}",
                visit.id,
                place.google_place_id
            );
        }

        Ok(place.to_detail_response(favorited))
    }

    /// Toggle a favorite for a cached place
    pub async fn toggle_favorite(
        pool: &PgPool,
        user_id: Uuid,
        place_id: &str,
    ) -> Result<FavoriteToggleResponse, PlacesError> {
        let place = PlaceRepository::find_by_google_place_id(pool, place_id)
            .await?
            .ok_or_else(|| PlacesError::NotFound(place_id.to_string()))?;

        let favorited = FavoriteRepository::toggle(pool, user_id, place.id).await?;

        Ok(FavoriteToggleResponse {
            place_id: place.id,
            favorited,
        })
    }

    /// A user's favorite places, newest first
    pub async fn favorites(pool: &PgPool, user_id: Uuid) -> Result<FavoritesResponse, PlacesError> {
        let places = FavoriteRepository::favorites_for_user(pool, user_id).await?;

        let items = places
            .iter()
            .map(|place| place.to_list_item(true))
            .collect::<Vec<_>>();

        Ok(FavoritesResponse {
            total: items.len(),
            favorites: items,
        })
    }
}
