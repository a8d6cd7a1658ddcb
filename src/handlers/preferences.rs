// src/handlers/preferences.rs
// DOCUMENTATION: HTTP handlers for reference data and user preferences
// PURPOSE: Districts/geographies listings and per-user preference rows

use crate::db::PreferenceRepository;
use crate::errors::PlacesError;
use crate::models::{
    DistrictsResponse, GeographiesResponse, PreferencesResponse, UpdatePreferencesRequest,
};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// GET /preferences/districts
/// All available districts with bounding boxes
pub async fn list_districts(pool: web::Data<PgPool>) -> Result<impl Responder, PlacesError> {
    let districts = PreferenceRepository::list_districts(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(DistrictsResponse { districts }))
}

/// GET /preferences/geographies
/// All available geography categories
pub async fn list_geographies(pool: web::Data<PgPool>) -> Result<impl Responder, PlacesError> {
    let geographies = PreferenceRepository::list_geographies(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(GeographiesResponse { geographies }))
}

/// GET /preferences/{user_id}
/// The user's stored travel preferences
pub async fn get_preferences(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, PlacesError> {
    let user_id = path.into_inner();

    let preferences = PreferenceRepository::get_preferences(pool.get_ref(), user_id)
        .await?
        .ok_or_else(|| {
            PlacesError::NotFound(format!("No preferences stored for user {}", user_id))
        })?;

    Ok(HttpResponse::Ok().json(PreferencesResponse { preferences }))
}

/// PUT /preferences/{user_id}
/// Create or replace the user's travel preferences
pub async fn update_preferences(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePreferencesRequest>,
) -> Result<impl Responder, PlacesError> {
    if let Err(e) = req.validate() {
        return Err(PlacesError::ValidationError(e.to_string()));
    }

    let preferences =
        PreferenceRepository::set_preferences(pool.get_ref(), path.into_inner(), &req).await?;

    Ok(HttpResponse::Ok().json(PreferencesResponse { preferences }))
}

/// Configuration for preference routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/preferences")
            .route("/districts", web::get().to(list_districts))
            .route("/geographies", web::get().to(list_geographies))
            .route("/{user_id}", web::get().to(get_preferences))
            .route("/{user_id}", web::put().to(update_preferences)),
    );
}
