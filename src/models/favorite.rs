// src/models/favorite.rs
// DOCUMENTATION: Favorite and visit tracking models
// PURPOSE: (user, place) favorite pairs and the append-only visit log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::PlaceListItem;

/// A user's favorite place (unique per user/place pair)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserFavorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub place_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One entry in the visit log
/// DOCUMENTATION: Write-once; rows are never updated or deleted
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlaceVisit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub place_id: Uuid,
    pub visited_at: DateTime<Utc>,
}

/// Result of a favorite toggle
#[derive(Debug, Serialize)]
pub struct FavoriteToggleResponse {
    pub place_id: Uuid,
    /// State after the toggle
    pub favorited: bool,
}

/// Favorite listing response
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<PlaceListItem>,
    pub total: usize,
}
