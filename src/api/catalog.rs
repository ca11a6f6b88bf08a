use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::{SearchParams, TrackFeatures, TrackSummary};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

const SEARCH_FAILED: &str = "Error fetching tracks";
const FEATURES_FAILED: &str = "Error fetching track features";

pub fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(search))
        .route("/features/:id", get(features))
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<TrackSummary>>> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let tracks = state
        .catalog
        .search_tracks(&params.q)
        .await
        .map_err(|e| e.proxied(SEARCH_FAILED))?;

    Ok(Json(tracks))
}

async fn features(
    State(state): State<Arc<AppState>>,
    Path(track_id): Path<String>,
) -> Result<Json<TrackFeatures>> {
    let features = state
        .catalog
        .get_features(&track_id)
        .await
        .map_err(|e| e.proxied(FEATURES_FAILED))?;

    Ok(Json(features))
}
