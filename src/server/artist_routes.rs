//! `/artists` endpoints.

use super::error::ApiError;
use super::state::{GuardedCatalogStore, ServerState};
use crate::catalog_store::{ArtistId, ArtistPatch, NewArtist};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

async fn list_artists(
    State(catalog_store): State<GuardedCatalogStore>,
) -> Result<Json<Value>, ApiError> {
    let artists = catalog_store.list_artists()?;
    Ok(Json(json!({ "artists": artists })))
}

async fn get_artist(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<ArtistId>,
) -> Result<Json<Value>, ApiError> {
    let artist = catalog_store.get_artist(&id)?;
    Ok(Json(json!({ "artist": artist })))
}

async fn create_artist(
    State(catalog_store): State<GuardedCatalogStore>,
    payload: Result<Json<NewArtist>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(new_artist) = payload?;
    let artist = catalog_store.create_artist(new_artist)?;
    Ok((StatusCode::CREATED, Json(json!({ "artist": artist }))))
}

async fn update_artist(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<ArtistId>,
    payload: Result<Json<ArtistPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(patch) = payload?;
    let artist = catalog_store.update_artist(&id, patch)?;
    Ok(Json(json!({ "artist": artist })))
}

async fn delete_artist(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<ArtistId>,
) -> Result<Json<Value>, ApiError> {
    let id = catalog_store.delete_artist(&id)?;
    Ok(Json(json!({
        "message": "Artist deleted successfully",
        "id": id,
    })))
}

pub fn make_artist_routes(state: ServerState) -> Router {
    Router::new()
        .route("/artists", get(list_artists).post(create_artist))
        .route(
            "/artists/{id}",
            get(get_artist).patch(update_artist).delete(delete_artist),
        )
        .with_state(state)
}
