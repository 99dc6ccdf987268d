//! `/songs` endpoints. Songs are returned with album (title and artist name) and genre
//! inlined.

use super::error::ApiError;
use super::state::{GuardedCatalogStore, ServerState};
use crate::catalog_store::{resolve_song, resolve_songs, NewSong, SongId, SongPatch};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

async fn list_songs(
    State(catalog_store): State<GuardedCatalogStore>,
) -> Result<Json<Value>, ApiError> {
    let songs = catalog_store.list_songs()?;
    let songs = resolve_songs(catalog_store.as_ref(), &songs)?;
    Ok(Json(json!({ "songs": songs })))
}

async fn get_song(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<SongId>,
) -> Result<Json<Value>, ApiError> {
    let song = catalog_store.get_song(&id)?;
    let song = resolve_song(catalog_store.as_ref(), &song)?;
    Ok(Json(json!({ "song": song })))
}

async fn create_song(
    State(catalog_store): State<GuardedCatalogStore>,
    payload: Result<Json<NewSong>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(new_song) = payload?;
    let song = catalog_store.create_song(new_song)?;
    let song = resolve_song(catalog_store.as_ref(), &song)?;
    Ok((StatusCode::CREATED, Json(json!({ "song": song }))))
}

async fn update_song(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<SongId>,
    payload: Result<Json<SongPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(patch) = payload?;
    let song = catalog_store.update_song(&id, patch)?;
    let song = resolve_song(catalog_store.as_ref(), &song)?;
    Ok(Json(json!({ "song": song })))
}

async fn delete_song(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<SongId>,
) -> Result<Json<Value>, ApiError> {
    let id = catalog_store.delete_song(&id)?;
    Ok(Json(json!({
        "message": "Song deleted successfully",
        "id": id,
    })))
}

pub fn make_song_routes(state: ServerState) -> Router {
    Router::new()
        .route("/songs", get(list_songs).post(create_song))
        .route(
            "/songs/{id}",
            get(get_song).patch(update_song).delete(delete_song),
        )
        .with_state(state)
}
