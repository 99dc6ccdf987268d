//! `/albums` endpoints. Albums are returned with their artist inlined.

use super::error::ApiError;
use super::state::{GuardedCatalogStore, ServerState};
use crate::catalog_store::{resolve_album, resolve_albums, AlbumId, AlbumPatch, NewAlbum};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

async fn list_albums(
    State(catalog_store): State<GuardedCatalogStore>,
) -> Result<Json<Value>, ApiError> {
    let albums = catalog_store.list_albums()?;
    let albums = resolve_albums(catalog_store.as_ref(), &albums)?;
    Ok(Json(json!({ "albums": albums })))
}

async fn get_album(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<AlbumId>,
) -> Result<Json<Value>, ApiError> {
    let album = catalog_store.get_album(&id)?;
    let album = resolve_album(catalog_store.as_ref(), &album)?;
    Ok(Json(json!({ "album": album })))
}

async fn create_album(
    State(catalog_store): State<GuardedCatalogStore>,
    payload: Result<Json<NewAlbum>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(new_album) = payload?;
    let album = catalog_store.create_album(new_album)?;
    let album = resolve_album(catalog_store.as_ref(), &album)?;
    Ok((StatusCode::CREATED, Json(json!({ "album": album }))))
}

async fn update_album(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<AlbumId>,
    payload: Result<Json<AlbumPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(patch) = payload?;
    let album = catalog_store.update_album(&id, patch)?;
    let album = resolve_album(catalog_store.as_ref(), &album)?;
    Ok(Json(json!({ "album": album })))
}

async fn delete_album(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<AlbumId>,
) -> Result<Json<Value>, ApiError> {
    let id = catalog_store.delete_album(&id)?;
    Ok(Json(json!({
        "message": "Album deleted successfully",
        "id": id,
    })))
}

pub fn make_album_routes(state: ServerState) -> Router {
    Router::new()
        .route("/albums", get(list_albums).post(create_album))
        .route(
            "/albums/{id}",
            get(get_album).patch(update_album).delete(delete_album),
        )
        .with_state(state)
}
