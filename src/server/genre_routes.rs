//! `/genres` endpoints.

use super::error::ApiError;
use super::state::{GuardedCatalogStore, ServerState};
use crate::catalog_store::{GenreId, GenrePatch, NewGenre};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

async fn list_genres(
    State(catalog_store): State<GuardedCatalogStore>,
) -> Result<Json<Value>, ApiError> {
    let genres = catalog_store.list_genres()?;
    Ok(Json(json!({ "genres": genres })))
}

async fn get_genre(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<GenreId>,
) -> Result<Json<Value>, ApiError> {
    let genre = catalog_store.get_genre(&id)?;
    Ok(Json(json!({ "genre": genre })))
}

async fn create_genre(
    State(catalog_store): State<GuardedCatalogStore>,
    payload: Result<Json<NewGenre>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(new_genre) = payload?;
    let genre = catalog_store.create_genre(new_genre)?;
    Ok((StatusCode::CREATED, Json(json!({ "genre": genre }))))
}

async fn update_genre(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<GenreId>,
    payload: Result<Json<GenrePatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(patch) = payload?;
    let genre = catalog_store.update_genre(&id, patch)?;
    Ok(Json(json!({ "genre": genre })))
}

/// Refused with 400 while songs still reference the genre.
async fn delete_genre(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<GenreId>,
) -> Result<Json<Value>, ApiError> {
    let id = catalog_store.delete_genre(&id)?;
    Ok(Json(json!({
        "message": "Genre deleted successfully",
        "id": id,
    })))
}

pub fn make_genre_routes(state: ServerState) -> Router {
    Router::new()
        .route("/genres", get(list_genres).post(create_genre))
        .route(
            "/genres/{id}",
            get(get_genre).patch(update_genre).delete(delete_genre),
        )
        .with_state(state)
}
