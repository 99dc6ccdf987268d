//! Dashboard statistics endpoint.

use super::error::ApiError;
use super::state::{GuardedCatalogStore, ServerState};
use crate::stats::{compute_dashboard_stats, DashboardStats};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

async fn get_stats(
    State(catalog_store): State<GuardedCatalogStore>,
) -> Result<Json<DashboardStats>, ApiError> {
    let stats = compute_dashboard_stats(catalog_store.as_ref())?;
    Ok(Json(stats))
}

pub fn make_stats_routes(state: ServerState) -> Router {
    Router::new()
        .route("/stats", get(get_stats))
        .with_state(state)
}
