use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use axum::handler::HandlerWithoutStateExt;
use axum::{extract::State, middleware, routing::get, Json, Router};
use serde::Serialize;

use super::album_routes::make_album_routes;
use super::artist_routes::make_artist_routes;
use super::error::ApiError;
use super::genre_routes::make_genre_routes;
use super::song_routes::make_song_routes;
use super::stats_routes::make_stats_routes;
use super::{expose_error_details, log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerInfo {
    pub version: &'static str,
    pub uptime: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> Json<ServerInfo> {
    Json(ServerInfo {
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_uptime(state.start_time.elapsed()),
    })
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

/// `/api/v1/` and `/api/v1` both become `/api/v1`; `/` becomes the empty prefix.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

pub fn make_app(config: ServerConfig, catalog_store: GuardedCatalogStore) -> Result<Router> {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        catalog_store,
    };

    let api_routes: Router = Router::new()
        .merge(make_artist_routes(state.clone()))
        .merge(make_album_routes(state.clone()))
        .merge(make_genre_routes(state.clone()))
        .merge(make_song_routes(state.clone()))
        .merge(make_stats_routes(state.clone()));

    let home_router: Router = match &config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service = ServeDir::new(frontend_path)
                .append_index_html_on_directories(true)
                .not_found_service(not_found.into_service());
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .fallback(not_found)
            .with_state(state.clone()),
    };

    let prefix = normalize_prefix(&config.api_prefix);
    let mut app: Router = if prefix.is_empty() {
        home_router.merge(api_routes)
    } else {
        home_router.nest(&prefix, api_routes.fallback(not_found))
    };

    app = app
        .layer(middleware::from_fn_with_state(
            state.clone(),
            expose_error_details,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .layer(CorsLayer::permissive());

    Ok(app)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}

pub async fn run_server(catalog_store: GuardedCatalogStore, config: ServerConfig) -> Result<()> {
    let port = config.port;
    let app = make_app(config, catalog_store)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!("Ready to serve at port {}!", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}
