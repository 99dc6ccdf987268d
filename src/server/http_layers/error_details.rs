//! Development-mode error bodies.

use super::super::config::Environment;
use super::super::error::ErrorDetails;
use super::super::state::ServerState;
use axum::extract::State;
use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// In development mode, rewrite error bodies to carry the real message and the cause chain
/// under `stack`. Production responses pass through untouched.
pub async fn expose_error_details(
    State(state): State<ServerState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if state.config.environment != Environment::Development {
        return response;
    }
    let Some(details) = response.extensions().get::<ErrorDetails>().cloned() else {
        return response;
    };

    let status = response.status();
    let body = json!({
        "status": status.as_u16(),
        "errors": details.message,
        "stack": details.stack.join("\n"),
    });
    let mut rewritten = (status, Json(body)).into_response();
    rewritten.extensions_mut().insert(details);
    rewritten
}
