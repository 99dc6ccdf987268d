//! Mapping of store failures to HTTP responses.
//!
//! Every handler error ends up here. The body is always
//! `{"status": <code>, "errors": <message>}`; unexpected failures get a generic message
//! and carry the real one in an [`ErrorDetails`] extension that
//! [`expose_error_details`](super::http_layers::expose_error_details) writes back into the
//! body in development mode.

use crate::catalog_store::{StoreError, ValidationError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";
pub const NOT_FOUND_MESSAGE: &str = "Not Found";

/// The unredacted message and cause chain of an error response.
#[derive(Clone, Debug)]
pub struct ErrorDetails {
    pub message: String,
    pub stack: Vec<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub stack: Vec<String>,
}

fn error_chain(err: &dyn std::error::Error) -> Vec<String> {
    let mut chain = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
            stack: vec![],
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }

    fn is_unexpected(&self) -> bool {
        self.status.is_server_error()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match &err {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::Validation(_) | StoreError::Conflict(_) => StatusCode::BAD_REQUEST,
            StoreError::InternalConsistency(_)
            | StoreError::Database(_)
            | StoreError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let stack = match &err {
            StoreError::Other(e) => e.chain().map(|cause| cause.to_string()).collect(),
            _ => error_chain(&err),
        };
        ApiError {
            status,
            message: err.to_string(),
            stack,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let err = StoreError::from(ValidationError::MalformedBody(rejection.body_text()));
        let mut api_error = ApiError::from(err);
        api_error.stack = error_chain(&rejection);
        api_error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let public_message = if self.is_unexpected() {
            error!("{} {}: {:?}", self.status, self.message, self.stack);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.message.clone()
        };

        let body = json!({
            "status": self.status.as_u16(),
            "errors": public_message,
        });
        let mut response = (self.status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorDetails {
            message: self.message,
            stack: self.stack,
        });
        response
    }
}
