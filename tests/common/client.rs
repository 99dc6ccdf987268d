//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all catalog endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.api_url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.api_url(path))
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    async fn patch(&self, path: &str, body: &Value) -> Response {
        self.client
            .patch(self.api_url(path))
            .json(body)
            .send()
            .await
            .expect("PATCH request failed")
    }

    async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.api_url(path))
            .send()
            .await
            .expect("DELETE request failed")
    }

    /// POST a raw body with a JSON content type
    pub async fn post_raw(&self, path: &str, body: &'static str) -> Response {
        self.client
            .post(self.api_url(path))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("POST request failed")
    }

    /// GET a path relative to the server root, outside the API prefix
    pub async fn get_root(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    // ========================================================================
    // Artists
    // ========================================================================

    pub async fn list_artists(&self) -> Response {
        self.get("/artists").await
    }

    pub async fn get_artist(&self, id: &str) -> Response {
        self.get(&format!("/artists/{}", id)).await
    }

    pub async fn create_artist(&self, body: &Value) -> Response {
        self.post("/artists", body).await
    }

    pub async fn update_artist(&self, id: &str, body: &Value) -> Response {
        self.patch(&format!("/artists/{}", id), body).await
    }

    pub async fn delete_artist(&self, id: &str) -> Response {
        self.delete(&format!("/artists/{}", id)).await
    }

    // ========================================================================
    // Albums
    // ========================================================================

    pub async fn list_albums(&self) -> Response {
        self.get("/albums").await
    }

    pub async fn get_album(&self, id: &str) -> Response {
        self.get(&format!("/albums/{}", id)).await
    }

    pub async fn create_album(&self, body: &Value) -> Response {
        self.post("/albums", body).await
    }

    pub async fn update_album(&self, id: &str, body: &Value) -> Response {
        self.patch(&format!("/albums/{}", id), body).await
    }

    pub async fn delete_album(&self, id: &str) -> Response {
        self.delete(&format!("/albums/{}", id)).await
    }

    // ========================================================================
    // Genres
    // ========================================================================

    pub async fn list_genres(&self) -> Response {
        self.get("/genres").await
    }

    pub async fn get_genre(&self, id: &str) -> Response {
        self.get(&format!("/genres/{}", id)).await
    }

    pub async fn create_genre(&self, body: &Value) -> Response {
        self.post("/genres", body).await
    }

    pub async fn update_genre(&self, id: &str, body: &Value) -> Response {
        self.patch(&format!("/genres/{}", id), body).await
    }

    pub async fn delete_genre(&self, id: &str) -> Response {
        self.delete(&format!("/genres/{}", id)).await
    }

    // ========================================================================
    // Songs
    // ========================================================================

    pub async fn list_songs(&self) -> Response {
        self.get("/songs").await
    }

    pub async fn get_song(&self, id: &str) -> Response {
        self.get(&format!("/songs/{}", id)).await
    }

    pub async fn create_song(&self, body: &Value) -> Response {
        self.post("/songs", body).await
    }

    pub async fn update_song(&self, id: &str, body: &Value) -> Response {
        self.patch(&format!("/songs/{}", id), body).await
    }

    pub async fn delete_song(&self, id: &str) -> Response {
        self.delete(&format!("/songs/{}", id)).await
    }

    // ========================================================================
    // Stats
    // ========================================================================

    pub async fn get_stats(&self) -> Response {
        self.get("/stats").await
    }
}
