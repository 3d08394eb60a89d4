// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

//! HTTP client for the event API.

use common::{CreateEventPayload, Event};
use serde::Deserialize;
use std::env;

/// Used when `CALENDAR_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Failures surfaced to the caller of [`ApiClient`]. Validation and
/// not-found responses keep the server's message; everything else on the
/// server side collapses into `Server`.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    Server(String),

    /// The request never produced a usable response (connection refused,
    /// timeout, malformed body).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Confirmation body returned by a successful delete.
#[derive(Debug, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
    pub id: i64,
}

/// Error body the server answers with on failure.
#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Thin typed wrapper over the `/api/events` resource collection.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client against an explicit base URL.
    /// A trailing slash is tolerated and trimmed.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Builds a client from `CALENDAR_API_URL`, falling back to the local
    /// development endpoint when unset.
    pub fn from_env() -> Self {
        Self::new(env::var("CALENDAR_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /events
    pub async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        let resp = self
            .http
            .get(format!("{}/events", self.base_url))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// GET /events/upcoming
    pub async fn list_upcoming(&self) -> Result<Vec<Event>, ClientError> {
        let resp = self
            .http
            .get(format!("{}/events/upcoming", self.base_url))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// POST /events
    pub async fn create_event(&self, payload: &CreateEventPayload) -> Result<Event, ClientError> {
        let resp = self
            .http
            .post(format!("{}/events", self.base_url))
            .json(payload)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// PUT /events/{id}
    pub async fn update_event(
        &self,
        id: i64,
        payload: &CreateEventPayload,
    ) -> Result<Event, ClientError> {
        let resp = self
            .http
            .put(format!("{}/events/{}", self.base_url, id))
            .json(payload)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// DELETE /events/{id}
    pub async fn delete_event(&self, id: i64) -> Result<DeleteConfirmation, ClientError> {
        let resp = self
            .http
            .delete(format!("{}/events/{}", self.base_url, id))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Maps a non-success response onto the error taxonomy, decoding the
    /// `{"error": ...}` body when the server sent one.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let message = match resp.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };

        Err(match status.as_u16() {
            400 => ClientError::Validation(message),
            404 => ClientError::NotFound(message),
            _ => ClientError::Server(message),
        })
    }
}
