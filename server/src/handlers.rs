// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::database;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use common::{CreateEventPayload, Event};
use sqlx::SqlitePool;
use tracing::{debug, error, info};

/// Handler for listing every stored event.
pub async fn list_events(
    State(pool): State<SqlitePool>, // State injection (DB pool)
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = database::get_all_events_from_db(&pool).await?;
    info!("Successfully retrieved {} events.", events.len());
    Ok(Json(events))
}

/// Handler for listing events starting within the next three days,
/// ascending by start time. "Now" is the server clock at request time.
pub async fn list_upcoming_events(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = database::get_upcoming_events_from_db(&pool, Utc::now()).await?;
    info!("Successfully retrieved {} upcoming events.", events.len());
    Ok(Json(events))
}

/// Handler for creating a new event.
#[allow(clippy::uninlined_format_args)]
pub async fn create_event(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateEventPayload>, // Extracting the request body as JSON
) -> Result<(StatusCode, Json<Event>), ApiError> {
    debug!("Received request to create event: {:?}", payload.title);

    // Validate the payload: title, eventType, startTime and endTime are
    // mandatory. Defaulting (allDay, color derivation) happens here too.
    let draft = payload.validate().map_err(|msg| {
        error!("Validation failed: {}", msg);
        ApiError::Validation(msg.to_string())
    })?;

    let new_event = database::create_event_in_db(&pool, draft).await?;

    info!("Event created successfully with ID: {}", new_event.id);

    // Return a 201 Created status with the new event as JSON.
    Ok((StatusCode::CREATED, Json(new_event)))
}

/// Handler for replacing an existing event. Update semantics are
/// full-replace: the payload must carry the complete field set.
#[allow(clippy::uninlined_format_args)]
pub async fn update_event(
    State(pool): State<SqlitePool>,
    Path(event_id): Path<String>, // Extract event ID from the URL path
    Json(payload): Json<CreateEventPayload>,
) -> Result<Json<Event>, ApiError> {
    debug!("Received request to update event with ID: {}", event_id);

    let id = parse_event_id(&event_id)?;
    let draft = payload.validate().map_err(|msg| {
        error!("Validation failed: {}", msg);
        ApiError::Validation(msg.to_string())
    })?;

    match database::update_event_in_db(&pool, id, draft).await? {
        Some(updated) => {
            info!("Event with ID {} updated successfully.", id);
            Ok(Json(updated))
        }
        None => {
            error!("Event with ID {} not found for update.", id);
            Err(ApiError::NotFound(format!(
                "Event with ID {} not found.",
                id
            )))
        }
    }
}

/// Handler for deleting an event by ID.
#[allow(clippy::uninlined_format_args)]
pub async fn delete_event(
    State(pool): State<SqlitePool>,
    Path(event_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!("Attempting to delete event with ID: {}", event_id);

    let id = parse_event_id(&event_id)?;
    let deleted = database::delete_event_in_db(&pool, id).await?;

    if deleted {
        info!("Event with ID {} deleted successfully.", id);
        Ok(Json(serde_json::json!({
            "message": "Event deleted successfully",
            "id": id
        })))
    } else {
        error!("Event with ID {} not found for deletion.", id);
        Err(ApiError::NotFound(format!(
            "Event with ID {} not found.",
            id
        )))
    }
}

/// Resolves a path token to an event ID. IDs are numeric rowids, but the
/// route tolerates opaque string tokens for forward compatibility; since no
/// event can exist under a non-numeric token, it resolves to NotFound.
#[allow(clippy::uninlined_format_args)]
fn parse_event_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::NotFound(format!("Event with ID {} not found.", raw)))
}

// --- Custom Error Handling ---
// This is a good practice for transforming our internal errors
// (e.g., from the database) into appropriate HTTP responses.

/// The application error taxonomy. Validation and not-found errors carry a
/// client-facing message; storage errors are logged in full server-side but
/// never leak internal detail to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Anything that went wrong talking to the persistence layer.
    /// `anyhow::Error` coming from `database.rs` converts into this.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Allows Axum to convert our `ApiError` into an HTTP `Response`.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Storage(err) => {
                // Log the internal error for debugging, answer generically.
                tracing::error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.".to_string(),
                )
            }
        };

        tracing::error!(
            "Responding with error: status_code={}, message={}",
            code.as_u16(),
            message
        );
        (code, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
