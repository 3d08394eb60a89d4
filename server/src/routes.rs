// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::handlers;
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use sqlx::SqlitePool;

/// Creates and configures the application router.
pub fn create_router(pool: SqlitePool) -> Router {
    Router::new()
        // Associates the `GET /api/events` route with the `list_events` handler
        .route("/api/events", get(handlers::list_events))
        // Associates the `POST /api/events` route with the `create_event` handler
        .route("/api/events", post(handlers::create_event))
        // Associates the `GET /api/events/upcoming` route with the `list_upcoming_events` handler.
        // Registered on a static segment, so it never collides with `{id}`.
        .route("/api/events/upcoming", get(handlers::list_upcoming_events))
        // Associates the `PUT /api/events/{id}` route with the `update_event` handler
        .route("/api/events/{id}", put(handlers::update_event))
        // Associates the `DELETE /api/events/{id}` route with the `delete_event` handler
        .route("/api/events/{id}", delete(handlers::delete_event))
        // Adds the database pool to the application state
        .with_state(pool)
}
