// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use common::{Event, EventDraft, UPCOMING_WINDOW_DAYS};
use sqlx::{Sqlite, SqlitePool, migrate::MigrateDatabase};
use tracing::{debug, info};

/// Establishes the database connection pool.
/// If the database does not exist, it creates it.
/// It also ensures the `events` table has the correct schema.
pub async fn establish_connection_pool(database_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        info!("Creating database {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .context("Failed to create database")?;
    } else {
        info!("Database already exists.");
    }

    let pool = SqlitePool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    create_schema(&pool).await?;

    info!("'events' table is ready.");

    Ok(pool)
}

/// Applies the `events` table schema to a pool. Exposed separately so that
/// tests can run the exact same DDL against an in-memory database instead of
/// maintaining a copy that can drift.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NULL,
            event_type TEXT NOT NULL,
            start_time TIMESTAMP NOT NULL,
            end_time TIMESTAMP NOT NULL,
            all_day BOOLEAN NOT NULL DEFAULT 0,
            color TEXT NOT NULL,
            recurrence_rule TEXT NULL
        );
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create 'events' table")?;

    Ok(())
}

/// Retrieves every stored event. Callers re-sort as needed, so no ordering
/// is promised here.
pub async fn get_all_events_from_db(pool: &SqlitePool) -> Result<Vec<Event>> {
    let events = sqlx::query_as::<_, Event>("SELECT * FROM events;")
        .fetch_all(pool)
        .await
        .context("Failed to retrieve events from DB")?;

    Ok(events)
}

/// Retrieves events whose `start_time` falls within `[now, now + 3 days]`,
/// both bounds inclusive, ordered ascending by start time. `now` is passed
/// in by the caller (the handler evaluates it at request time).
pub async fn get_upcoming_events_from_db(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<Event>> {
    let window_end = now + Duration::days(UPCOMING_WINDOW_DAYS);

    let events = sqlx::query_as::<_, Event>(
        "SELECT * FROM events WHERE start_time BETWEEN ? AND ? ORDER BY start_time ASC;",
    )
    .bind(now)
    .bind(window_end)
    .fetch_all(pool)
    .await
    .context("Failed to retrieve upcoming events from DB")?;

    Ok(events)
}

/// Inserts a new event into the database. The draft has already been
/// validated and carries its derived color.
pub async fn create_event_in_db(pool: &SqlitePool, draft: EventDraft) -> Result<Event> {
    debug!(
        "Insert values: title={}, event_type={}, start_time={}, end_time={}, all_day={}, color={}",
        draft.title, draft.event_type, draft.start_time, draft.end_time, draft.all_day, draft.color
    );

    let id = sqlx::query(
        "INSERT INTO events (title, description, event_type, start_time, end_time, all_day, color, recurrence_rule) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
    )
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(&draft.event_type)
    .bind(draft.start_time)
    .bind(draft.end_time)
    .bind(draft.all_day)
    .bind(&draft.color)
    .bind(&draft.recurrence_rule)
    .execute(pool)
    .await
    .context("Failed to insert event into DB")?
    .last_insert_rowid();

    let new_event = Event {
        id,
        title: draft.title,
        description: draft.description,
        event_type: draft.event_type,
        start_time: draft.start_time,
        end_time: draft.end_time,
        all_day: draft.all_day,
        color: draft.color,
        recurrence_rule: draft.recurrence_rule,
    };

    Ok(new_event)
}

/// Fetches a single event by ID, or `None` if it does not exist.
pub async fn get_event_from_db(pool: &SqlitePool, event_id: i64) -> Result<Option<Event>> {
    let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?;")
        .bind(event_id)
        .fetch_optional(pool)
        .await
        .context("Failed to retrieve event from DB")?;

    Ok(event)
}

/// Overwrites every mutable field of an existing event (full-replace
/// semantics, no partial patch). Returns `None` when no event with that ID
/// exists, so the handler can answer 404 instead of a generic failure.
pub async fn update_event_in_db(
    pool: &SqlitePool,
    event_id: i64,
    draft: EventDraft,
) -> Result<Option<Event>> {
    // Verify existence first: a missing target is NotFound, not a storage error.
    if get_event_from_db(pool, event_id).await?.is_none() {
        return Ok(None);
    }

    sqlx::query(
        "UPDATE events SET title = ?, description = ?, event_type = ?, start_time = ?, end_time = ?, all_day = ?, color = ?, recurrence_rule = ? WHERE id = ?"
    )
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(&draft.event_type)
    .bind(draft.start_time)
    .bind(draft.end_time)
    .bind(draft.all_day)
    .bind(&draft.color)
    .bind(&draft.recurrence_rule)
    .bind(event_id)
    .execute(pool)
    .await
    .context(format!("Failed to update event with ID: {}", event_id))?;

    Ok(Some(Event {
        id: event_id,
        title: draft.title,
        description: draft.description,
        event_type: draft.event_type,
        start_time: draft.start_time,
        end_time: draft.end_time,
        all_day: draft.all_day,
        color: draft.color,
        recurrence_rule: draft.recurrence_rule,
    }))
}

/// Deletes an event from the database.
/// Returns true if an event was removed, false if no event with the given ID was found.
#[allow(clippy::uninlined_format_args)]
pub async fn delete_event_in_db(pool: &SqlitePool, event_id: i64) -> Result<bool> {
    debug!("Attempting to delete event with ID: {}", event_id);
    let result = sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(event_id)
        .execute(pool)
        .await
        .context(format!("Failed to delete event with ID: {}", event_id))?;

    let rows_affected = result.rows_affected();
    info!("Deleted {} rows for event ID: {}", rows_affected, event_id);

    Ok(rows_affected > 0)
}
