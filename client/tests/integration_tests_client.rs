//! End-to-end tests: a real server on an ephemeral port, driven through
//! `CalendarSession` over HTTP.

use chrono::{Duration, Utc};
use client::{ApiClient, CalendarSession, ClientError, EventForm, Selection};
use sqlx::sqlite::SqlitePoolOptions;

/// Spins up the real router on an ephemeral port and returns its base URL.
/// A single connection keeps the in-memory database shared across requests.
async fn spawn_test_server() -> String {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory SQLite");
    server::database::create_schema(&pool)
        .await
        .expect("Failed to create events table in test DB");

    let app = server::routes::create_router(pool);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/api", addr)
}

/// Base URL of a port nothing listens on, for failure-path tests.
async fn dead_server_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

fn form(title: &str, event_type: &str, offset: Duration) -> EventForm {
    let start = Utc::now() + offset;
    EventForm {
        title: title.to_string(),
        description: Some("created from a test".to_string()),
        event_type: event_type.to_string(),
        start_time: start,
        end_time: start + Duration::hours(1),
        all_day: false,
        recurrence_rule: None,
    }
}

#[tokio::test]
async fn test_submit_creates_and_reconciles() {
    let base_url = spawn_test_server().await;
    let mut session = CalendarSession::new(ApiClient::new(base_url));

    session.refresh().await.unwrap();
    assert!(session.view().events().is_empty());

    // The user clicked a slot, then submitted the form.
    let start = Utc::now() + Duration::hours(1);
    session.view_mut().select_slot(start, start + Duration::hours(1));
    let created = session
        .submit(form("Standup", "Meeting", Duration::hours(1)))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.color, "#1a73e8"); // Server derived the Meeting color

    // Reconciliation re-fetched the list and closed the form.
    assert_eq!(session.view().events().len(), 1);
    assert_eq!(session.view().events()[0].id, created.id);
    assert_eq!(session.view().selection(), Selection::None);
}

#[tokio::test]
async fn test_submit_with_editing_selection_updates() {
    let base_url = spawn_test_server().await;
    let mut session = CalendarSession::new(ApiClient::new(base_url));

    let created = session
        .submit(form("Standup", "Meeting", Duration::hours(1)))
        .await
        .unwrap();

    // The user clicked the event and changed its title and category.
    session.view_mut().select_event(created.id);
    let updated = session
        .submit(form("Sprint review", "Class", Duration::hours(2)))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id); // Same event, replaced in place
    assert_eq!(updated.title, "Sprint review");
    assert_eq!(updated.color, "#188038");

    // No duplicate appeared.
    assert_eq!(session.view().events().len(), 1);
    assert_eq!(session.view().events()[0].title, "Sprint review");
}

#[tokio::test]
async fn test_delete_clears_local_state() {
    let base_url = spawn_test_server().await;
    let mut session = CalendarSession::new(ApiClient::new(base_url));

    let created = session
        .submit(form("Doomed", "Reminder", Duration::hours(1)))
        .await
        .unwrap();
    session.view_mut().select_event(created.id);

    session.delete(created.id).await.unwrap();
    assert!(session.view().events().is_empty());
    assert_eq!(session.view().selection(), Selection::None);

    // A second delete is NotFound, and local state stays untouched.
    let err = session.delete(created.id).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert!(session.view().events().is_empty());
}

#[tokio::test]
async fn test_failed_delete_mutates_nothing() {
    let base_url = spawn_test_server().await;
    let mut session = CalendarSession::new(ApiClient::new(base_url));

    let created = session
        .submit(form("Sturdy", "Task", Duration::hours(1)))
        .await
        .unwrap();
    session.view_mut().select_event(created.id);

    // Deleting an ID that does not exist fails without touching the set
    // or the selection.
    let err = session.delete(created.id + 100).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert_eq!(session.view().events().len(), 1);
    assert_eq!(
        session.view().selection(),
        Selection::Editing { id: created.id }
    );
}

#[tokio::test]
async fn test_failed_refresh_keeps_prior_state() {
    let base_url = spawn_test_server().await;
    let mut session = CalendarSession::new(ApiClient::new(base_url));
    session
        .submit(form("Survivor", "Meeting", Duration::hours(1)))
        .await
        .unwrap();
    assert_eq!(session.view().events().len(), 1);

    // Swap in a client pointing at nothing; the fetch fails and the
    // previously loaded events remain.
    let mut dead_session = CalendarSession::new(ApiClient::new(dead_server_url().await));
    let events = session.view().events().to_vec();
    dead_session.view_mut().set_events(events);

    assert!(dead_session.refresh().await.is_err());
    assert_eq!(dead_session.view().events().len(), 1);
}

#[tokio::test]
async fn test_upcoming_prefers_server_answer() {
    let base_url = spawn_test_server().await;
    let mut session = CalendarSession::new(ApiClient::new(base_url));

    session
        .submit(form("Tomorrow", "Meeting", Duration::days(1)))
        .await
        .unwrap();
    session
        .submit(form("Next week", "Meeting", Duration::days(5)))
        .await
        .unwrap();

    let upcoming = session.upcoming().await;
    let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Tomorrow"]);
}

#[tokio::test]
async fn test_upcoming_falls_back_to_local_computation() {
    let mut session = CalendarSession::new(ApiClient::new(dead_server_url().await));

    // Seed local state as if a previous fetch had succeeded.
    let start = Utc::now() + Duration::hours(2);
    session.view_mut().set_events(vec![common::Event {
        id: 1,
        title: "Cached".to_string(),
        description: None,
        event_type: "Meeting".to_string(),
        start_time: start,
        end_time: start + Duration::hours(1),
        all_day: false,
        color: "#1a73e8".to_string(),
        recurrence_rule: None,
    }]);

    let upcoming = session.upcoming().await;
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].title, "Cached");
}
