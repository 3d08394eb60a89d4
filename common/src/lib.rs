// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod colors;

/// Width of the "upcoming" window, in days from the moment of the query.
/// The server's upcoming endpoint and the client's local fallback must
/// agree on this.
pub const UPCOMING_WINDOW_DAYS: i64 = 3;

/// Represents a calendar event within the system.
///
/// Derivation attributes (derive):
/// - `Serialize`, `Deserialize`: Allows conversion to/from JSON.
/// - `Debug`: Enables displaying the structure for debugging.
/// - `Clone`: Allows creating copies of the object.
/// - `sqlx::FromRow`: Allows `sqlx` to create an `Event` instance directly
///    from a database result row.
///
/// The JSON representation uses camelCase keys (`startTime`, `eventType`, ...)
/// because that is the wire contract the browser front end speaks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[sqlx(rename = "id")]
    pub id: i64,

    #[sqlx(rename = "title")]
    pub title: String,

    #[sqlx(rename = "description")]
    pub description: Option<String>,

    // Kept as a plain string rather than an enum: the set of categories is
    // small and fixed today, but an unknown category must still round-trip
    // (it simply gets the fallback display color).
    #[sqlx(rename = "event_type")]
    pub event_type: String,

    // We use DateTime<Utc> because all window comparisons and sort orders
    // operate on the absolute instant, never on a wall-clock-naive string.
    #[sqlx(rename = "start_time")]
    pub start_time: DateTime<Utc>,

    #[sqlx(rename = "end_time")]
    pub end_time: DateTime<Utc>,

    #[sqlx(rename = "all_day")]
    pub all_day: bool,

    #[sqlx(rename = "color")]
    pub color: String,

    // Inert pass-through metadata. Nothing expands or interprets it.
    #[sqlx(rename = "recurrence_rule")]
    pub recurrence_rule: Option<String>,
}

/// Structure used to receive event creation/update data from the API.
/// It's a good practice to separate database models (`Event`)
/// from API models (`CreateEventPayload`), as they may have different fields.
///
/// Every field is optional at the serde level so that a missing required
/// field is reported by our own validation as a 400, instead of surfacing
/// as a framework-level deserialization rejection.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub all_day: Option<bool>,
    pub color: Option<String>,
    pub recurrence_rule: Option<String>,
}

/// A fully validated event, ready to be persisted. All defaults have been
/// applied: `all_day` falls back to `false` and `color` is derived from the
/// category when the caller did not supply one.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub event_type: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub all_day: bool,
    pub color: String,
    pub recurrence_rule: Option<String>,
}

pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: title, eventType, startTime and endTime must all be provided.";

impl CreateEventPayload {
    /// Validates the payload and applies the defaulting rules.
    ///
    /// `title`, `event_type`, `start_time` and `end_time` are mandatory;
    /// an empty string counts as missing. Note that `end_time` before
    /// `start_time` is deliberately NOT rejected here.
    pub fn validate(self) -> Result<EventDraft, &'static str> {
        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(MISSING_FIELDS_MESSAGE),
        };
        let event_type = match self.event_type {
            Some(c) if !c.trim().is_empty() => c,
            _ => return Err(MISSING_FIELDS_MESSAGE),
        };
        let (Some(start_time), Some(end_time)) = (self.start_time, self.end_time) else {
            return Err(MISSING_FIELDS_MESSAGE);
        };

        let color = self
            .color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| colors::color_for_category(&event_type).to_string());

        Ok(EventDraft {
            title,
            description: self.description,
            event_type,
            start_time,
            end_time,
            all_day: self.all_day.unwrap_or(false),
            color,
            recurrence_rule: self.recurrence_rule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_payload() -> CreateEventPayload {
        CreateEventPayload {
            title: Some("Standup".to_string()),
            description: Some("Daily sync".to_string()),
            event_type: Some("Meeting".to_string()),
            start_time: Some(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()),
            end_time: Some(Utc.with_ymd_and_hms(2024, 1, 1, 9, 15, 0).unwrap()),
            all_day: None,
            color: None,
            recurrence_rule: None,
        }
    }

    #[test]
    fn test_validate_applies_defaults() {
        let draft = base_payload().validate().unwrap();

        assert_eq!(draft.title, "Standup");
        assert_eq!(draft.event_type, "Meeting");
        assert!(!draft.all_day); // Defaults to false when absent
        assert_eq!(draft.color, "#1a73e8"); // Derived from the category
    }

    #[test]
    fn test_validate_keeps_explicit_color() {
        let mut payload = base_payload();
        payload.color = Some("#abcdef".to_string());

        let draft = payload.validate().unwrap();
        assert_eq!(draft.color, "#abcdef");
    }

    #[test]
    fn test_validate_rejects_missing_title() {
        let mut payload = base_payload();
        payload.title = None;
        assert!(payload.validate().is_err());

        let mut payload = base_payload();
        payload.title = Some("   ".to_string());
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_times() {
        let mut payload = base_payload();
        payload.end_time = None;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_validate_does_not_reject_inverted_times() {
        // end < start is stored as-is; this mirrors the observed contract.
        let mut payload = base_payload();
        payload.end_time = Some(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_event_json_uses_camel_case_keys() {
        let event = Event {
            id: 1,
            title: "Standup".to_string(),
            description: None,
            event_type: "Meeting".to_string(),
            start_time: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 1, 1, 9, 15, 0).unwrap(),
            all_day: false,
            color: "#1a73e8".to_string(),
            recurrence_rule: None,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("startTime").is_some());
        assert!(json.get("eventType").is_some());
        assert!(json.get("allDay").is_some());
        assert!(json.get("start_time").is_none());
    }
}
