// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

//! Ties the HTTP client and the view model together: fetch, submit and
//! delete flows, each with the reconciliation policy they require.

use crate::api::{ApiClient, ClientError};
use crate::view_model::{CalendarViewModel, EventForm, Selection, UPCOMING_LIMIT};
use chrono::Utc;
use common::Event;
use tracing::warn;

pub struct CalendarSession {
    api: ApiClient,
    view: CalendarViewModel,
}

impl CalendarSession {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            view: CalendarViewModel::new(),
        }
    }

    pub fn view(&self) -> &CalendarViewModel {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CalendarViewModel {
        &mut self.view
    }

    /// Fetches the full event list and replaces the local set.
    /// On failure the prior state is left untouched.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let events = self.api.list_events().await.inspect_err(|err| {
            warn!("Failed to fetch events, keeping prior state: {}", err);
        })?;
        self.view.set_events(events);
        Ok(())
    }

    /// The sidebar's upcoming list. Prefers the server's derived answer;
    /// falls back to local computation when the request fails.
    pub async fn upcoming(&self) -> Vec<Event> {
        match self.api.list_upcoming().await {
            Ok(events) => events.into_iter().take(UPCOMING_LIMIT).collect(),
            Err(err) => {
                warn!("Upcoming fetch failed, computing locally: {}", err);
                self.view
                    .upcoming_events(Utc::now())
                    .into_iter()
                    .cloned()
                    .collect()
            }
        }
    }

    /// Submits the modal form. An `Editing` selection means an update,
    /// anything else a create. On success the full list is re-fetched
    /// (safer than splicing the result in, since local merges can drift
    /// from server-side defaulting) and the selection is cleared. On
    /// failure the selection stays, so the form remains open for a retry.
    pub async fn submit(&mut self, form: EventForm) -> Result<Event, ClientError> {
        let payload = form.into_payload();

        let saved = match self.view.selection() {
            Selection::Editing { id } => self.api.update_event(id, &payload).await?,
            _ => self.api.create_event(&payload).await?,
        };

        self.refresh().await?;
        self.view.clear_selection();
        Ok(saved)
    }

    /// Deletes an event by ID. Only after the server confirms is the event
    /// removed locally and the active selection cleared; a failed delete
    /// mutates nothing.
    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.api.delete_event(id).await?;
        self.view.remove_event(id);
        self.view.clear_selection();
        Ok(())
    }
}
