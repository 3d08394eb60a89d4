// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

//! Client-side calendar logic: an HTTP client for the event API plus a pure
//! view model holding the working copy of events, category filters and the
//! current selection. The presentation layer (calendar grid, modal form)
//! drives these types and renders whatever they derive.

pub mod api;
pub mod session;
pub mod view_model;

pub use api::{ApiClient, ClientError, DeleteConfirmation};
pub use session::CalendarSession;
pub use view_model::{CalendarViewModel, EventForm, Selection};
