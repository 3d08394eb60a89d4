// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

//! Fixed category -> display color mapping.
//!
//! Both the server (when persisting an event without an explicit color) and
//! the client (when rendering optimistically before the server confirms)
//! apply this same lookup, so it lives here as a pure function with no
//! shared mutable state.

/// Color used for categories outside the known set.
pub const DEFAULT_COLOR: &str = "#616161";

/// The known categories, in the order the front end presents them.
pub const CATEGORIES: [&str; 4] = ["Meeting", "Class", "Task", "Reminder"];

/// Returns the display color for a category.
/// Unknown categories fall back to [`DEFAULT_COLOR`].
pub fn color_for_category(category: &str) -> &'static str {
    match category {
        "Meeting" => "#1a73e8",  // Blue
        "Class" => "#188038",    // Green
        "Task" => "#f9ab00",     // Yellow
        "Reminder" => "#d93025", // Red
        _ => DEFAULT_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories_have_distinct_colors() {
        let mut seen = Vec::new();
        for category in CATEGORIES {
            let color = color_for_category(category);
            assert!(!seen.contains(&color), "duplicate color for {}", category);
            seen.push(color);
        }
    }

    #[test]
    fn test_meeting_maps_to_blue() {
        assert_eq!(color_for_category("Meeting"), "#1a73e8");
    }

    #[test]
    fn test_unknown_category_falls_back_to_default() {
        assert_eq!(color_for_category("Birthday"), DEFAULT_COLOR);
        assert_eq!(color_for_category(""), DEFAULT_COLOR);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        // Categories are an exact-match enumerated tag, not free text.
        assert_eq!(color_for_category("meeting"), DEFAULT_COLOR);
    }
}
