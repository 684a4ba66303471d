//! Helper functions and utilities
//!
//! This module contains common formatting helpers used by the binary and list views.

use chrono::{DateTime, Duration, Utc};
use crate::models::event::Event;

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Describe how far `timestamp` is from `now` ("in 3 days", "2 hours ago")
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = timestamp.signed_duration_since(now);
    let future = diff >= Duration::zero();
    let abs = if future { diff } else { -diff };

    let amount = if abs < Duration::minutes(1) {
        return "just now".to_string();
    } else if abs < Duration::hours(1) {
        format!("{} minutes", abs.num_minutes())
    } else if abs < Duration::days(1) {
        format!("{} hours", abs.num_hours())
    } else if abs < Duration::weeks(4) {
        format!("{} days", abs.num_days())
    } else {
        return format_timestamp(timestamp);
    };

    if future {
        format!("in {}", amount)
    } else {
        format!("{} ago", amount)
    }
}

/// Registrations against the limit, e.g. "12/50" or "12"
pub fn format_capacity(event: &Event) -> String {
    match event.registration_limit {
        Some(limit) => format!("{}/{}", event.current_registrations, limit),
        None => event.current_registrations.to_string(),
    }
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
