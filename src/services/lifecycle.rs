//! Event lifecycle classification
//!
//! The lifecycle stage of an event is never stored. It is recomputed from the
//! publication flag and the event window every time it is needed, so the
//! answer is only valid for the `now` it was computed with.

use chrono::{DateTime, Utc};
use crate::models::event::{Event, EventStatus};

/// Classify an event at `now`. First match wins:
/// unpublished is `Draft`, before start is `Published`,
/// `[start, end]` inclusive is `Ongoing`, anything later is `Completed`.
pub fn classify(event: &Event, now: DateTime<Utc>) -> EventStatus {
    if !event.is_published {
        EventStatus::Draft
    } else if now < event.start_date {
        EventStatus::Published
    } else if now <= event.end_date {
        EventStatus::Ongoing
    } else {
        EventStatus::Completed
    }
}

/// Classify every event in one pass, keeping input order
pub fn classify_all<'a>(events: &'a [Event], now: DateTime<Utc>) -> Vec<(&'a Event, EventStatus)> {
    events.iter().map(|event| (event, classify(event, now))).collect()
}
