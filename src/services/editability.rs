//! Field-level edit lockout for events
//!
//! Which fields an organizer may change depends only on the derived lifecycle
//! stage and on whether the event already has registrations. This is a client
//! gate: the backend runs its own validation and may still reject an edit
//! this policy allows (see `EventService::update_event`).

use chrono::{DateTime, Utc};
use tracing::debug;
use crate::models::event::{Event, EventField, EventStatus, UpdateEventRequest};
use crate::services::lifecycle::classify;
use crate::utils::errors::FieldLockedError;

/// Fields an organizer may still adjust once the event is published
const PUBLISHED_EDITABLE: [EventField; 3] = [
    EventField::Description,
    EventField::RegistrationDeadline,
    EventField::RegistrationLimit,
];

/// Decide whether `field` may be mutated at `status`.
pub fn is_editable(field: EventField, status: EventStatus, has_registrations: bool) -> bool {
    // Identity and type are fixed at creation.
    if field.is_identity() || field == EventField::EventType {
        return false;
    }

    match status {
        EventStatus::Draft => !(field == EventField::CustomForm && has_registrations),
        EventStatus::Published => PUBLISHED_EDITABLE.contains(&field),
        EventStatus::Ongoing | EventStatus::Completed => field == EventField::IsPublished,
    }
}

/// Same as [`is_editable`] for a wire field name; unknown names are locked.
pub fn is_editable_by_name(field: &str, status: EventStatus, has_registrations: bool) -> bool {
    field
        .parse::<EventField>()
        .map(|field| is_editable(field, status, has_registrations))
        .unwrap_or(false)
}

/// Every field that is currently editable, in `EventField::ALL` order
pub fn editable_fields(status: EventStatus, has_registrations: bool) -> Vec<EventField> {
    EventField::ALL
        .iter()
        .copied()
        .filter(|field| is_editable(*field, status, has_registrations))
        .collect()
}

/// Fail on the first field in `changed` that is locked for `status`.
pub fn check_changes(
    changed: &[EventField],
    status: EventStatus,
    has_registrations: bool,
) -> Result<(), FieldLockedError> {
    match changed.iter().find(|field| !is_editable(**field, status, has_registrations)) {
        Some(field) => Err(FieldLockedError { field: *field, status }),
        None => Ok(()),
    }
}

/// Classify `event` at `now` and check `request` against the resulting stage.
///
/// Only fields whose value actually changes are considered, so resubmitting a
/// full form with untouched locked fields passes.
pub fn check_edit(
    event: &Event,
    request: &UpdateEventRequest,
    now: DateTime<Utc>,
) -> Result<EventStatus, FieldLockedError> {
    let status = classify(event, now);
    let changed = request.changed_fields(event);

    debug!(
        event_id = %event.id,
        status = %status,
        changed = ?changed,
        "Checking event edit against lifecycle policy"
    );

    check_changes(&changed, status, event.has_registrations())?;
    Ok(status)
}
