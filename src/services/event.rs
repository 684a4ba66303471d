//! Event service implementation
//!
//! This service composes the lifecycle classifier, the edit policy and the
//! list filters with the event repository: browse and organizer views, and
//! the edit flow that gates changes locally before they reach the backend.

use std::sync::Arc;
use reqwest::StatusCode;
use tracing::{debug, info, warn};
use crate::api::repositories::EventRepository;
use crate::models::event::{Event, EventField, EventId, EventStatus, OrganizerId, UpdateEventRequest};
use crate::models::user::Session;
use crate::services::{editability, filter, lifecycle};
use crate::services::filter::FilterPredicates;
use crate::utils::clock::Clock;
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::logging;

/// Backend status codes that mean "this edit is not allowed right now"
const EDIT_REJECTION_CODES: [StatusCode; 4] = [
    StatusCode::BAD_REQUEST,
    StatusCode::FORBIDDEN,
    StatusCode::CONFLICT,
    StatusCode::UNPROCESSABLE_ENTITY,
];

/// An event together with the stage it was in when the view was built
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEvent {
    pub event: Event,
    pub status: EventStatus,
    pub registration_open: bool,
}

#[derive(Clone)]
pub struct EventService {
    events: EventRepository,
    clock: Arc<dyn Clock>,
}

impl EventService {
    pub fn new(events: EventRepository, clock: Arc<dyn Clock>) -> Self {
        Self { events, clock }
    }

    pub async fn get_event(&self, event_id: &EventId, session: Option<&Session>) -> Result<ClassifiedEvent> {
        let event = self.events.find_by_id(event_id, session).await?;
        Ok(self.classify(event))
    }

    /// Browse list filtered with `predicates`; drafts are never shown
    pub async fn browse(&self, session: Option<&Session>, predicates: &FilterPredicates) -> Result<Vec<Event>> {
        let now = self.clock.now();
        let published: Vec<Event> = self
            .events
            .list(session)
            .await?
            .into_iter()
            .filter(|event| lifecycle::classify(event, now) != EventStatus::Draft)
            .collect();

        Ok(filter::filter(&published, predicates, now))
    }

    /// Trending list over the published events
    pub async fn trending(&self, session: Option<&Session>) -> Result<Vec<Event>> {
        let events = self.browse(session, &FilterPredicates::default()).await?;
        Ok(filter::trending(&events))
    }

    /// The organizer's own events with their current stage
    pub async fn organizer_events(&self, session: &Session) -> Result<Vec<ClassifiedEvent>> {
        self.require_organizer(session)?;

        let organizer_id = OrganizerId(session.user.id.0.clone());
        let events = self.events.list_by_organizer(&organizer_id, session).await?;

        Ok(events.into_iter().map(|event| self.classify(event)).collect())
    }

    /// Fields the edit form should leave enabled right now
    pub fn editable_fields(&self, event: &Event) -> Vec<EventField> {
        let status = lifecycle::classify(event, self.clock.now());
        editability::editable_fields(status, event.has_registrations())
    }

    /// Apply an edit to an event.
    ///
    /// The event is re-read and classified first. Only the fields that would
    /// actually change are checked and sent; a change to a locked field fails
    /// with `FieldLocked` and no request is sent. If the backend still refuses
    /// the edit, the event is fetched again and the caller gets
    /// `StaleStatusMismatch` carrying the fresh event and stage.
    pub async fn update_event(
        &self,
        session: &Session,
        event_id: &EventId,
        request: &UpdateEventRequest,
    ) -> Result<Event> {
        self.require_organizer(session)?;

        let event = self.events.find_by_id(event_id, Some(session)).await?;

        if event.organizer_id.0 != session.user.id.0 {
            return Err(CampusEventsError::PermissionDenied(format!(
                "event {} belongs to another organizer",
                event_id
            )));
        }

        let changes = request.changes_from(&event);
        if changes.is_empty() {
            debug!(event_id = %event_id, "Edit changes nothing, skipping update");
            return Ok(event);
        }

        // Locked fields are reported even when their new value is also invalid.
        let status = editability::check_edit(&event, &changes, self.clock.now()).map_err(|e| {
            logging::log_edit_rejected(event_id, e.field, e.status);
            CampusEventsError::FieldLocked(e)
        })?;

        changes
            .validate_against(&event)
            .map_err(CampusEventsError::InvalidInput)?;

        match self.events.update(event_id, &changes, session).await {
            Ok(updated) => {
                let fields: Vec<&str> = changes.present_fields().iter().map(|f| f.as_str()).collect();
                logging::log_event_action(event_id, "update", &session.user.id, Some(&fields.join(",")));
                info!(event_id = %event_id, status = %status, "Event updated");
                Ok(updated)
            }
            Err(CampusEventsError::Api { status: code, message })
                if EDIT_REJECTION_CODES.iter().any(|c| c.as_u16() == code) =>
            {
                let refreshed = match self.events.find_by_id(event_id, Some(session)).await {
                    Ok(refreshed) => refreshed,
                    Err(e) => {
                        warn!(
                            event_id = %event_id,
                            rejection = %message,
                            error = %e,
                            "Edit rejected and the event could not be re-read"
                        );
                        return Err(CampusEventsError::Api { status: code, message });
                    }
                };

                let status = lifecycle::classify(&refreshed, self.clock.now());
                logging::log_stale_status(event_id, status, &message);

                Err(CampusEventsError::StaleStatusMismatch {
                    event_id: event_id.clone(),
                    status,
                    message,
                    event: Box::new(refreshed),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Publish or unpublish, allowed in every stage
    pub async fn set_published(&self, session: &Session, event_id: &EventId, published: bool) -> Result<Event> {
        let request = UpdateEventRequest {
            is_published: Some(published),
            ..Default::default()
        };
        self.update_event(session, event_id, &request).await
    }

    fn classify(&self, event: Event) -> ClassifiedEvent {
        let now = self.clock.now();
        ClassifiedEvent {
            status: lifecycle::classify(&event, now),
            registration_open: event.is_registration_open(now),
            event,
        }
    }

    fn require_organizer(&self, session: &Session) -> Result<()> {
        if session.is_organizer() {
            Ok(())
        } else {
            Err(CampusEventsError::PermissionDenied(format!(
                "user {} is not an organizer",
                session.user.id
            )))
        }
    }
}
