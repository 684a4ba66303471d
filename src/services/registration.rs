//! Registration service implementation
//!
//! This service handles registering for events, the participant's and the
//! organizer's registration lists, and one-way registration status changes.

use std::sync::Arc;
use serde_json::Value;
use tracing::{debug, info};
use crate::api::repositories::RegistrationRepository;
use crate::models::event::{Event, EventId, EventStatus};
use crate::models::registration::{Registration, RegistrationStatus};
use crate::models::user::Session;
use crate::services::{filter, lifecycle};
use crate::services::filter::FilterPredicates;
use crate::utils::clock::Clock;
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::logging;

#[derive(Clone)]
pub struct RegistrationService {
    registrations: RegistrationRepository,
    clock: Arc<dyn Clock>,
}

impl RegistrationService {
    pub fn new(registrations: RegistrationRepository, clock: Arc<dyn Clock>) -> Self {
        Self { registrations, clock }
    }

    /// "My registrations" view
    pub async fn my_registrations(&self, session: &Session, predicates: &FilterPredicates) -> Result<Vec<Registration>> {
        let registrations = self.registrations.list_mine(session).await?;
        Ok(filter::filter(&registrations, predicates, self.clock.now()))
    }

    /// Organizer's registration table for one event; search also covers participants
    pub async fn event_registrations(
        &self,
        session: &Session,
        event_id: &EventId,
        predicates: &FilterPredicates,
    ) -> Result<Vec<Registration>> {
        if !session.is_organizer() && !session.is_admin() {
            return Err(CampusEventsError::PermissionDenied(
                "only organizers can list event registrations".to_string(),
            ));
        }

        let registrations = self.registrations.list_for_event(event_id, session).await?;

        let mut predicates = predicates.clone();
        predicates.search.include_participant = true;

        Ok(filter::filter(&registrations, &predicates, self.clock.now()))
    }

    /// Register for `event` if it is published and registration is still open
    pub async fn register(&self, session: &Session, event: &Event, form_responses: &Value) -> Result<Registration> {
        let now = self.clock.now();
        let status = lifecycle::classify(event, now);

        if status == EventStatus::Draft || !event.is_registration_open(now) {
            debug!(event_id = %event.id, status = %status, "Registration attempt on closed event");
            return Err(CampusEventsError::RegistrationClosed { event_id: event.id.clone() });
        }

        let registration = self.registrations.register(&event.id, form_responses, session).await?;
        logging::log_event_action(&event.id, "register", &session.user.id, None);

        Ok(registration)
    }

    pub async fn mark_attended(&self, session: &Session, registration: &Registration) -> Result<Registration> {
        self.transition(session, registration, RegistrationStatus::Attended).await
    }

    pub async fn cancel(&self, session: &Session, registration: &Registration) -> Result<Registration> {
        self.transition(session, registration, RegistrationStatus::Cancelled).await
    }

    async fn transition(
        &self,
        session: &Session,
        registration: &Registration,
        to: RegistrationStatus,
    ) -> Result<Registration> {
        let from = registration.status;

        if !from.can_transition_to(to) {
            return Err(CampusEventsError::InvalidStateTransition {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        if from == to {
            return Ok(registration.clone());
        }

        let updated = self.registrations.update_status(&registration.id, to, session).await?;
        info!(
            registration_id = %registration.id,
            from = %from,
            to = %to,
            "Registration status changed"
        );

        Ok(updated)
    }
}
