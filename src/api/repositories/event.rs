//! Event repository implementation

use crate::api::client::ApiClient;
use crate::api::payloads::{convert_all, EventPayload};
use crate::models::event::{Event, EventId, OrganizerId, UpdateEventRequest};
use crate::models::user::Session;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct EventRepository {
    client: ApiClient,
}

impl EventRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List events visible to the caller
    pub async fn list(&self, session: Option<&Session>) -> Result<Vec<Event>> {
        let payloads: Vec<EventPayload> = self.client.get(&["events"], session).await?;
        convert_all(payloads)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: &EventId, session: Option<&Session>) -> Result<Event> {
        let payload: EventPayload = self.client.get(&["events", id.0.as_str()], session).await?;
        Event::try_from(payload)
    }

    /// Events owned by an organizer, drafts included when the session is theirs
    pub async fn list_by_organizer(&self, organizer_id: &OrganizerId, session: &Session) -> Result<Vec<Event>> {
        let payloads: Vec<EventPayload> = self
            .client
            .get(&["events", "organizer", organizer_id.0.as_str()], Some(session))
            .await?;
        convert_all(payloads)
    }

    /// Update event; callers are expected to have checked the edit policy
    pub async fn update(&self, id: &EventId, request: &UpdateEventRequest, session: &Session) -> Result<Event> {
        let payload: EventPayload = self
            .client
            .put(&["events", id.0.as_str()], Some(session), request)
            .await?;
        Event::try_from(payload)
    }
}
