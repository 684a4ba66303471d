//! Registration repository implementation

use serde_json::Value;
use crate::api::client::ApiClient;
use crate::api::payloads::{convert_all, RegistrationPayload, StatusUpdateBody};
use crate::models::event::EventId;
use crate::models::registration::{Registration, RegistrationId, RegistrationStatus};
use crate::models::user::Session;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    client: ApiClient,
}

impl RegistrationRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Registrations of the session's participant
    pub async fn list_mine(&self, session: &Session) -> Result<Vec<Registration>> {
        let payloads: Vec<RegistrationPayload> = self.client.get(&["registrations", "me"], Some(session)).await?;
        convert_all(payloads)
    }

    /// All registrations of one event (organizer view)
    pub async fn list_for_event(&self, event_id: &EventId, session: &Session) -> Result<Vec<Registration>> {
        let payloads: Vec<RegistrationPayload> = self
            .client
            .get(&["events", event_id.0.as_str(), "registrations"], Some(session))
            .await?;
        convert_all(payloads)
    }

    /// Register the session's participant, with custom-form answers
    pub async fn register(&self, event_id: &EventId, form_responses: &Value, session: &Session) -> Result<Registration> {
        let body = serde_json::json!({ "formResponses": form_responses });
        let payload: RegistrationPayload = self
            .client
            .post(&["events", event_id.0.as_str(), "register"], Some(session), &body)
            .await?;
        Registration::try_from(payload)
    }

    /// Update registration status
    pub async fn update_status(
        &self,
        id: &RegistrationId,
        status: RegistrationStatus,
        session: &Session,
    ) -> Result<Registration> {
        let payload: RegistrationPayload = self
            .client
            .patch(&["registrations", id.0.as_str(), "status"], Some(session), &StatusUpdateBody { status })
            .await?;
        Registration::try_from(payload)
    }
}
