//! User preferences repository implementation

use crate::api::client::ApiClient;
use crate::api::payloads::Preferences;
use crate::models::event::OrganizerId;
use crate::models::user::Session;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct PreferencesRepository {
    client: ApiClient,
}

impl PreferencesRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, session: &Session) -> Result<Preferences> {
        self.client.get(&["users", "me", "preferences"], Some(session)).await
    }

    /// Replace the followed-organizer list
    pub async fn set_followed_organizers(
        &self,
        session: &Session,
        followed_organizers: Vec<OrganizerId>,
    ) -> Result<Preferences> {
        let body = Preferences { followed_organizers };
        self.client.put(&["users", "me", "preferences"], Some(session), &body).await
    }
}
