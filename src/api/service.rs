//! API service layer
//!
//! Bundles the repositories over one shared `ApiClient`.

use futures::try_join;
use crate::api::{ApiClient, AuthRepository, EventRepository, PreferencesRepository, RegistrationRepository};
use crate::config::ApiConfig;
use crate::models::event::Event;
use crate::models::registration::Registration;
use crate::models::user::Session;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct ApiService {
    pub auth: AuthRepository,
    pub events: EventRepository,
    pub registrations: RegistrationRepository,
    pub preferences: PreferencesRepository,
}

impl ApiService {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self::with_client(ApiClient::new(config)?))
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self {
            auth: AuthRepository::new(client.clone()),
            events: EventRepository::new(client.clone()),
            registrations: RegistrationRepository::new(client.clone()),
            preferences: PreferencesRepository::new(client),
        }
    }

    /// Fetch the browse list and the participant's registrations concurrently
    pub async fn load_dashboard(&self, session: &Session) -> Result<(Vec<Event>, Vec<Registration>)> {
        try_join!(
            self.events.list(Some(session)),
            self.registrations.list_mine(session)
        )
    }
}
