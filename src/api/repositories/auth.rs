//! Authentication repository implementation

use tracing::info;
use crate::api::client::ApiClient;
use crate::api::payloads::LoginResponse;
use crate::models::user::{LoginRequest, Session};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct AuthRepository {
    client: ApiClient,
}

impl AuthRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.client.post(&["auth", "login"], None, &request).await?;
        let session = Session::from(response);

        info!(user_id = %session.user.id, role = ?session.user.role, "Logged in");
        Ok(session)
    }
}
