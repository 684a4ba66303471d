//! HTTP client for the events backend
//!
//! Wraps a `reqwest::Client` configured from `ApiConfig`. Every request gets
//! an `X-Request-Id` and, when a session is passed, a bearer token. Non-success
//! responses are mapped onto `CampusEventsError` here so repositories only deal
//! with typed payloads.

use std::time::{Duration, Instant};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;
use uuid::Uuid;
use crate::config::ApiConfig;
use crate::models::user::Session;
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::logging;

/// Error body returned by the backend
#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(CampusEventsError::Http)?;

        let mut base_url = Url::parse(&config.base_url)?;
        // Url::join drops the last segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL for `segments` under the API root.
    ///
    /// Each segment is percent-encoded on its own, so an id containing `/`,
    /// `?` or `#` stays a single path segment.
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CampusEventsError::InvalidInput(format!("base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str], session: Option<&Session>) -> Result<T> {
        let (path, builder) = self.request(Method::GET, segments, session)?;
        self.execute(Method::GET, &path, builder).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        session: Option<&Session>,
        body: &B,
    ) -> Result<T> {
        let (path, builder) = self.request(Method::POST, segments, session)?;
        self.execute(Method::POST, &path, builder.json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        session: Option<&Session>,
        body: &B,
    ) -> Result<T> {
        let (path, builder) = self.request(Method::PUT, segments, session)?;
        self.execute(Method::PUT, &path, builder.json(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        session: Option<&Session>,
        body: &B,
    ) -> Result<T> {
        let (path, builder) = self.request(Method::PATCH, segments, session)?;
        self.execute(Method::PATCH, &path, builder.json(body)).await
    }

    /// Returns the encoded request path (for logs) with the prepared request
    fn request(&self, method: Method, segments: &[&str], session: Option<&Session>) -> Result<(String, RequestBuilder)> {
        let url = self.url(segments)?;
        let path = url.path().to_string();
        let mut builder = self
            .client
            .request(method, url)
            .header("X-Request-Id", Uuid::new_v4().to_string());

        if let Some(session) = session {
            builder = builder.bearer_auth(&session.token);
        }

        Ok((path, builder))
    }

    async fn execute<T: DeserializeOwned>(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<T> {
        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            logging::log_api_error(path, &e.to_string(), Some(method.as_str()));
            CampusEventsError::Http(e)
        })?;

        let status = response.status();
        logging::log_api_request(method.as_str(), path, status.as_u16(), started.elapsed().as_millis() as u64);

        let body = response.text().await?;

        if status.is_success() {
            debug!(path = path, bytes = body.len(), "Decoding API response");
            return serde_json::from_str(&body).map_err(|e| {
                logging::log_api_error(path, &e.to_string(), Some("invalid response body"));
                CampusEventsError::Serialization(e)
            });
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| body.clone());
        logging::log_api_error(path, &message, Some(status.as_str()));

        Err(match status {
            StatusCode::UNAUTHORIZED => CampusEventsError::Unauthorized(message),
            StatusCode::NOT_FOUND => CampusEventsError::NotFound(message),
            other => CampusEventsError::Api { status: other.as_u16(), message },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let mut config = Settings::default().api;
        config.base_url = "http://localhost:5000/api".to_string();
        let client = ApiClient::new(&config).unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost:5000/api/");
        assert_eq!(
            client.url(&["events", "42"]).unwrap().as_str(),
            "http://localhost:5000/api/events/42"
        );
    }

    #[test]
    fn test_ids_stay_inside_their_segment() {
        let client = ApiClient::new(&Settings::default().api).unwrap();

        let traversal = client.url(&["events", "../../admin"]).unwrap();
        assert!(traversal.path().starts_with("/api/events/"));
        assert!(traversal.path().contains("%2F"));

        let query = client.url(&["events", "abc?admin=1"]).unwrap();
        assert_eq!(query.path(), "/api/events/abc%3Fadmin=1");
        assert_eq!(query.query(), None);

        let fragment = client.url(&["registrations", "r#1", "status"]).unwrap();
        assert_eq!(fragment.path(), "/api/registrations/r%231/status");
        assert_eq!(fragment.fragment(), None);
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let mut config = Settings::default().api;
        config.base_url = "not a url".to_string();
        assert!(matches!(ApiClient::new(&config), Err(CampusEventsError::UrlParse(_))));
    }
}
