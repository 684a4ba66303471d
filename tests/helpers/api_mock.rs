//! Mock events backend for testing
//!
//! Wraps a wiremock server that answers under `/api` the way the real
//! backend does.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};
use CampusEvents::config::Settings;
use CampusEvents::models::{Event, Registration, Session};
use super::test_data::{event_json, registration_json, session_json};

pub struct BackendMock {
    pub server: MockServer,
}

impl BackendMock {
    pub async fn start() -> Self {
        Self { server: MockServer::start().await }
    }

    /// Settings pointing at this mock
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = format!("{}/api", self.server.uri());
        settings.api.timeout_seconds = 5;
        settings
    }

    pub async fn mock_login(&self, session: &Session) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_json(session)))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_events(&self, events: &[Event]) {
        let body: Vec<Value> = events.iter().map(event_json).collect();
        Mock::given(method("GET"))
            .and(path("/api/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_event(&self, event: &Event) {
        Mock::given(method("GET"))
            .and(path(format!("/api/events/{}", event.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(event_json(event)))
            .mount(&self.server)
            .await;
    }

    /// Serve `first` once, then `then` for every later read
    pub async fn mock_event_sequence(&self, first: &Event, then: &Event) {
        Mock::given(method("GET"))
            .and(path(format!("/api/events/{}", first.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(event_json(first)))
            .up_to_n_times(1)
            .expect(1)
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/api/events/{}", then.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(event_json(then)))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_organizer_events(&self, organizer_id: &str, events: &[Event]) {
        let body: Vec<Value> = events.iter().map(event_json).collect();
        Mock::given(method("GET"))
            .and(path(format!("/api/events/organizer/{}", organizer_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Accept updates and answer with `updated`; verified to be called `expected` times
    pub async fn mock_update_ok(&self, updated: &Event, expected: u64) {
        Mock::given(method("PUT"))
            .and(path(format!("/api/events/{}", updated.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(event_json(updated)))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_update_rejected(&self, event: &Event, status: u16, message: &str) {
        Mock::given(method("PUT"))
            .and(path(format!("/api/events/{}", event.id)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "message": message })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_my_registrations(&self, registrations: &[Registration]) {
        let body: Vec<Value> = registrations.iter().map(registration_json).collect();
        Mock::given(method("GET"))
            .and(path("/api/registrations/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_event_registrations(&self, event: &Event, registrations: &[Registration]) {
        let body: Vec<Value> = registrations.iter().map(registration_json).collect();
        Mock::given(method("GET"))
            .and(path(format!("/api/events/{}/registrations", event.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_register(&self, event: &Event, registration: &Registration, expected: u64) {
        Mock::given(method("POST"))
            .and(path(format!("/api/events/{}/register", event.id)))
            .respond_with(ResponseTemplate::new(201).set_body_json(registration_json(registration)))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_status_update(&self, updated: &Registration, expected: u64) {
        Mock::given(method("PATCH"))
            .and(path(format!("/api/registrations/{}/status", updated.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(registration_json(updated)))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_preferences(&self, session: &Session, followed: &[&str]) {
        Mock::given(method("GET"))
            .and(path("/api/users/me/preferences"))
            .and(header("Authorization", format!("Bearer {}", session.token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "followedOrganizers": followed })))
            .mount(&self.server)
            .await;
    }
}
