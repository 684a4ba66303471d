//! Backend API module
//!
//! This module handles the HTTP connection to the events backend and the
//! per-resource repositories built on top of it.

pub mod client;
pub mod payloads;
pub mod repositories;
pub mod service;

// Re-export commonly used API components
pub use client::ApiClient;
pub use payloads::Preferences;
pub use repositories::{AuthRepository, EventRepository, RegistrationRepository, PreferencesRepository};
pub use service::ApiService;
