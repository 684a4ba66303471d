//! CampusEvents
//!
//! Client-side core of a campus event-management application: the event
//! lifecycle classifier, the field-level edit policy, the list filters used by
//! the browse and registration views, and the typed HTTP collaborator that
//! feeds them.

#![allow(non_snake_case)]

pub mod config;
pub mod api;
pub mod services;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CampusEventsError, FieldLockedError, Result};

// Re-export main components for easy access
pub use api::ApiService;
pub use services::ServiceFactory;
pub use models::{Event, EventStatus, EventField, Registration, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
