//! API repositories module
//!
//! One repository per backend resource. Repositories translate between wire
//! payloads and domain models; they never apply business rules.

pub mod auth;
pub mod event;
pub mod registration;
pub mod preferences;

// Re-export repositories
pub use auth::AuthRepository;
pub use event::EventRepository;
pub use registration::RegistrationRepository;
pub use preferences::PreferencesRepository;
