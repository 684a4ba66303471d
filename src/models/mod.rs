//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod event;
pub mod registration;

// Re-export commonly used models
pub use user::{User, UserId, Role, Session, LoginRequest};
pub use event::{
    Event, EventId, OrganizerId, EventType, EventStatus, EventField, EventSummary,
    FormField, MerchandiseItem, UpdateEventRequest,
};
pub use registration::{Registration, RegistrationId, RegistrationStatus, PaymentStatus, Participant};
