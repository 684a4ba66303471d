//! Event model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Opaque backend identifier of an event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

/// Opaque backend identifier of an organizer account
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizerId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for OrganizerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        EventId(value.to_string())
    }
}

impl From<&str> for OrganizerId {
    fn from(value: &str) -> Self {
        OrganizerId(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Normal,
    Merchandise,
}

/// One question of an event's custom registration form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

/// A purchasable variant of a merchandise event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseItem {
    pub name: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub stock: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub organizer_id: OrganizerId,
    pub organizer_name: Option<String>,
    pub name: String,
    pub description: String,
    pub event_type: EventType,
    pub eligibility: Option<String>,
    pub venue: Option<String>,
    pub tags: Vec<String>,
    pub registration_fee: Option<f64>,
    pub is_published: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    pub current_registrations: u32,
    pub registration_limit: Option<u32>,
    pub custom_form: Vec<FormField>,
    pub merchandise: Vec<MerchandiseItem>,
    pub purchase_limit: Option<u32>,
}

impl Event {
    /// Whether anybody has registered yet
    pub fn has_registrations(&self) -> bool {
        self.current_registrations > 0
    }

    /// Registration is open until the deadline instant (inclusive) while seats remain.
    pub fn is_registration_open(&self, now: DateTime<Utc>) -> bool {
        if now > self.registration_deadline {
            return false;
        }

        match self.registration_limit {
            Some(limit) => self.current_registrations < limit,
            None => true,
        }
    }

    /// Seats left before the limit is reached, `None` when unlimited
    pub fn remaining_capacity(&self) -> Option<u32> {
        self.registration_limit
            .map(|limit| limit.saturating_sub(self.current_registrations))
    }

    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            organizer_id: self.organizer_id.clone(),
        }
    }
}

/// The slice of an event the backend embeds in registration records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: EventId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub organizer_id: OrganizerId,
}

/// Coarse lifecycle stage, always derived from an event and the current time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Ongoing,
    Completed,
}

impl EventStatus {
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Draft,
        EventStatus::Published,
        EventStatus::Ongoing,
        EventStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(EventStatus::Draft),
            "published" => Ok(EventStatus::Published),
            "ongoing" => Ok(EventStatus::Ongoing),
            "completed" => Ok(EventStatus::Completed),
            other => Err(format!("unknown event status: {}", other)),
        }
    }
}

/// Every field an event edit can touch, named as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventField {
    Id,
    OrganizerId,
    EventType,
    Name,
    Description,
    Eligibility,
    Venue,
    Tags,
    RegistrationFee,
    StartDate,
    EndDate,
    RegistrationDeadline,
    RegistrationLimit,
    CustomForm,
    Merchandise,
    PurchaseLimit,
    IsPublished,
}

impl EventField {
    pub const ALL: [EventField; 17] = [
        EventField::Id,
        EventField::OrganizerId,
        EventField::EventType,
        EventField::Name,
        EventField::Description,
        EventField::Eligibility,
        EventField::Venue,
        EventField::Tags,
        EventField::RegistrationFee,
        EventField::StartDate,
        EventField::EndDate,
        EventField::RegistrationDeadline,
        EventField::RegistrationLimit,
        EventField::CustomForm,
        EventField::Merchandise,
        EventField::PurchaseLimit,
        EventField::IsPublished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventField::Id => "id",
            EventField::OrganizerId => "organizerId",
            EventField::EventType => "type",
            EventField::Name => "name",
            EventField::Description => "description",
            EventField::Eligibility => "eligibility",
            EventField::Venue => "venue",
            EventField::Tags => "tags",
            EventField::RegistrationFee => "registrationFee",
            EventField::StartDate => "startDate",
            EventField::EndDate => "endDate",
            EventField::RegistrationDeadline => "registrationDeadline",
            EventField::RegistrationLimit => "registrationLimit",
            EventField::CustomForm => "customForm",
            EventField::Merchandise => "merchandise",
            EventField::PurchaseLimit => "purchaseLimit",
            EventField::IsPublished => "isPublished",
        }
    }

    /// Identity fields are never mutable after creation
    pub fn is_identity(&self) -> bool {
        matches!(self, EventField::Id | EventField::OrganizerId)
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "_id" {
            return Ok(EventField::Id);
        }
        EventField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown event field: {}", s))
    }
}

/// Partial event update; `None` leaves the field untouched.
///
/// Nullable fields are doubled: `Some(None)` clears the stored value and is
/// sent as an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub eligibility: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub venue: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub registration_fee: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub registration_limit: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_form: Option<Vec<FormField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchandise: Option<Vec<MerchandiseItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]
    pub purchase_limit: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// Tells a missing key (`None`) apart from an explicit `null` (`Some(None)`).
mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// The proposed value when it is present and differs from the current one.
fn differing<T: PartialEq + Clone>(proposed: &Option<T>, current: &T) -> Option<T> {
    proposed.as_ref().filter(|value| *value != current).cloned()
}

impl UpdateEventRequest {
    /// The same request with every field that would not change `event` dropped.
    ///
    /// This is what goes on the wire: a resubmitted form must not carry
    /// untouched values for fields the current stage locks.
    pub fn changes_from(&self, event: &Event) -> UpdateEventRequest {
        UpdateEventRequest {
            event_type: differing(&self.event_type, &event.event_type),
            name: differing(&self.name, &event.name),
            description: differing(&self.description, &event.description),
            eligibility: differing(&self.eligibility, &event.eligibility),
            venue: differing(&self.venue, &event.venue),
            tags: differing(&self.tags, &event.tags),
            registration_fee: differing(&self.registration_fee, &event.registration_fee),
            start_date: differing(&self.start_date, &event.start_date),
            end_date: differing(&self.end_date, &event.end_date),
            registration_deadline: differing(&self.registration_deadline, &event.registration_deadline),
            registration_limit: differing(&self.registration_limit, &event.registration_limit),
            custom_form: differing(&self.custom_form, &event.custom_form),
            merchandise: differing(&self.merchandise, &event.merchandise),
            purchase_limit: differing(&self.purchase_limit, &event.purchase_limit),
            is_published: differing(&self.is_published, &event.is_published),
        }
    }

    /// Fields whose proposed value actually differs from `event`, in `EventField::ALL` order.
    pub fn changed_fields(&self, event: &Event) -> Vec<EventField> {
        self.changes_from(event).present_fields()
    }

    /// Fields this request sets, in `EventField::ALL` order.
    pub fn present_fields(&self) -> Vec<EventField> {
        [
            (EventField::EventType, self.event_type.is_some()),
            (EventField::Name, self.name.is_some()),
            (EventField::Description, self.description.is_some()),
            (EventField::Eligibility, self.eligibility.is_some()),
            (EventField::Venue, self.venue.is_some()),
            (EventField::Tags, self.tags.is_some()),
            (EventField::RegistrationFee, self.registration_fee.is_some()),
            (EventField::StartDate, self.start_date.is_some()),
            (EventField::EndDate, self.end_date.is_some()),
            (EventField::RegistrationDeadline, self.registration_deadline.is_some()),
            (EventField::RegistrationLimit, self.registration_limit.is_some()),
            (EventField::CustomForm, self.custom_form.is_some()),
            (EventField::Merchandise, self.merchandise.is_some()),
            (EventField::PurchaseLimit, self.purchase_limit.is_some()),
            (EventField::IsPublished, self.is_published.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, present)| present.then_some(field))
        .collect()
    }

    /// Check that applying the update keeps `start <= end` and a positive limit.
    pub fn validate_against(&self, event: &Event) -> Result<(), String> {
        let start = self.start_date.unwrap_or(event.start_date);
        let end = self.end_date.unwrap_or(event.end_date);
        if start > end {
            return Err(format!("startDate {} is after endDate {}", start, end));
        }

        if self.registration_limit == Some(Some(0)) {
            return Err("registrationLimit must be positive".to_string());
        }

        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                return Err("name cannot be empty".to_string());
            }
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self == &UpdateEventRequest::default()
    }
}
