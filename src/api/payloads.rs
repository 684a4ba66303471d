//! Wire payloads and their validation
//!
//! The backend returns loosely shaped JSON (Mongo `_id`s, optionally
//! populated references, camelCase keys). Each payload is converted into the
//! domain model exactly once, here, and the model invariants are checked on
//! the way in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::event::{Event, EventId, EventSummary, EventType, FormField, MerchandiseItem, OrganizerId};
use crate::models::registration::{Participant, PaymentStatus, Registration, RegistrationId, RegistrationStatus};
use crate::models::user::{Role, Session, User, UserId};
use crate::utils::errors::{CampusEventsError, Result};

/// Organizer reference, either a bare id or a populated document
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrganizerRef {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(alias = "organizerName")]
        name: Option<String>,
    },
}

impl OrganizerRef {
    fn into_parts(self) -> (OrganizerId, Option<String>) {
        match self {
            OrganizerRef::Id(id) => (OrganizerId(id), None),
            OrganizerRef::Populated { id, name } => (OrganizerId(id), name),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    #[serde(rename = "_id")]
    pub id: String,
    pub organizer_id: OrganizerRef,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub eligibility: Option<String>,
    pub venue: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub registration_fee: Option<f64>,
    #[serde(default)]
    pub is_published: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    #[serde(default)]
    pub current_registrations: i64,
    pub registration_limit: Option<i64>,
    #[serde(default)]
    pub custom_form: Vec<FormField>,
    #[serde(default, alias = "merchandiseItems")]
    pub merchandise: Vec<MerchandiseItem>,
    pub purchase_limit: Option<u32>,
}

impl TryFrom<EventPayload> for Event {
    type Error = CampusEventsError;

    fn try_from(payload: EventPayload) -> Result<Self> {
        if payload.start_date > payload.end_date {
            return Err(CampusEventsError::InvalidPayload(format!(
                "event {}: startDate {} is after endDate {}",
                payload.id, payload.start_date, payload.end_date
            )));
        }

        let current_registrations = u32::try_from(payload.current_registrations).map_err(|_| {
            CampusEventsError::InvalidPayload(format!(
                "event {}: currentRegistrations out of range: {}",
                payload.id, payload.current_registrations
            ))
        })?;

        let registration_limit = match payload.registration_limit {
            None => None,
            Some(limit) if limit > 0 => Some(u32::try_from(limit).map_err(|_| {
                CampusEventsError::InvalidPayload(format!("event {}: registrationLimit too large", payload.id))
            })?),
            Some(limit) => {
                return Err(CampusEventsError::InvalidPayload(format!(
                    "event {}: registrationLimit must be positive, got {}",
                    payload.id, limit
                )))
            }
        };

        let (organizer_id, organizer_name) = payload.organizer_id.into_parts();

        Ok(Event {
            id: EventId(payload.id),
            organizer_id,
            organizer_name,
            name: payload.name,
            description: payload.description,
            event_type: payload.event_type,
            eligibility: payload.eligibility,
            venue: payload.venue,
            tags: payload.tags,
            registration_fee: payload.registration_fee,
            is_published: payload.is_published,
            start_date: payload.start_date,
            end_date: payload.end_date,
            registration_deadline: payload.registration_deadline,
            current_registrations,
            registration_limit,
            custom_form: payload.custom_form,
            merchandise: payload.merchandise,
            purchase_limit: payload.purchase_limit,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummaryPayload {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub organizer_id: OrganizerRef,
}

impl TryFrom<EventSummaryPayload> for EventSummary {
    type Error = CampusEventsError;

    fn try_from(payload: EventSummaryPayload) -> Result<Self> {
        if payload.start_date > payload.end_date {
            return Err(CampusEventsError::InvalidPayload(format!(
                "event {}: startDate is after endDate",
                payload.id
            )));
        }

        Ok(EventSummary {
            id: EventId(payload.id),
            name: payload.name,
            start_date: payload.start_date,
            end_date: payload.end_date,
            organizer_id: payload.organizer_id.into_parts().0,
        })
    }
}

/// Person as the backend sends it; some endpoints split the name
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPayload {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: String,
}

impl PersonPayload {
    fn display_name(&self) -> String {
        if let Some(ref name) = self.name {
            return name.clone();
        }
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<PersonPayload> for Participant {
    fn from(payload: PersonPayload) -> Self {
        Participant {
            name: payload.display_name(),
            id: UserId(payload.id),
            email: payload.email,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: RegistrationStatus,
    #[serde(default = "default_payment_status")]
    pub payment_status: PaymentStatus,
    #[serde(alias = "eventId")]
    pub event: EventSummaryPayload,
    #[serde(alias = "participantId")]
    pub participant: PersonPayload,
    #[serde(alias = "createdAt")]
    pub registered_at: DateTime<Utc>,
}

fn default_payment_status() -> PaymentStatus {
    PaymentStatus::Pending
}

impl TryFrom<RegistrationPayload> for Registration {
    type Error = CampusEventsError;

    fn try_from(payload: RegistrationPayload) -> Result<Self> {
        Ok(Registration {
            id: RegistrationId(payload.id),
            status: payload.status,
            payment_status: payload.payment_status,
            event: payload.event.try_into()?,
            participant: payload.participant.into(),
            registered_at: payload.registered_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    #[serde(flatten)]
    pub person: PersonPayload,
    pub role: Role,
}

impl From<UserPayload> for User {
    fn from(payload: UserPayload) -> Self {
        let role = payload.role;
        let participant: Participant = payload.person.into();
        User {
            id: participant.id,
            name: participant.name,
            email: participant.email,
            role,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPayload,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Session::new(response.token, response.user.into())
    }
}

/// Stored user preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub followed_organizers: Vec<OrganizerId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateBody {
    pub status: RegistrationStatus,
}

/// Convert a list of payloads, failing on the first invalid one
pub fn convert_all<P, T>(payloads: Vec<P>) -> Result<Vec<T>>
where
    T: TryFrom<P, Error = CampusEventsError>,
{
    payloads.into_iter().map(T::try_from).collect()
}
