//! Test data helpers
//!
//! Builders for events, registrations and sessions, plus their wire-format JSON.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fake::{Fake, faker::lorem::en::Words, faker::name::en::Name};
use serde_json::{json, Value};
use CampusEvents::models::{
    Event, EventId, EventType, FormField, OrganizerId, Participant, PaymentStatus, Registration,
    RegistrationId, RegistrationStatus, Role, Session, User, UserId,
};

pub const ORGANIZER_ID: &str = "org-1";
pub const ORGANIZER_TOKEN: &str = "organizer-token";
pub const PARTICIPANT_TOKEN: &str = "participant-token";

/// The instant every test treats as "now"
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()
}

pub fn organizer_session() -> Session {
    Session::new(
        ORGANIZER_TOKEN,
        User {
            id: UserId(ORGANIZER_ID.to_string()),
            name: "Robotics Club".to_string(),
            email: "robotics@campus.edu".to_string(),
            role: Role::Organizer,
        },
    )
}

pub fn participant_session() -> Session {
    Session::new(
        PARTICIPANT_TOKEN,
        User {
            id: UserId("user-1".to_string()),
            name: Name().fake(),
            email: "participant@campus.edu".to_string(),
            role: Role::Participant,
        },
    )
}

pub fn random_event_name() -> String {
    let words: Vec<String> = Words(2..4).fake();
    words.join(" ")
}

/// Published event a week out, owned by `ORGANIZER_ID`, no registrations
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn new(id: &str) -> Self {
        let start = test_now() + Duration::days(7);
        Self {
            event: Event {
                id: EventId::from(id),
                organizer_id: OrganizerId::from(ORGANIZER_ID),
                organizer_name: Some("Robotics Club".to_string()),
                name: random_event_name(),
                description: "An event on campus".to_string(),
                event_type: EventType::Normal,
                eligibility: Some("all".to_string()),
                venue: Some("Main Auditorium".to_string()),
                tags: vec!["tech".to_string()],
                registration_fee: None,
                is_published: true,
                start_date: start,
                end_date: start + Duration::hours(3),
                registration_deadline: start - Duration::days(1),
                current_registrations: 0,
                registration_limit: None,
                custom_form: vec![],
                merchandise: vec![],
                purchase_limit: None,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.event.name = name.to_string();
        self
    }

    pub fn organizer(mut self, organizer: &str) -> Self {
        self.event.organizer_id = OrganizerId::from(organizer);
        self
    }

    pub fn published(mut self, is_published: bool) -> Self {
        self.event.is_published = is_published;
        self
    }

    pub fn window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.event.start_date = start;
        self.event.end_date = end;
        self.event.registration_deadline = start - Duration::days(1);
        self
    }

    /// Start `offset` from `test_now()`, lasting three hours
    pub fn starts_in(self, offset: Duration) -> Self {
        let start = test_now() + offset;
        self.window(start, start + Duration::hours(3))
    }

    pub fn deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.event.registration_deadline = deadline;
        self
    }

    pub fn registrations(mut self, count: u32) -> Self {
        self.event.current_registrations = count;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.event.registration_limit = Some(limit);
        self
    }

    pub fn merchandise(mut self) -> Self {
        self.event.event_type = EventType::Merchandise;
        self
    }

    pub fn custom_form(mut self, labels: &[&str]) -> Self {
        self.event.custom_form = labels
            .iter()
            .map(|label| FormField {
                label: label.to_string(),
                field_type: "text".to_string(),
                required: true,
                options: vec![],
            })
            .collect();
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}

pub fn registration_for(id: &str, event: &Event, status: RegistrationStatus, payment: PaymentStatus) -> Registration {
    let name: String = Name().fake();
    Registration {
        id: RegistrationId::from(id),
        status,
        payment_status: payment,
        event: event.summary(),
        participant: Participant {
            id: UserId(format!("participant-{}", id)),
            email: format!("{}@campus.edu", id),
            name,
        },
        registered_at: test_now() - Duration::days(2),
    }
}

/// Event as the backend serializes it
pub fn event_json(event: &Event) -> Value {
    json!({
        "_id": event.id.0,
        "organizerId": { "_id": event.organizer_id.0, "organizerName": event.organizer_name },
        "name": event.name,
        "description": event.description,
        "type": event.event_type,
        "eligibility": event.eligibility,
        "venue": event.venue,
        "tags": event.tags,
        "registrationFee": event.registration_fee,
        "isPublished": event.is_published,
        "startDate": event.start_date,
        "endDate": event.end_date,
        "registrationDeadline": event.registration_deadline,
        "currentRegistrations": event.current_registrations,
        "registrationLimit": event.registration_limit,
        "customForm": event.custom_form,
        "merchandiseItems": event.merchandise,
        "purchaseLimit": event.purchase_limit,
    })
}

/// Registration as the backend serializes it, with populated references
pub fn registration_json(registration: &Registration) -> Value {
    json!({
        "_id": registration.id.0,
        "status": registration.status,
        "paymentStatus": registration.payment_status,
        "eventId": {
            "_id": registration.event.id.0,
            "name": registration.event.name,
            "startDate": registration.event.start_date,
            "endDate": registration.event.end_date,
            "organizerId": registration.event.organizer_id.0,
        },
        "participantId": {
            "_id": registration.participant.id.0,
            "name": registration.participant.name,
            "email": registration.participant.email,
        },
        "createdAt": registration.registered_at,
    })
}

pub fn session_json(session: &Session) -> Value {
    json!({
        "token": session.token,
        "user": {
            "_id": session.user.id.0,
            "name": session.user.name,
            "email": session.user.email,
            "role": session.user.role,
        }
    })
}
