//! Services module
//!
//! This module contains the event policy functions and the business logic
//! services built on top of the API repositories

pub mod lifecycle;
pub mod editability;
pub mod filter;
pub mod follow;
pub mod event;
pub mod registration;

// Re-export commonly used services
pub use lifecycle::classify;
pub use editability::{is_editable, is_editable_by_name, check_edit};
pub use filter::{Filterable, FilterPredicates, Selection, TimeWindow, TextSearch, FollowFilter, trending};
pub use follow::{FollowingSet, FollowService};
pub use event::{EventService, ClassifiedEvent};
pub use registration::RegistrationService;

use std::sync::Arc;
use tracing::debug;
use crate::api::ApiService;
use crate::config::settings::Settings;
use crate::models::event::{Event, EventStatus};
use crate::models::registration::{Registration, RegistrationStatus};
use crate::models::user::Session;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub api: ApiService,
    pub event_service: EventService,
    pub registration_service: RegistrationService,
    pub follow_service: FollowService,
    settings: Settings,
    clock: Arc<dyn Clock>,
}

/// Everything the participant landing page shows
#[derive(Debug, Clone, Default)]
pub struct BrowseView {
    pub events: Vec<Event>,
    pub trending: Vec<Event>,
    pub following: FollowingSet,
    pub upcoming_registrations: Vec<Registration>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    /// Same as `new` with an explicit time source
    pub fn with_clock(settings: Settings, clock: Arc<dyn Clock>) -> Result<Self> {
        let api = ApiService::new(&settings.api)?;

        Ok(Self {
            event_service: EventService::new(api.events.clone(), clock.clone()),
            registration_service: RegistrationService::new(api.registrations.clone(), clock.clone()),
            follow_service: FollowService::new(api.preferences.clone()),
            api,
            settings,
            clock,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build the browse page: events (limited to followed organizers when
    /// enabled), trending, and the participant's upcoming registrations
    pub async fn browse_view(&self, session: &Session) -> Result<BrowseView> {
        let now = self.clock.now();
        let (events, registrations) = self.api.load_dashboard(session).await?;

        let following = if self.settings.features.follow_filter {
            self.follow_service.following(session).await?
        } else {
            FollowingSet::new()
        };

        let visible: Vec<Event> = events
            .into_iter()
            .filter(|event| classify(event, now) != EventStatus::Draft)
            .collect();

        let predicates = FilterPredicates {
            following: following.to_filter(self.settings.features.follow_filter),
            ..Default::default()
        };
        let events = filter::filter(&visible, &predicates, now);

        let trending = if self.settings.features.trending {
            trending(&visible)
        } else {
            Vec::new()
        };

        let upcoming = FilterPredicates::new()
            .with_status(RegistrationStatus::Registered)
            .with_window(TimeWindow::Upcoming);
        let upcoming_registrations = filter::filter(&registrations, &upcoming, now);

        debug!(
            events = events.len(),
            trending = trending.len(),
            following = following.len(),
            upcoming = upcoming_registrations.len(),
            "Browse view built"
        );

        Ok(BrowseView {
            events,
            trending,
            following,
            upcoming_registrations,
        })
    }
}
