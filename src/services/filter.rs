//! Registration and event list filtering
//!
//! The same engine backs the browse-events page, a participant's own
//! registrations and an organizer's per-event registration table. Every
//! predicate is an independent boolean test, so predicates combine with AND
//! in any order and filtering never reorders its input. The trending view is
//! the one place that sorts.

use std::collections::HashSet;
use chrono::{DateTime, Utc};
use tracing::debug;
use crate::models::event::{Event, OrganizerId};
use crate::models::registration::{Participant, PaymentStatus, Registration, RegistrationStatus};

/// Size of the trending list on the browse page
pub const TRENDING_LIMIT: usize = 5;

/// Anything a list view can filter
pub trait Filterable {
    fn event_name(&self) -> &str;
    fn event_start(&self) -> DateTime<Utc>;
    fn organizer_id(&self) -> &OrganizerId;

    fn registration_status(&self) -> Option<RegistrationStatus> {
        None
    }

    fn payment_status(&self) -> Option<PaymentStatus> {
        None
    }

    fn participant(&self) -> Option<&Participant> {
        None
    }
}

impl Filterable for Event {
    fn event_name(&self) -> &str {
        &self.name
    }

    fn event_start(&self) -> DateTime<Utc> {
        self.start_date
    }

    fn organizer_id(&self) -> &OrganizerId {
        &self.organizer_id
    }
}

impl Filterable for Registration {
    fn event_name(&self) -> &str {
        &self.event.name
    }

    fn event_start(&self) -> DateTime<Utc> {
        self.event.start_date
    }

    fn organizer_id(&self) -> &OrganizerId {
        &self.event.organizer_id
    }

    fn registration_status(&self) -> Option<RegistrationStatus> {
        Some(self.status)
    }

    fn payment_status(&self) -> Option<PaymentStatus> {
        Some(self.payment_status)
    }

    fn participant(&self) -> Option<&Participant> {
        Some(&self.participant)
    }
}

/// Either the "all" sentinel or one exact value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Items without a value never match a concrete selection.
    pub fn matches(&self, value: Option<T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => value.as_ref() == Some(expected),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeWindow {
    #[default]
    All,
    /// Event starts at or after `now`
    Upcoming,
    /// Event started before `now`
    Past,
}

impl TimeWindow {
    pub fn matches(&self, start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            TimeWindow::All => true,
            TimeWindow::Upcoming => start >= now,
            TimeWindow::Past => start < now,
        }
    }
}

/// Case-insensitive substring search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSearch {
    pub query: String,
    /// Also search participant name and email (organizer registration table)
    pub include_participant: bool,
}

impl TextSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), include_participant: false }
    }

    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        if self.is_blank() {
            return true;
        }

        let needle = self.query.trim().to_lowercase();
        if item.event_name().to_lowercase().contains(&needle) {
            return true;
        }

        if self.include_participant {
            if let Some(participant) = item.participant() {
                return participant.name.to_lowercase().contains(&needle)
                    || participant.email.to_lowercase().contains(&needle);
            }
        }

        false
    }
}

/// Keep only items whose organizer the user follows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowFilter {
    pub enabled: bool,
    pub organizer_ids: HashSet<OrganizerId>,
}

impl FollowFilter {
    pub fn matches(&self, organizer_id: &OrganizerId) -> bool {
        if !self.enabled || self.organizer_ids.is_empty() {
            return true;
        }
        self.organizer_ids.contains(organizer_id)
    }
}

/// Predicate set for one list view; the default bypasses everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicates {
    pub status: Selection<RegistrationStatus>,
    pub payment_status: Selection<PaymentStatus>,
    pub window: TimeWindow,
    pub search: TextSearch,
    pub following: FollowFilter,
}

impl FilterPredicates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: RegistrationStatus) -> Self {
        self.status = Selection::Only(status);
        self
    }

    pub fn with_payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Selection::Only(payment_status);
        self
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_search(mut self, query: impl Into<String>, include_participant: bool) -> Self {
        self.search = TextSearch { query: query.into(), include_participant };
        self
    }

    pub fn with_following(mut self, organizer_ids: HashSet<OrganizerId>) -> Self {
        self.following = FollowFilter { enabled: true, organizer_ids };
        self
    }

    /// True when no predicate would drop anything
    pub fn is_passthrough(&self) -> bool {
        self.status.is_all()
            && self.payment_status.is_all()
            && self.window == TimeWindow::All
            && self.search.is_blank()
            && (!self.following.enabled || self.following.organizer_ids.is_empty())
    }

    pub fn matches<T: Filterable>(&self, item: &T, now: DateTime<Utc>) -> bool {
        self.status.matches(item.registration_status())
            && self.payment_status.matches(item.payment_status())
            && self.window.matches(item.event_start(), now)
            && self.search.matches(item)
            && self.following.matches(item.organizer_id())
    }
}

/// Stable filter: matching items in their original order.
pub fn filter<T: Filterable + Clone>(items: &[T], predicates: &FilterPredicates, now: DateTime<Utc>) -> Vec<T> {
    let filtered: Vec<T> = items
        .iter()
        .filter(|item| predicates.matches(*item, now))
        .cloned()
        .collect();

    debug!(
        input = items.len(),
        output = filtered.len(),
        passthrough = predicates.is_passthrough(),
        "Applied list filter"
    );

    filtered
}

/// Top events by registration count, ties kept in input order.
pub fn trending(events: &[Event]) -> Vec<Event> {
    let mut ranked = events.to_vec();
    // sort_by is stable
    ranked.sort_by(|a, b| b.current_registrations.cmp(&a.current_registrations));
    ranked.truncate(TRENDING_LIMIT);
    ranked
}
