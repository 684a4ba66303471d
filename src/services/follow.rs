//! Followed organizers
//!
//! The set itself is pure; `FollowService` persists it through the
//! user-preferences endpoint.

use std::collections::HashSet;
use tracing::info;
use crate::api::repositories::PreferencesRepository;
use crate::models::event::OrganizerId;
use crate::models::user::Session;
use crate::services::filter::FollowFilter;
use crate::utils::errors::Result;
use crate::utils::logging;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowingSet {
    organizers: HashSet<OrganizerId>,
}

impl FollowingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow if not followed, unfollow otherwise. Returns whether the organizer is now followed.
    pub fn toggle(&mut self, organizer_id: &OrganizerId) -> bool {
        if self.organizers.remove(organizer_id) {
            false
        } else {
            self.organizers.insert(organizer_id.clone());
            true
        }
    }

    pub fn contains(&self, organizer_id: &OrganizerId) -> bool {
        self.organizers.contains(organizer_id)
    }

    pub fn len(&self) -> usize {
        self.organizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organizers.is_empty()
    }

    /// Sorted ids, the order the preferences endpoint stores them in
    pub fn to_sorted_vec(&self) -> Vec<OrganizerId> {
        let mut ids: Vec<OrganizerId> = self.organizers.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn to_filter(&self, enabled: bool) -> FollowFilter {
        FollowFilter {
            enabled,
            organizer_ids: self.organizers.clone(),
        }
    }
}

impl FromIterator<OrganizerId> for FollowingSet {
    fn from_iter<I: IntoIterator<Item = OrganizerId>>(iter: I) -> Self {
        Self { organizers: iter.into_iter().collect() }
    }
}

/// Reads and writes the followed-organizer preference
#[derive(Clone)]
pub struct FollowService {
    preferences: PreferencesRepository,
}

impl FollowService {
    pub fn new(preferences: PreferencesRepository) -> Self {
        Self { preferences }
    }

    pub async fn following(&self, session: &Session) -> Result<FollowingSet> {
        let preferences = self.preferences.get(session).await?;
        Ok(preferences.followed_organizers.into_iter().collect())
    }

    /// Toggle one organizer and store the result. Returns whether it is now followed.
    pub async fn toggle_follow(&self, session: &Session, organizer_id: &OrganizerId) -> Result<bool> {
        let mut following = self.following(session).await?;
        let now_following = following.toggle(organizer_id);

        self.preferences
            .set_followed_organizers(session, following.to_sorted_vec())
            .await?;

        logging::log_user_action(
            &session.user.id,
            if now_following { "follow_organizer" } else { "unfollow_organizer" },
            Some(&organizer_id.0),
        );
        info!(organizer_id = %organizer_id, following = following.len(), "Follow list updated");

        Ok(now_following)
    }
}
