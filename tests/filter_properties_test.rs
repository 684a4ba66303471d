//! Property tests for the list filter engine

mod helpers;

use std::collections::HashSet;
use chrono::Duration;
use proptest::prelude::*;
use helpers::*;
use CampusEvents::models::{Event, OrganizerId, PaymentStatus, Registration, RegistrationStatus};
use CampusEvents::services::filter::{filter, trending, FilterPredicates, FollowFilter, Selection, TextSearch, TimeWindow, TRENDING_LIMIT};

const ORGANIZERS: [&str; 3] = ["org-a", "org-b", "org-c"];
const EVENT_NAMES: [&str; 4] = ["Dance Night", "Robotics Expo", "Night Market", "Chess Open"];

fn status_strategy() -> impl Strategy<Value = RegistrationStatus> {
    prop_oneof![
        Just(RegistrationStatus::Registered),
        Just(RegistrationStatus::Attended),
        Just(RegistrationStatus::Cancelled),
    ]
}

fn payment_strategy() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Pending),
        Just(PaymentStatus::Completed),
        Just(PaymentStatus::Failed),
        Just(PaymentStatus::Refunded),
    ]
}

fn registration_strategy() -> impl Strategy<Value = Registration> {
    (status_strategy(), payment_strategy(), -10i64..10, 0usize..ORGANIZERS.len(), 0usize..EVENT_NAMES.len(), 0u32..1000)
        .prop_map(|(status, payment, offset_hours, organizer, name, id)| {
            let event = EventBuilder::new(&format!("evt-{}", name))
                .name(EVENT_NAMES[name])
                .organizer(ORGANIZERS[organizer])
                .starts_in(Duration::hours(offset_hours))
                .build();
            let mut registration = registration_for(&format!("reg-{}", id), &event, status, payment);
            registration.participant.name = format!("Student {}", id);
            registration
        })
}

fn predicates_strategy() -> impl Strategy<Value = FilterPredicates> {
    (
        proptest::option::of(status_strategy()),
        proptest::option::of(payment_strategy()),
        prop_oneof![Just(TimeWindow::All), Just(TimeWindow::Upcoming), Just(TimeWindow::Past)],
        proptest::sample::select(vec!["", "   ", "night", "ROBO", "student 1", "zzz"]),
        any::<bool>(),
        proptest::collection::hash_set(0usize..ORGANIZERS.len(), 0..3),
        any::<bool>(),
    )
        .prop_map(|(status, payment, window, query, include_participant, followed, follow_enabled)| FilterPredicates {
            status: status.map(Selection::Only).unwrap_or_default(),
            payment_status: payment.map(Selection::Only).unwrap_or_default(),
            window,
            search: TextSearch { query: query.to_string(), include_participant },
            following: FollowFilter {
                enabled: follow_enabled,
                organizer_ids: followed.into_iter().map(|i| OrganizerId::from(ORGANIZERS[i])).collect(),
            },
        })
}

/// Split a predicate set into one set per predicate
fn split(predicates: &FilterPredicates) -> Vec<FilterPredicates> {
    vec![
        FilterPredicates { status: predicates.status, ..Default::default() },
        FilterPredicates { payment_status: predicates.payment_status, ..Default::default() },
        FilterPredicates { window: predicates.window, ..Default::default() },
        FilterPredicates { search: predicates.search.clone(), ..Default::default() },
        FilterPredicates { following: predicates.following.clone(), ..Default::default() },
    ]
}

proptest! {
    #[test]
    fn prop_filter_is_idempotent(
        items in proptest::collection::vec(registration_strategy(), 0..30),
        predicates in predicates_strategy(),
    ) {
        let once = filter(&items, &predicates, test_now());
        let twice = filter(&once, &predicates, test_now());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_default_predicates_are_identity(items in proptest::collection::vec(registration_strategy(), 0..30)) {
        prop_assert_eq!(filter(&items, &FilterPredicates::default(), test_now()), items);
    }

    #[test]
    fn prop_predicates_commute(
        items in proptest::collection::vec(registration_strategy(), 0..30),
        predicates in predicates_strategy(),
    ) {
        let combined = filter(&items, &predicates, test_now());

        let parts = split(&predicates);
        let forward = parts.iter().fold(items.clone(), |acc, p| filter(&acc, p, test_now()));
        let backward = parts.iter().rev().fold(items.clone(), |acc, p| filter(&acc, p, test_now()));

        prop_assert_eq!(&forward, &combined);
        prop_assert_eq!(&backward, &combined);
    }

    #[test]
    fn prop_filter_preserves_input_order(
        items in proptest::collection::vec(registration_strategy(), 0..30),
        predicates in predicates_strategy(),
    ) {
        let expected: Vec<Registration> = items
            .iter()
            .filter(|item| predicates.matches(*item, test_now()))
            .cloned()
            .collect();
        prop_assert_eq!(filter(&items, &predicates, test_now()), expected);
    }

    #[test]
    fn prop_trending_is_stable_top_five(counts in proptest::collection::vec(0u32..6, 0..15)) {
        let events: Vec<Event> = counts
            .iter()
            .enumerate()
            .map(|(i, count)| EventBuilder::new(&format!("{}", i)).registrations(*count).build())
            .collect();

        let top = trending(&events);
        prop_assert_eq!(top.len(), events.len().min(TRENDING_LIMIT));

        for pair in top.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.current_registrations >= b.current_registrations);
            if a.current_registrations == b.current_registrations {
                let ia: usize = a.id.0.parse().unwrap();
                let ib: usize = b.id.0.parse().unwrap();
                prop_assert!(ia < ib);
            }
        }

        if let Some(last) = top.last() {
            let cut = events.iter().filter(|e| e.current_registrations > last.current_registrations).count();
            prop_assert!(cut <= TRENDING_LIMIT);
        }
    }
}

#[test]
fn test_trending_example_from_registration_counts() {
    let events: Vec<Event> = [5, 20, 20, 3, 8, 1]
        .iter()
        .enumerate()
        .map(|(i, count)| EventBuilder::new(&format!("e{}", i)).registrations(*count).build())
        .collect();

    let top: Vec<(String, u32)> = trending(&events)
        .into_iter()
        .map(|e| (e.id.0, e.current_registrations))
        .collect();

    assert_eq!(
        top,
        vec![
            ("e1".to_string(), 20),
            ("e2".to_string(), 20),
            ("e4".to_string(), 8),
            ("e0".to_string(), 5),
            ("e3".to_string(), 3),
        ]
    );
}

#[test]
fn test_whitespace_query_keeps_all_ten_events() {
    let events: Vec<Event> = (0..10)
        .map(|i| EventBuilder::new(&format!("e{}", i)).starts_in(Duration::days(i - 5)).build())
        .collect();

    let predicates = FilterPredicates::new().with_search("  ", false);
    assert_eq!(filter(&events, &predicates, test_now()), events);
}

#[test]
fn test_follow_filter_over_events() {
    let events = vec![
        EventBuilder::new("a").organizer("org-a").build(),
        EventBuilder::new("b").organizer("org-b").build(),
        EventBuilder::new("c").organizer("org-a").build(),
    ];
    let followed: HashSet<OrganizerId> = [OrganizerId::from("org-a")].into_iter().collect();

    let ids: Vec<String> = filter(&events, &FilterPredicates::new().with_following(followed), test_now())
        .into_iter()
        .map(|e| e.id.0)
        .collect();
    assert_eq!(ids, vec!["a", "c"]);
}
