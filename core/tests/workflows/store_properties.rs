// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Properties of the event store and the query helpers.

use timetable_core::{
    ClassTimes, EventAnchor, EventDraft, EventId, EventKind, EventPatch, EventStore,
    ScheduleTable, SchoolDay, filter_events, get_day_of_week, sort_events,
};

use crate::common::{assert_event_matches_draft, date};

#[test]
fn store_scenario_single_homework() {
    // Arrange
    let mut store = EventStore::with_clock(|| date(2024, 5, 6));
    let draft = EventDraft::new(date(2024, 5, 6), 1, "Algebra HW").with_kind(EventKind::Homework);

    // Act
    let id = store.add_event(draft.clone());

    // Assert
    assert_eq!(store.len(), 1);
    let anchor = EventAnchor::Date(date(2024, 5, 6));
    let found = filter_events(store.events(), &anchor, 1);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);
    assert_event_matches_draft(found[0], &draft);
    assert!(filter_events(store.events(), &anchor, 2).is_empty());
}

#[test]
fn store_add_then_remove_restores_prior_collection() {
    let mut store = EventStore::with_clock(|| date(2024, 5, 6));
    store.add_event(EventDraft::new(SchoolDay::Wednesday, 2, "Proofs"));
    store.add_event(EventDraft::new(date(2024, 5, 9), 5, "Essay"));
    let before = store.events().to_vec();

    let id = store.add_event(EventDraft::new(date(2024, 5, 10), 3, "Worksheet"));
    store.remove_event(&id);

    assert_eq!(store.events(), before.as_slice());
}

#[test]
fn store_unknown_id_leaves_collection_unchanged() {
    let mut store = EventStore::with_clock(|| date(2024, 5, 6));
    store.add_event(EventDraft::new(date(2024, 5, 6), 1, "Algebra HW"));
    let before = store.events().to_vec();
    let unknown = EventId::new_v4();

    assert!(store.remove_event(&unknown).is_none());
    let patch = EventPatch {
        class_number: Some(4),
        ..Default::default()
    };
    assert!(store.update_event(&unknown, &patch).is_none());

    assert_eq!(store.events(), before.as_slice());
}

#[test]
fn weekend_maps_to_monday() {
    assert_eq!(get_day_of_week(date(2024, 5, 11)), SchoolDay::Monday);
    assert_eq!(get_day_of_week(date(2024, 5, 12)), SchoolDay::Monday);
    assert_eq!(get_day_of_week(date(2024, 5, 8)), SchoolDay::Wednesday);
}

#[test]
fn sort_same_date_by_class_number() {
    let mut store = EventStore::with_clock(|| date(2024, 5, 6));
    for class_number in [3, 1, 2] {
        store.add_event(EventDraft::new(date(2024, 5, 7), class_number, "HW"));
    }

    let mut events: Vec<_> = store.events().iter().collect();
    sort_events(&mut events, store.week_start());

    let order: Vec<u32> = events.iter().map(|e| e.class_number).collect();
    assert_eq!(order, [1, 2, 3]);
}

#[test]
fn default_schedule_fits_class_times() {
    let schedule = ScheduleTable::default();
    let class_times = ClassTimes::default();
    for day in SchoolDay::ALL {
        let slots = schedule.slot_count(day);
        assert!((7..=8).contains(&slots), "{day} has {slots} slots");
        assert!(slots <= class_times.len());
        for class_number in 1..=slots as u32 {
            assert!(class_times.get(class_number).is_some());
        }
    }
}
