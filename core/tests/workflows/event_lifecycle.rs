// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end event lifecycle workflow tests.
//!
//! Events are created, looked up by display number, modified and removed
//! through the timetable, with a listener watching the store.

use timetable_core::{
    Change, EventAnchor, EventConditions, EventDraft, EventKind, EventPatch, Id, SchoolDay,
    TimetableError,
};

use crate::common::{assert_names, date, listener_log, test_event_draft, timetable_on};

#[test]
fn event_lifecycle_create_flow() {
    // Arrange
    let mut timetable = timetable_on(date(2024, 5, 6));
    let log = listener_log(&mut timetable);

    // Act
    let event = timetable
        .new_event(test_event_draft("Algebra HW"))
        .unwrap()
        .expect("event should be created");

    // Assert - verify event created
    assert_eq!(event.name, "Algebra HW");
    assert_eq!(event.short_id.get(), 1);
    assert_eq!(*log.borrow(), vec![(Change::Added(event.id), 1)]);

    // Assert - verify lookups by uid and display number
    let by_uid = timetable.get_event(&Id::Uid(event.id)).unwrap();
    assert_eq!(by_uid.short_id, event.short_id);
    let by_short_id = timetable
        .get_event(&Id::ShortIdOrUid("1".to_string()))
        .unwrap();
    assert_eq!(by_short_id.id, event.id);
}

#[test]
fn event_lifecycle_update_flow() {
    // Arrange
    let mut timetable = timetable_on(date(2024, 5, 6));
    let event = timetable
        .new_event(test_event_draft("Algebra HW"))
        .unwrap()
        .unwrap();
    let log = listener_log(&mut timetable);
    let id = Id::from(event.short_id);

    // Act
    let patch = EventPatch {
        name: Some("Algebra quiz".to_string()),
        kind: Some(EventKind::Quiz),
        anchor: Some(EventAnchor::Date(date(2024, 5, 8))),
        ..Default::default()
    };
    let updated = timetable.update_event(&id, patch).unwrap();

    // Assert
    assert_eq!(updated.id, event.id);
    assert_eq!(updated.name, "Algebra quiz");
    assert_eq!(updated.kind, EventKind::Quiz);
    assert_eq!(updated.school_day(), SchoolDay::Wednesday);
    assert_eq!(timetable.subject_of(&updated), Some("Math"));

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert!(matches!(&log[0].0, Change::Updated { before, .. } if before.name == "Algebra HW"));
}

#[test]
fn event_lifecycle_delete_flow() {
    // Arrange
    let mut timetable = timetable_on(date(2024, 5, 6));
    let first = timetable
        .new_event(test_event_draft("Algebra HW"))
        .unwrap()
        .unwrap();
    let second = timetable
        .new_event(EventDraft::new(date(2024, 5, 7), 3, "Essay"))
        .unwrap()
        .unwrap();
    let log = listener_log(&mut timetable);

    // Act
    let removed = timetable.remove_event(&Id::from(first.short_id)).unwrap();

    // Assert
    assert_eq!(removed.id, first.id);
    assert_eq!(timetable.store().len(), 1);
    assert!(matches!(log.borrow()[0], (Change::Removed(_), 1)));

    // Display numbers of remaining events stay stable
    let still_there = timetable.get_event(&Id::from(second.short_id)).unwrap();
    assert_eq!(still_there.id, second.id);

    // Removing again reports the missing event without notifying
    let err = timetable
        .remove_event(&Id::from(first.short_id))
        .unwrap_err();
    assert!(matches!(err, TimetableError::EventNotFound(_)));
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn event_lifecycle_blank_name_never_reaches_store() {
    let mut timetable = timetable_on(date(2024, 5, 6));
    let log = listener_log(&mut timetable);

    for name in ["", "   ", "\t\n"] {
        let created = timetable.new_event(test_event_draft(name)).unwrap();
        assert!(created.is_none());
    }

    assert!(timetable.store().is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn event_lifecycle_homework_list() {
    let mut timetable = timetable_on(date(2024, 5, 6));
    let drafts = [
        EventDraft::new(date(2024, 5, 10), 2, "Laps"),
        EventDraft::new(date(2024, 5, 6), 5, "Vocabulary").with_kind(EventKind::Quiz),
        EventDraft::new(SchoolDay::Wednesday, 1, "Problem set"),
        EventDraft::new(date(2024, 5, 6), 2, "Reading"),
    ];
    for draft in drafts {
        timetable.new_event(draft).unwrap();
    }

    let all = timetable.list_events(&EventConditions::default());
    assert_names(&all, &["Reading", "Vocabulary", "Problem set", "Laps"]);

    let quizzes = timetable.list_events(&EventConditions {
        kind: Some(EventKind::Quiz),
        ..Default::default()
    });
    assert_names(&quizzes, &["Vocabulary"]);
}
