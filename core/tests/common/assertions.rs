// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use std::borrow::Borrow;

use timetable_core::{Event, EventDraft, EventWithShortId};

/// Asserts that an event carries every field of the draft.
///
/// # Panics
///
/// Panics if any field doesn't match the expected value.
pub fn assert_event_matches_draft(event: &Event, draft: &EventDraft) {
    assert_eq!(event.anchor, draft.anchor, "Anchor mismatch");
    assert_eq!(event.class_number, draft.class_number, "Class number mismatch");
    assert_eq!(event.name, draft.name, "Name mismatch");
    assert_eq!(event.kind, draft.kind, "Kind mismatch");
}

/// Asserts the names of the listed events, in order.
///
/// # Panics
///
/// Panics if the names differ.
pub fn assert_names<E: Borrow<Event>>(events: &[EventWithShortId<E>], expected: &[&str]) {
    let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, expected, "Event names mismatch");
}
