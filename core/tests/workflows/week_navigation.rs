// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Week navigation workflow tests.

use timetable_core::{Change, EventDraft, SchoolDay};

use crate::common::{date, listener_log, timetable_on};

#[test]
fn week_navigation_round_trip() {
    let mut timetable = timetable_on(date(2024, 5, 8));
    let start = timetable.week_start();

    timetable.next_week();
    timetable.previous_week();

    assert_eq!(timetable.week_start(), start);
}

#[test]
fn week_navigation_notifies_each_move() {
    let mut timetable = timetable_on(date(2024, 5, 8));
    let log = listener_log(&mut timetable);

    timetable.next_week();
    timetable.next_week();
    timetable.current_week();
    timetable.current_week();

    let log = log.borrow();
    let moves: Vec<_> = log
        .iter()
        .map(|(change, _)| match change {
            Change::WeekChanged { from, to } => (*from, *to),
            other => panic!("unexpected change: {other:?}"),
        })
        .collect();
    assert_eq!(
        moves,
        [
            (date(2024, 5, 6), date(2024, 5, 13)),
            (date(2024, 5, 13), date(2024, 5, 20)),
            (date(2024, 5, 20), date(2024, 5, 6)),
        ]
    );
}

#[test]
fn week_navigation_weekly_events_follow_displayed_week() {
    let mut timetable = timetable_on(date(2024, 5, 6));
    timetable
        .new_event(EventDraft::new(SchoolDay::Thursday, 4, "Timeline"))
        .unwrap();
    timetable
        .new_event(EventDraft::new(date(2024, 5, 9), 4, "Source analysis"))
        .unwrap();

    let thursday = timetable.date_of(SchoolDay::Thursday);
    assert_eq!(timetable.events_at(thursday, 4).len(), 2);

    timetable.next_week();
    let thursday = timetable.date_of(SchoolDay::Thursday);
    let cell = timetable.events_at(thursday, 4);
    assert_eq!(cell.len(), 1);
    assert_eq!(cell[0].name, "Timeline");
}

#[test]
fn week_navigation_weekend_shows_monday_events() {
    let timetable = timetable_on(date(2024, 5, 11));
    assert_eq!(timetable.week_start(), date(2024, 5, 6));
    assert_eq!(
        timetable.default_event_draft().anchor.school_day(),
        SchoolDay::Monday
    );
}
