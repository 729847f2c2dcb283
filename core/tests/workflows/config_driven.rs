// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven workflow tests.
//!
//! A custom schedule from configuration changes which slots accept events.

use timetable_core::{Config, EventDraft, EventKind, SchoolDay, Timetable, TimetableError};

use crate::common::{date, test_config, timetable_on};

const SMALL_SCHOOL: &str = r#"
default_kind = "quiz"

[timetable]
monday = ["Math", "Art"]
tuesday = ["Math"]
wednesday = ["Music", "Math"]
thursday = ["PE"]
friday = ["Math", "PE"]

[[class_times]]
start = "08:00"
end = "08:45"

[[class_times]]
start = "09:00"
end = "09:45"
"#;

#[test]
fn config_driven_custom_schedule() {
    let config: Config = toml::from_str(SMALL_SCHOOL).unwrap();
    let mut timetable = Timetable::with_clock(config, || date(2024, 5, 6)).unwrap();

    let event = timetable
        .new_event(EventDraft::new(SchoolDay::Monday, 2, "Sketchbook"))
        .unwrap()
        .unwrap();
    assert_eq!(timetable.subject_of(&event), Some("Art"));
    assert_eq!(
        timetable.class_time_of(&event).unwrap().to_string(),
        "09:00-09:45"
    );

    let err = timetable
        .new_event(EventDraft::new(SchoolDay::Tuesday, 2, "Nope"))
        .unwrap_err();
    assert_eq!(
        err,
        TimetableError::InvalidClassNumber {
            day: SchoolDay::Tuesday,
            class_number: 2,
            slots: 1,
        }
    );
}

#[test]
fn config_driven_default_kind() {
    let config: Config = toml::from_str(SMALL_SCHOOL).unwrap();
    let timetable = Timetable::with_clock(config, || date(2024, 5, 7)).unwrap();
    assert_eq!(timetable.default_event_draft().kind, EventKind::Quiz);

    let timetable = Timetable::with_clock(test_config(EventKind::Homework), || {
        date(2024, 5, 7)
    })
    .unwrap();
    assert_eq!(timetable.default_event_draft().kind, EventKind::Homework);
}

#[test]
fn config_driven_rejects_inconsistent_schedule() {
    let config: Config = toml::from_str(
        r#"
[[class_times]]
start = "08:00"
end = "08:45"
"#,
    )
    .unwrap();
    let err = Timetable::new(config).unwrap_err();
    assert!(matches!(err, TimetableError::InvalidConfig(_)));
}

#[test]
fn config_driven_builtin_schedule() {
    let timetable = timetable_on(date(2024, 5, 6));
    assert_eq!(
        timetable.schedule().subject(SchoolDay::Friday, 1),
        Some("PE")
    );
    assert_eq!(timetable.class_times().len(), 8);
}
