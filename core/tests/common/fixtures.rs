// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::{cell::RefCell, rc::Rc};

use chrono::NaiveDate;
use timetable_core::{Change, Config, EventDraft, EventKind, Timetable};

/// Shorthand for a calendar date.
///
/// # Panics
///
/// Panics if the date does not exist.
#[must_use]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Creates a configuration with built-in tables and the given default kind.
#[must_use]
pub fn test_config(default_kind: EventKind) -> Config {
    Config {
        default_kind,
        ..Config::default()
    }
}

/// Creates a homework draft on 2024-05-06 (a Monday), first class.
///
/// # Example
///
/// ```ignore
/// let draft = test_event_draft("Algebra HW");
/// ```
#[must_use]
pub fn test_event_draft(name: &str) -> EventDraft {
    EventDraft::new(date(2024, 5, 6), 1, name)
}

/// Creates a timetable with the default configuration whose clock is fixed at `today`.
///
/// # Panics
///
/// Panics if the default configuration is rejected.
#[must_use]
pub fn timetable_on(today: NaiveDate) -> Timetable {
    Timetable::with_clock(Config::default(), move || today).expect("default config is valid")
}

/// Subscribes a listener that records every change and the event count after it.
pub fn listener_log(timetable: &mut Timetable) -> Rc<RefCell<Vec<(Change, usize)>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    timetable.subscribe(move |change, snapshot| {
        sink.borrow_mut()
            .push((change.clone(), snapshot.events.len()));
    });
    log
}
