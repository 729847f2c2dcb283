// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;

use crate::datetime::WeekCursor;
use crate::{Event, EventAnchor, EventKind};

/// Events anchored exactly at `anchor` in the given class slot.
pub fn filter_events<'a>(
    events: &'a [Event],
    anchor: &EventAnchor,
    class_number: u32,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| e.class_number == class_number && e.anchor == *anchor)
        .collect()
}

/// Events shown in the grid cell of `date` and `class_number`.
///
/// Includes events dated that day and weekly events of that school day.
pub fn events_on(events: &[Event], date: NaiveDate, class_number: u32) -> Vec<&Event> {
    events
        .iter()
        .filter(|e| e.class_number == class_number && e.anchor.occurs_on(date))
        .collect()
}

/// Sorts events for list display, by date then class slot.
///
/// Weekly events are placed on their day of the week starting at `week_start`.
/// The sort is stable, equal keys keep insertion order.
pub fn sort_events(events: &mut [&Event], week_start: NaiveDate) {
    events.sort_by_key(|e| (e.anchor.resolve(week_start), e.class_number));
}

/// Conditions for listing events.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventConditions {
    /// Only events shown in the week containing this date.
    pub week: Option<NaiveDate>,

    /// Only events of this kind.
    pub kind: Option<EventKind>,
}

impl EventConditions {
    /// Whether the event satisfies every condition.
    pub fn matches(&self, event: &Event) -> bool {
        let in_week = match (self.week, event.anchor) {
            (None, _) => true,
            (Some(date), EventAnchor::Date(d)) => WeekCursor::at(date).contains(d),
            (Some(_), EventAnchor::Weekday(_)) => true,
        };
        let of_kind = self.kind.is_none_or(|k| k == event.kind);
        in_week && of_kind
    }
}
