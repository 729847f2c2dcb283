// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the school timetable: the weekly schedule, homework and quiz
//! events, and the observable store that holds them for a session.

mod config;
mod datetime;
mod error;
mod event;
mod query;
mod schedule;
mod short_id;
mod store;
mod timetable;

pub use crate::config::{APP_NAME, Config};
pub use crate::datetime::{
    WeekCursor, get_date_for_day, get_day_of_week, is_weekend, local_today, monday_of,
};
pub use crate::error::TimetableError;
pub use crate::event::{Event, EventAnchor, EventDraft, EventId, EventKind, EventPatch};
pub use crate::query::{EventConditions, events_on, filter_events, sort_events};
pub use crate::schedule::{ClassTime, ClassTimes, ScheduleTable, SchoolDay};
pub use crate::short_id::{EventWithShortId, Id, ShortIds};
pub use crate::store::{Change, EventStore, Snapshot, SubscriptionId};
pub use crate::timetable::Timetable;
