// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::{Id, SchoolDay};

/// Errors reported by the timetable core.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimetableError {
    /// The class slot does not exist on the day.
    InvalidClassNumber {
        /// The school day the event belongs to.
        day: SchoolDay,
        /// The requested 1-based slot.
        class_number: u32,
        /// Number of slots on that day.
        slots: usize,
    },

    /// The event name is empty after trimming.
    EmptyName,

    /// No event matches the given id.
    EventNotFound(Id),

    /// The configuration is inconsistent.
    InvalidConfig(String),

    /// The text is neither a date nor a school day.
    InvalidDate(String),

    /// The requested week lies outside the supported calendar.
    DateOutOfRange(String),
}

impl fmt::Display for TimetableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidClassNumber {
                day,
                class_number,
                slots,
            } => write!(
                f,
                "Class {class_number} does not exist on {day}, expected 1 to {slots}"
            ),
            Self::EmptyName => write!(f, "Event name must not be empty"),
            Self::EventNotFound(Id::Uid(uid)) => write!(f, "Event not found: {uid}"),
            Self::EventNotFound(Id::ShortIdOrUid(id)) => write!(f, "Event not found: {id}"),
            Self::InvalidConfig(e) => write!(f, "Invalid configuration: {e}"),
            Self::InvalidDate(text) => write!(
                f,
                "Invalid date: {text}, expected YYYY-MM-DD, today, tomorrow or a school day"
            ),
            Self::DateOutOfRange(text) => write!(f, "Date out of range: {text}"),
        }
    }
}

impl std::error::Error for TimetableError {}
