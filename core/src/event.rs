// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::SchoolDay;
use crate::datetime::{get_date_for_day, get_day_of_week};

/// Unique identifier of an event, generated when the event is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Draws a new random identifier.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Where an event sits in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAnchor {
    /// A single calendar date.
    Date(NaiveDate),

    /// A school day, recurring every week.
    Weekday(SchoolDay),
}

impl EventAnchor {
    /// The school day whose schedule the event belongs to.
    pub fn school_day(&self) -> SchoolDay {
        match self {
            EventAnchor::Date(date) => get_day_of_week(*date),
            EventAnchor::Weekday(day) => *day,
        }
    }

    /// The date of the event in the week starting at `week_start`.
    ///
    /// Dated events keep their own date regardless of the week.
    pub fn resolve(&self, week_start: NaiveDate) -> NaiveDate {
        match self {
            EventAnchor::Date(date) => *date,
            EventAnchor::Weekday(day) => get_date_for_day(week_start, *day),
        }
    }

    /// Whether the event shows up on the given date.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match self {
            EventAnchor::Date(d) => *d == date,
            EventAnchor::Weekday(day) => get_day_of_week(date) == *day,
        }
    }
}

impl Display for EventAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAnchor::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            EventAnchor::Weekday(day) => write!(f, "every {day}"),
        }
    }
}

impl From<NaiveDate> for EventAnchor {
    fn from(date: NaiveDate) -> Self {
        EventAnchor::Date(date)
    }
}

impl From<SchoolDay> for EventAnchor {
    fn from(day: SchoolDay) -> Self {
        EventAnchor::Weekday(day)
    }
}

/// The kind of an event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EventKind {
    /// Homework due in the class.
    #[default]
    #[cfg_attr(feature = "clap", value(alias = "hw"))]
    Homework,

    /// A quiz held in the class.
    Quiz,
}

const KIND_HOMEWORK: &str = "homework";
const KIND_QUIZ: &str = "quiz";

impl AsRef<str> for EventKind {
    fn as_ref(&self) -> &str {
        match self {
            EventKind::Homework => KIND_HOMEWORK,
            EventKind::Quiz => KIND_QUIZ,
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for EventKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            KIND_HOMEWORK => Ok(EventKind::Homework),
            KIND_QUIZ => Ok(EventKind::Quiz),
            _ => Err(()),
        }
    }
}

/// A homework or quiz attached to one class slot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Event {
    /// Unique identifier.
    pub id: EventId,

    /// The date or school day of the event.
    pub anchor: EventAnchor,

    /// The 1-based class slot.
    pub class_number: u32,

    /// Free-text label.
    pub name: String,

    /// Homework or quiz.
    pub kind: EventKind,
}

impl Event {
    /// Builds an event from a draft and a freshly generated id.
    pub(crate) fn from_draft(id: EventId, draft: EventDraft) -> Self {
        Self {
            id,
            anchor: draft.anchor,
            class_number: draft.class_number,
            name: draft.name,
            kind: draft.kind,
        }
    }

    /// The school day whose schedule the event belongs to.
    pub fn school_day(&self) -> SchoolDay {
        self.anchor.school_day()
    }
}

/// An event that has not been added yet, everything but the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// The date or school day of the event.
    pub anchor: EventAnchor,

    /// The 1-based class slot.
    pub class_number: u32,

    /// Free-text label.
    pub name: String,

    /// Homework or quiz.
    pub kind: EventKind,
}

impl EventDraft {
    /// A draft for the given slot.
    pub fn new(anchor: impl Into<EventAnchor>, class_number: u32, name: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            class_number,
            name: name.into(),
            kind: EventKind::default(),
        }
    }

    /// Sets the kind of the draft.
    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Partial update of an event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventPatch {
    /// New anchor, if changed.
    pub anchor: Option<EventAnchor>,

    /// New class slot, if changed.
    pub class_number: Option<u32>,

    /// New label, if changed.
    pub name: Option<String>,

    /// New kind, if changed.
    pub kind: Option<EventKind>,
}

impl EventPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.anchor.is_none()
            && self.class_number.is_none()
            && self.name.is_none()
            && self.kind.is_none()
    }

    /// Applies the patch to an event, modifying it in place.
    pub fn apply_to<'a>(&self, e: &'a mut Event) -> &'a mut Event {
        if let Some(anchor) = self.anchor {
            e.anchor = anchor;
        }

        if let Some(class_number) = self.class_number {
            e.class_number = class_number;
        }

        if let Some(name) = &self.name {
            e.name.clone_from(name);
        }

        if let Some(kind) = self.kind {
            e.kind = kind;
        }

        e
    }
}
