// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc};

use chrono::NaiveDate;
use timetable_core::{
    Event, EventAnchor, EventDraft, EventKind, EventPatch, SchoolDay, WeekCursor,
    get_date_for_day,
};

use crate::tui::dispatcher::{Action, Dispatcher};

pub trait DraftStoreLike {
    fn draft(&self) -> &DraftStore;
}

/// Form state of one homework or quiz, plus which fields were touched.
#[derive(Debug)]
pub struct DraftStore {
    pub data: DraftData,
    pub dirty: DraftMarker,

    /// Where the event sits before editing.
    anchor: EventAnchor,

    /// Monday of the week a one-off event is placed in.
    week_start: NaiveDate,

    /// Whether the user submit the changes
    pub submit: bool,
}

impl DraftStore {
    /// Starts from a draft, placing weekly drafts in the week of `week_start`.
    pub fn new_by_draft(draft: EventDraft, week_start: NaiveDate) -> Self {
        Self::new(
            draft.anchor,
            week_start,
            DraftData {
                name: draft.name,
                day: draft.anchor.school_day(),
                class_number: Some(draft.class_number),
                kind: draft.kind,
                weekly: matches!(draft.anchor, EventAnchor::Weekday(_)),
            },
        )
    }

    /// Starts from an existing event, placing weekly events in the week of `week_start`.
    pub fn new_by_event(event: &Event, week_start: NaiveDate) -> Self {
        Self::new(
            event.anchor,
            week_start,
            DraftData {
                name: event.name.clone(),
                day: event.school_day(),
                class_number: Some(event.class_number),
                kind: event.kind,
                weekly: matches!(event.anchor, EventAnchor::Weekday(_)),
            },
        )
    }

    fn new(anchor: EventAnchor, week_start: NaiveDate, data: DraftData) -> Self {
        let week_start = match anchor {
            EventAnchor::Date(date) => WeekCursor::at(date).week_start(),
            EventAnchor::Weekday(_) => week_start,
        };
        Self {
            data,
            dirty: DraftMarker::default(),
            anchor,
            week_start,
            submit: false,
        }
    }

    /// The anchor chosen in the form, the original one while day and repeat are untouched.
    pub fn anchor(&self) -> EventAnchor {
        if !self.dirty.day && !self.dirty.weekly {
            return self.anchor;
        }

        match self.data.weekly {
            true => EventAnchor::Weekday(self.data.day),
            false => EventAnchor::Date(get_date_for_day(self.week_start, self.data.day)),
        }
    }

    pub fn submit_draft(self) -> Result<EventDraft, Box<dyn Error>> {
        let anchor = self.anchor();
        let class_number = self.data.class_number.ok_or("Class number is required")?;
        Ok(EventDraft::new(anchor, class_number, self.data.name).with_kind(self.data.kind))
    }

    pub fn submit_patch(self) -> Result<EventPatch, Box<dyn Error>> {
        Ok(EventPatch {
            anchor: (self.dirty.day || self.dirty.weekly).then(|| self.anchor()),
            class_number: match self.dirty.class_number {
                true => Some(self.data.class_number.ok_or("Class number is required")?),
                false => None,
            },
            name: self.dirty.name.then(|| self.data.name.clone()),
            kind: self.dirty.kind.then_some(self.data.kind),
        })
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            match action {
                Action::UpdateEventName(v) => {
                    that.data.name = v.clone();
                    that.dirty.name = true;
                }
                Action::UpdateEventDay(v) => {
                    that.data.day = *v;
                    that.dirty.day = true;
                }
                Action::UpdateEventClassNumber(v) => {
                    that.data.class_number = *v;
                    that.dirty.class_number = true;
                }
                Action::UpdateEventKind(v) => {
                    that.data.kind = *v;
                    that.dirty.kind = true;
                }
                Action::UpdateEventWeekly(v) => {
                    that.data.weekly = *v;
                    that.dirty.weekly = true;
                }
                Action::SubmitChanges => that.submit = true,
            }
        }));
        dispatcher.register(callback);
    }
}

impl DraftStoreLike for DraftStore {
    fn draft(&self) -> &DraftStore {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftData {
    pub name: String,
    pub day: SchoolDay,
    pub class_number: Option<u32>,
    pub kind: EventKind,
    pub weekly: bool,
}

#[derive(Debug, Default)]
pub struct DraftMarker {
    name: bool,
    day: bool,
    class_number: bool,
    kind: bool,
    weekly: bool,
}
