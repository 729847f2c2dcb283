// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use timetable_core::{EventKind, SchoolDay};

use crate::tui::component_form::{Access, Form, FormItem, Input, PositiveIntegerAccess, RadioGroup};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::draft_store::DraftStoreLike;

pub type EventForm<S> = Form<S, Box<dyn FormItem<S>>>;

pub fn new_event_editor<S: DraftStoreLike + 'static>(
    title: impl ToString,
) -> SinglePage<S, EventForm<S>> {
    SinglePage::new(title, new_event_form())
}

/// Name first, then the class slot, the kind and the repetition.
pub fn new_event_form<S: DraftStoreLike + 'static>() -> EventForm<S> {
    let items: Vec<Box<dyn FormItem<S>>> = vec![
        Box::new(new_name()),
        Box::new(new_day()),
        Box::new(new_class_number()),
        Box::new(new_kind()),
        Box::new(new_weekly()),
    ];
    Form::new(items)
}

fn new_name<S: DraftStoreLike>() -> Input<S, NameAccess> {
    Input::new("Name")
}

struct NameAccess;

impl<S: DraftStoreLike> Access<S, String> for NameAccess {
    fn get(store: &RefCell<S>) -> String {
        store.borrow().draft().data.name.clone()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::UpdateEventName(value));
        true
    }
}

fn new_day<S: DraftStoreLike>() -> RadioGroup<S, SchoolDay, DayAccess> {
    let values = SchoolDay::ALL.to_vec();
    let options = values.iter().map(|d| d.abbr().to_string()).collect();
    RadioGroup::new("Day", values, options)
}

struct DayAccess;

impl<S: DraftStoreLike> Access<S, SchoolDay> for DayAccess {
    fn get(store: &RefCell<S>) -> SchoolDay {
        store.borrow().draft().data.day
    }

    fn set(dispatcher: &mut Dispatcher, value: SchoolDay) -> bool {
        dispatcher.dispatch(Action::UpdateEventDay(value));
        true
    }
}

fn new_class_number<S: DraftStoreLike>()
-> Input<S, PositiveIntegerAccess<S, u32, ClassNumberAccess>> {
    Input::new("Class")
}

struct ClassNumberAccess;

impl<S: DraftStoreLike> Access<S, Option<u32>> for ClassNumberAccess {
    fn get(store: &RefCell<S>) -> Option<u32> {
        store.borrow().draft().data.class_number
    }

    fn set(dispatcher: &mut Dispatcher, value: Option<u32>) -> bool {
        dispatcher.dispatch(Action::UpdateEventClassNumber(value));
        true
    }
}

fn new_kind<S: DraftStoreLike>() -> RadioGroup<S, EventKind, KindAccess> {
    let values = vec![EventKind::Homework, EventKind::Quiz];
    let options = vec!["Homework".to_string(), "Quiz".to_string()];
    RadioGroup::new("Type", values, options)
}

struct KindAccess;

impl<S: DraftStoreLike> Access<S, EventKind> for KindAccess {
    fn get(store: &RefCell<S>) -> EventKind {
        store.borrow().draft().data.kind
    }

    fn set(dispatcher: &mut Dispatcher, value: EventKind) -> bool {
        dispatcher.dispatch(Action::UpdateEventKind(value));
        true
    }
}

fn new_weekly<S: DraftStoreLike>() -> RadioGroup<S, bool, WeeklyAccess> {
    let values = vec![false, true];
    let options = vec!["This week".to_string(), "Every week".to_string()];
    RadioGroup::new("Repeat", values, options)
}

struct WeeklyAccess;

impl<S: DraftStoreLike> Access<S, bool> for WeeklyAccess {
    fn get(store: &RefCell<S>) -> bool {
        store.borrow().draft().data.weekly
    }

    fn set(dispatcher: &mut Dispatcher, value: bool) -> bool {
        dispatcher.dispatch(Action::UpdateEventWeekly(value));
        true
    }
}
