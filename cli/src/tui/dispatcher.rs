// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use timetable_core::{EventKind, SchoolDay};

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

/// Hands every action to the registered stores, in registration order.
pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatching");
        for sub in &self.subscribers {
            (sub.borrow_mut())(&action);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    UpdateEventName(String),
    UpdateEventDay(SchoolDay),
    UpdateEventClassNumber(Option<u32>),
    UpdateEventKind(EventKind),
    UpdateEventWeekly(bool),
    SubmitChanges,
}
