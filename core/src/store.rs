// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::NaiveDate;

use crate::datetime::{WeekCursor, local_today};
use crate::{Event, EventDraft, EventId, EventPatch};

type Listener = Box<dyn FnMut(&Change, Snapshot<'_>)>;
type Clock = Box<dyn Fn() -> NaiveDate>;

/// What a mutation of the [`EventStore`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// An event was appended.
    Added(EventId),

    /// An event was removed, carrying the removed event.
    Removed(Event),

    /// An event was modified in place, carrying its previous value.
    Updated {
        /// The id of the modified event.
        id: EventId,
        /// The event before the update.
        before: Event,
    },

    /// The displayed week moved.
    WeekChanged {
        /// Previous week start.
        from: NaiveDate,
        /// New week start.
        to: NaiveDate,
    },
}

/// Read-only view of the store state handed to listeners.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// All events in insertion order.
    pub events: &'a [Event],

    /// The Monday of the displayed week.
    pub week_start: NaiveDate,
}

/// Handle returned by [`EventStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// In-memory, observable collection of events plus the displayed week.
///
/// Every mutation that changes the state calls the subscribed listeners
/// synchronously, in subscription order, before returning. Mutations that
/// leave the state as it was do not notify: removing or updating an unknown
/// id, an update whose patch matches the event, and moving to the week
/// already displayed (including [`EventStore::reset_to_current_week`] on the
/// present week and navigation stopped at the end of the calendar).
pub struct EventStore {
    events: Vec<Event>,
    cursor: WeekCursor,
    clock: Clock,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl EventStore {
    /// Creates an empty store on the present week of the local clock.
    pub fn new() -> Self {
        Self::with_clock(local_today)
    }

    /// Creates an empty store reading "today" from the given clock.
    pub fn with_clock(clock: impl Fn() -> NaiveDate + 'static) -> Self {
        let cursor = WeekCursor::at(clock());
        Self {
            events: Vec::new(),
            cursor,
            clock: Box::new(clock),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Finds an event by id.
    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == *id)
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store holds no event.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The Monday of the displayed week.
    pub fn week_start(&self) -> NaiveDate {
        self.cursor.week_start()
    }

    /// The displayed week.
    pub fn cursor(&self) -> WeekCursor {
        self.cursor
    }

    /// Today, according to the store's clock.
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// A read-only view of the current state.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            events: &self.events,
            week_start: self.cursor.week_start(),
        }
    }

    /// Registers a listener called after every change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&Change, Snapshot<'_>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        tracing::trace!(?id, "listener subscribed");
        id
    }

    /// Removes a listener, returning whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        before != self.listeners.len()
    }

    /// Appends a new event built from the draft, returning its fresh id.
    ///
    /// The draft is stored as given: slot bounds are the caller's concern.
    pub fn add_event(&mut self, draft: EventDraft) -> EventId {
        let id = self.generate_id();
        tracing::debug!(%id, anchor = %draft.anchor, class_number = draft.class_number, "adding event");
        self.events.push(Event::from_draft(id, draft));
        self.notify(Change::Added(id));
        id
    }

    /// Removes the event with the given id, a no-op if there is none.
    pub fn remove_event(&mut self, id: &EventId) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == *id)?;
        let removed = self.events.remove(index);
        tracing::debug!(%id, "removed event");
        self.notify(Change::Removed(removed.clone()));
        Some(removed)
    }

    /// Merges the patch into the event with the given id, a no-op if there is none.
    pub fn update_event(&mut self, id: &EventId, patch: &EventPatch) -> Option<&Event> {
        let index = self.events.iter().position(|e| e.id == *id)?;
        let before = self.events[index].clone();
        patch.apply_to(&mut self.events[index]);
        if self.events[index] != before {
            tracing::debug!(%id, ?patch, "updated event");
            self.notify(Change::Updated { id: *id, before });
        }
        self.events.get(index)
    }

    /// Shows the following week.
    pub fn go_to_next_week(&mut self) {
        let from = self.cursor.week_start();
        self.cursor.next();
        self.week_changed(from);
    }

    /// Shows the preceding week.
    pub fn go_to_previous_week(&mut self) {
        let from = self.cursor.week_start();
        self.cursor.previous();
        self.week_changed(from);
    }

    /// Shows the given week.
    pub fn go_to_week(&mut self, cursor: WeekCursor) {
        let from = self.cursor.week_start();
        self.cursor = cursor;
        self.week_changed(from);
    }

    /// Shows the week containing today, as read from the clock right now.
    pub fn reset_to_current_week(&mut self) {
        let from = self.cursor.week_start();
        self.cursor.reset((self.clock)());
        self.week_changed(from);
    }

    fn week_changed(&mut self, from: NaiveDate) {
        let to = self.cursor.week_start();
        if from != to {
            tracing::debug!(%from, %to, "week changed");
            self.notify(Change::WeekChanged { from, to });
        }
    }

    fn generate_id(&self) -> EventId {
        loop {
            let id = EventId::new_v4();
            if self.get(&id).is_none() {
                return id;
            }
            tracing::warn!(%id, "event id collision, drawing again");
        }
    }

    fn notify(&mut self, change: Change) {
        let mut listeners = std::mem::take(&mut self.listeners);
        let snapshot = self.snapshot();
        for (_, listener) in &mut listeners {
            listener(&change, snapshot);
        }
        self.listeners = listeners;
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStore")
            .field("events", &self.events)
            .field("cursor", &self.cursor)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
