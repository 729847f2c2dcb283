// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Borrow, cell::RefCell, num::NonZeroU32, ops::Deref};

use bimap::BiBTreeMap;

use crate::{Event, EventId};

/// Identifier given by the user, either a display number or a full event id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Id {
    /// A full event id.
    Uid(EventId),

    /// A display number, or an event id in text form.
    ShortIdOrUid(String),
}

impl From<EventId> for Id {
    fn from(id: EventId) -> Self {
        Id::Uid(id)
    }
}

impl From<NonZeroU32> for Id {
    fn from(short_id: NonZeroU32) -> Self {
        Id::ShortIdOrUid(short_id.to_string())
    }
}

/// Mapping between event ids and the small display numbers (1, 2, 3, ...)
/// shown to the user.
///
/// If an event has no number yet, the next one is allocated. Numbers are not
/// reused within a session.
#[derive(Debug)]
pub struct ShortIds {
    inner: RefCell<Inner>,
}

#[derive(Debug)]
struct Inner {
    map: BiBTreeMap<EventId, NonZeroU32>,
    next: NonZeroU32,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            map: BiBTreeMap::new(),
            next: NonZeroU32::MIN,
        }
    }
}

impl ShortIds {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(Inner::default()),
        }
    }

    /// Get or allocate a display number for the given event id.
    pub fn get_or_assign(&self, id: &EventId) -> NonZeroU32 {
        if let Some(&short_id) = self.inner.borrow().map.get_by_left(id) {
            return short_id;
        }

        let mut inner = self.inner.borrow_mut();
        let short_id = inner.next;
        inner.next = inner.next.saturating_add(1);
        inner.map.insert(*id, short_id);
        tracing::trace!(%id, %short_id, "assigned display number");
        short_id
    }

    /// Resolves a user-given id to an event id.
    ///
    /// Returns `None` when the text is neither a known display number nor a valid event id.
    pub fn resolve(&self, id: &Id) -> Option<EventId> {
        match id {
            Id::Uid(uid) => Some(*uid),
            Id::ShortIdOrUid(text) => {
                if let Ok(short_id) = text.trim().parse::<NonZeroU32>() {
                    if let Some(uid) = self.inner.borrow().map.get_by_right(&short_id) {
                        return Some(*uid);
                    }
                }
                text.trim().parse().ok()
            }
        }
    }

    /// Forgets the display number of a removed event.
    pub fn remove(&self, id: &EventId) -> Option<NonZeroU32> {
        self.inner
            .borrow_mut()
            .map
            .remove_by_left(id)
            .map(|(_, short_id)| short_id)
    }

    /// Pairs an event with its display number, allocating one if needed.
    pub fn event<E: Borrow<Event>>(&self, event: E) -> EventWithShortId<E> {
        let short_id = self.get_or_assign(&event.borrow().id);
        EventWithShortId {
            inner: event,
            short_id,
        }
    }

    /// Pairs every event with its display number.
    pub fn events<E: Borrow<Event>>(
        &self,
        events: impl IntoIterator<Item = E>,
    ) -> Vec<EventWithShortId<E>> {
        events.into_iter().map(|e| self.event(e)).collect()
    }
}

impl Default for ShortIds {
    fn default() -> Self {
        Self::new()
    }
}

/// An event together with its display number.
#[derive(Debug, Clone)]
pub struct EventWithShortId<E: Borrow<Event>> {
    /// The event, owned or borrowed.
    pub inner: E,

    /// The display number.
    pub short_id: NonZeroU32,
}

impl<E: Borrow<Event>> Deref for EventWithShortId<E> {
    type Target = Event;

    fn deref(&self) -> &Event {
        self.inner.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_increasing_numbers() {
        let ids = ShortIds::new();
        let a = EventId::new_v4();
        let b = EventId::new_v4();
        assert_eq!(ids.get_or_assign(&a).get(), 1);
        assert_eq!(ids.get_or_assign(&b).get(), 2);
        assert_eq!(ids.get_or_assign(&a).get(), 1);
    }

    #[test]
    fn resolves_display_number_and_uid() {
        let ids = ShortIds::new();
        let a = EventId::new_v4();
        let short_id = ids.get_or_assign(&a);

        assert_eq!(ids.resolve(&Id::from(short_id)), Some(a));
        assert_eq!(ids.resolve(&Id::ShortIdOrUid(a.to_string())), Some(a));
        assert_eq!(ids.resolve(&Id::Uid(a)), Some(a));
        assert_eq!(ids.resolve(&Id::ShortIdOrUid("7".to_string())), None);
        assert_eq!(ids.resolve(&Id::ShortIdOrUid("nope".to_string())), None);
    }

    #[test]
    fn removed_numbers_are_not_reused() {
        let ids = ShortIds::new();
        let a = EventId::new_v4();
        let b = EventId::new_v4();
        let first = ids.get_or_assign(&a);

        assert_eq!(ids.remove(&a), Some(first));
        assert_eq!(ids.resolve(&Id::from(first)), None);
        assert_eq!(ids.get_or_assign(&b).get(), 2);
    }
}
