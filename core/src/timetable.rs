// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;

use crate::datetime::{WeekCursor, get_date_for_day, is_weekend, local_today, monday_of};
use crate::query::{events_on, filter_events, sort_events};
use crate::{
    Change, ClassTime, ClassTimes, Config, Event, EventAnchor, EventConditions, EventDraft,
    EventId, EventPatch, EventStore, EventWithShortId, Id, ScheduleTable, SchoolDay, ShortIds,
    Snapshot, SubscriptionId, TimetableError,
};

/// Timetable application core.
///
/// Owns the schedule, the class times and the event store of one session, and
/// checks every event against the schedule before it reaches the store.
#[derive(Debug)]
pub struct Timetable {
    config: Config,
    schedule: ScheduleTable,
    class_times: ClassTimes,
    store: EventStore,
    short_ids: ShortIds,
}

impl Timetable {
    /// Creates a new timetable with the given configuration, on the present week.
    pub fn new(config: Config) -> Result<Self, TimetableError> {
        Self::with_clock(config, local_today)
    }

    /// Creates a new timetable reading "today" from the given clock.
    pub fn with_clock(
        mut config: Config,
        clock: impl Fn() -> NaiveDate + 'static,
    ) -> Result<Self, TimetableError> {
        config.normalize()?;
        let schedule = config.timetable.clone().unwrap_or_default();
        let class_times = config.class_times.clone().unwrap_or_default();
        Ok(Self {
            config,
            schedule,
            class_times,
            store: EventStore::with_clock(clock),
            short_ids: ShortIds::new(),
        })
    }

    /// The normalized configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Today, according to the timetable's clock.
    pub fn today(&self) -> NaiveDate {
        self.store.today()
    }

    /// The Monday of the displayed week.
    pub fn week_start(&self) -> NaiveDate {
        self.store.week_start()
    }

    /// The displayed week.
    pub fn week(&self) -> WeekCursor {
        self.store.cursor()
    }

    /// The subject table.
    pub fn schedule(&self) -> &ScheduleTable {
        &self.schedule
    }

    /// The class times.
    pub fn class_times(&self) -> &ClassTimes {
        &self.class_times
    }

    /// The underlying event store.
    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Registers a listener called after every change of the store.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&Change, Snapshot<'_>) + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    /// Removes a listener, returning whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// The date of the given school day in the displayed week.
    pub fn date_of(&self, day: SchoolDay) -> NaiveDate {
        get_date_for_day(self.week_start(), day)
    }

    /// Create a default event draft: the first class of today, or of next
    /// Monday on weekends.
    pub fn default_event_draft(&self) -> EventDraft {
        let today = self.today();
        let date = match WeekCursor::at(today).shifted(1) {
            Some(next) if is_weekend(today) => next.week_start(),
            _ => today,
        };
        EventDraft::new(date, 1, String::new()).with_kind(self.config.default_kind)
    }

    /// Add a new event from the given draft.
    ///
    /// Returns `Ok(None)` without touching the store when the name is blank.
    pub fn new_event(
        &mut self,
        mut draft: EventDraft,
    ) -> Result<Option<EventWithShortId<Event>>, TimetableError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            tracing::debug!(?draft, "skipping event with blank name");
            return Ok(None);
        }
        draft.name = name;
        self.check_slot(draft.anchor.school_day(), draft.class_number)?;

        let id = self.store.add_event(draft);
        let event = self.event_by_uid(&id)?.clone();
        Ok(Some(self.short_ids.event(event)))
    }

    /// Update an event, validating the result against the schedule.
    pub fn update_event(
        &mut self,
        id: &Id,
        mut patch: EventPatch,
    ) -> Result<EventWithShortId<Event>, TimetableError> {
        let uid = self.resolve(id)?;

        if let Some(name) = patch.name.take() {
            let name = name.trim();
            if name.is_empty() {
                return Err(TimetableError::EmptyName);
            }
            patch.name = Some(name.to_string());
        }

        let mut preview = self.event_by_uid(&uid)?.clone();
        patch.apply_to(&mut preview);
        self.check_slot(preview.school_day(), preview.class_number)?;

        let event = self
            .store
            .update_event(&uid, &patch)
            .ok_or_else(|| TimetableError::EventNotFound(id.clone()))?
            .clone();
        Ok(self.short_ids.event(event))
    }

    /// Remove an event, releasing its display number.
    pub fn remove_event(&mut self, id: &Id) -> Result<Event, TimetableError> {
        let uid = self.resolve(id)?;
        let event = self
            .store
            .remove_event(&uid)
            .ok_or_else(|| TimetableError::EventNotFound(id.clone()))?;
        self.short_ids.remove(&uid);
        Ok(event)
    }

    /// Get an event by its id or display number.
    pub fn get_event(&self, id: &Id) -> Result<EventWithShortId<&Event>, TimetableError> {
        let uid = self.resolve(id)?;
        let event = self.event_by_uid(&uid)?;
        Ok(self.short_ids.event(event))
    }

    /// List events matching the given conditions, by date then class slot.
    ///
    /// Weekly events are placed in the listed week, or the displayed one when
    /// no week is given.
    pub fn list_events(&self, conds: &EventConditions) -> Vec<EventWithShortId<&Event>> {
        let week_start = conds.week.map_or_else(|| self.week_start(), monday_of);
        let mut events: Vec<_> = self
            .store
            .events()
            .iter()
            .filter(|e| conds.matches(e))
            .collect();
        sort_events(&mut events, week_start);
        self.short_ids.events(events)
    }

    /// Events shown in the grid cell of the date and class slot.
    pub fn events_at(&self, date: NaiveDate, class_number: u32) -> Vec<EventWithShortId<&Event>> {
        self.short_ids
            .events(events_on(self.store.events(), date, class_number))
    }

    /// Events anchored exactly at the anchor, in the class slot.
    pub fn events_with_anchor(
        &self,
        anchor: &EventAnchor,
        class_number: u32,
    ) -> Vec<EventWithShortId<&Event>> {
        self.short_ids
            .events(filter_events(self.store.events(), anchor, class_number))
    }

    /// Shows the following week.
    pub fn next_week(&mut self) -> NaiveDate {
        self.store.go_to_next_week();
        self.week_start()
    }

    /// Shows the preceding week.
    pub fn previous_week(&mut self) -> NaiveDate {
        self.store.go_to_previous_week();
        self.week_start()
    }

    /// Shows the week `weeks` weeks away from the one containing `date`, in
    /// one step.
    ///
    /// Fails without moving when the target week falls outside the calendar.
    pub fn go_to_week(&mut self, date: NaiveDate, weeks: i64) -> Result<NaiveDate, TimetableError> {
        let cursor = WeekCursor::try_at(date)
            .and_then(|cursor| cursor.shifted(weeks))
            .ok_or_else(|| {
                let text = match weeks {
                    0 => date.to_string(),
                    n if n > 0 => format!("{date} + {n} weeks"),
                    n => format!("{date} - {} weeks", n.unsigned_abs()),
                };
                TimetableError::DateOutOfRange(text)
            })?;
        self.store.go_to_week(cursor);
        Ok(self.week_start())
    }

    /// Shows the week containing today.
    pub fn current_week(&mut self) -> NaiveDate {
        self.store.reset_to_current_week();
        self.week_start()
    }

    /// The subject taught in the event's class slot.
    pub fn subject_of(&self, event: &Event) -> Option<&str> {
        self.schedule.subject(event.school_day(), event.class_number)
    }

    /// The class time of the event's class slot.
    pub fn class_time_of(&self, event: &Event) -> Option<&ClassTime> {
        self.class_times.get(event.class_number)
    }

    fn resolve(&self, id: &Id) -> Result<EventId, TimetableError> {
        self.short_ids
            .resolve(id)
            .ok_or_else(|| TimetableError::EventNotFound(id.clone()))
    }

    fn event_by_uid(&self, uid: &EventId) -> Result<&Event, TimetableError> {
        self.store
            .get(uid)
            .ok_or_else(|| TimetableError::EventNotFound(Id::Uid(*uid)))
    }

    fn check_slot(&self, day: SchoolDay, class_number: u32) -> Result<(), TimetableError> {
        if self.schedule.has_slot(day, class_number) {
            Ok(())
        } else {
            Err(TimetableError::InvalidClassNumber {
                day,
                class_number,
                slots: self.schedule.slot_count(day),
            })
        }
    }
}
