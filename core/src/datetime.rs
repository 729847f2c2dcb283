// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

use crate::SchoolDay;

/// Maps a calendar date to its school day.
///
/// Saturday and Sunday show Monday's classes, so both map to [`SchoolDay::Monday`].
pub fn get_day_of_week(date: NaiveDate) -> SchoolDay {
    match date.weekday() {
        Weekday::Mon | Weekday::Sat | Weekday::Sun => SchoolDay::Monday,
        Weekday::Tue => SchoolDay::Tuesday,
        Weekday::Wed => SchoolDay::Wednesday,
        Weekday::Thu => SchoolDay::Thursday,
        Weekday::Fri => SchoolDay::Friday,
    }
}

/// The date of the given school day in the week starting at `week_start`.
///
/// Saturates at [`NaiveDate::MAX`] at the end of the calendar.
pub fn get_date_for_day(week_start: NaiveDate, day: SchoolDay) -> NaiveDate {
    week_start
        .checked_add_days(Days::new(day.index() as u64))
        .unwrap_or(NaiveDate::MAX)
}

/// The Monday of the week containing `date`.
///
/// Saturates at [`NaiveDate::MIN`] at the start of the calendar.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    checked_monday_of(date).unwrap_or(NaiveDate::MIN)
}

fn checked_monday_of(date: NaiveDate) -> Option<NaiveDate> {
    let offset = date.weekday().num_days_from_monday();
    date.checked_sub_days(Days::new(u64::from(offset)))
}

/// Moves `date` by a signed number of weeks, `None` past either end of the calendar.
fn shift_weeks(date: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    let days = Days::new(weeks.checked_mul(7)?.unsigned_abs());
    if weeks >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    }
}

/// Whether the date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Today in the local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The Monday marking the currently displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekCursor(NaiveDate);

impl WeekCursor {
    /// A cursor on the week containing `date`.
    ///
    /// Near the ends of the calendar the week saturates; use [`WeekCursor::try_at`]
    /// to reject such dates instead.
    pub fn at(date: NaiveDate) -> Self {
        Self(monday_of(date))
    }

    /// A cursor on the week containing `date`, if the whole school week
    /// from Monday to Friday is representable.
    pub fn try_at(date: NaiveDate) -> Option<Self> {
        let monday = checked_monday_of(date)?;
        monday.checked_add_days(Days::new(SchoolDay::Friday.index() as u64))?;
        Some(Self(monday))
    }

    /// A cursor on the present week.
    pub fn current() -> Self {
        Self::at(local_today())
    }

    /// The Monday this cursor points at.
    pub fn week_start(&self) -> NaiveDate {
        self.0
    }

    /// The Friday of the cursor's week.
    pub fn week_end(&self) -> NaiveDate {
        get_date_for_day(self.0, SchoolDay::Friday)
    }

    /// Whether the date is a day of the cursor's week, weekend included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        monday_of(date) == self.0
    }

    /// The cursor `weeks` weeks away, back when negative.
    pub fn shifted(self, weeks: i64) -> Option<Self> {
        shift_weeks(self.0, weeks).and_then(Self::try_at)
    }

    /// Moves one week forward, staying put at the end of the calendar.
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    /// Moves one week back, staying put at the start of the calendar.
    pub fn previous(&mut self) -> bool {
        self.step(-1)
    }

    fn step(&mut self, weeks: i64) -> bool {
        match self.shifted(weeks) {
            Some(cursor) => {
                *self = cursor;
                true
            }
            None => false,
        }
    }

    /// Moves to the week containing `today`.
    pub fn reset(&mut self, today: NaiveDate) {
        self.0 = monday_of(today);
    }
}

impl Default for WeekCursor {
    fn default() -> Self {
        Self::current()
    }
}
