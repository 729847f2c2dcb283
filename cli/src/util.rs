// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use timetable_core::{
    EventAnchor, SchoolDay, TimetableError, get_date_for_day, get_day_of_week,
};
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}

/// A day given on the command line, either a calendar date or a school day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayArg {
    Date(NaiveDate),
    Day(SchoolDay),
}

impl DayArg {
    /// Parses `YYYY-MM-DD`, `today`, `tomorrow`, or a school day name.
    pub fn parse(text: &str, today: NaiveDate) -> Result<Self, TimetableError> {
        let trimmed = text.trim();
        match trimmed.to_lowercase().as_str() {
            "today" => return Ok(DayArg::Date(today)),
            "tomorrow" => {
                return today
                    .succ_opt()
                    .map(DayArg::Date)
                    .ok_or_else(|| TimetableError::DateOutOfRange(text.to_string()));
            }
            _ => {}
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(DayArg::Date(date))
        } else if let Ok(day) = trimmed.parse::<SchoolDay>() {
            Ok(DayArg::Day(day))
        } else {
            Err(TimetableError::InvalidDate(text.to_string()))
        }
    }

    /// The date of this day, school days taken in the week starting at `week_start`.
    pub fn date(self, week_start: NaiveDate) -> NaiveDate {
        match self {
            DayArg::Date(date) => date,
            DayArg::Day(day) => get_date_for_day(week_start, day),
        }
    }

    /// The event anchor for this day.
    ///
    /// Weekly anchors recur on the school day, other anchors sit on a date.
    pub fn anchor(self, week_start: NaiveDate, weekly: bool) -> EventAnchor {
        match (self, weekly) {
            (DayArg::Date(date), true) => EventAnchor::Weekday(get_day_of_week(date)),
            (DayArg::Day(day), true) => EventAnchor::Weekday(day),
            (day, false) => EventAnchor::Date(day.date(week_start)),
        }
    }
}

/// Formats a date for lists, like `Mon, May 6`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Formats a date for column headers, like `Mon 05/06`.
pub fn format_day_header(date: NaiveDate) -> String {
    date.format("%a %m/%d").to_string()
}

/// Pads `s` with spaces to the given display width, on the right or the left.
pub fn pad_to_width(s: &str, width: usize, align_right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(s.width()));
    if align_right {
        format!("{fill}{s}")
    } else {
        format!("{s}{fill}")
    }
}

/// Splits a command line into words.
///
/// Words are separated by whitespace. Single or double quotes group words,
/// a backslash escapes the next character outside single quotes.
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => word.push(c),
            (_, '\\') => match chars.next() {
                Some(next) => {
                    word.push(next);
                    in_word = true;
                }
                None => return Err("Trailing backslash".to_string()),
            },
            (Some(_), c) => word.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            (None, c) => {
                word.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("Unclosed quote: {q}"));
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}
