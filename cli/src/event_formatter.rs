// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use chrono::NaiveDate;
use colored::Colorize;
use timetable_core::{Event, EventAnchor, EventKind, EventWithShortId, Timetable};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{OutputFormat, format_date};

/// One line of the homework list, an event with what the schedule says about its slot.
#[derive(Debug)]
pub struct EventRow<'a> {
    event: &'a EventWithShortId<&'a Event>,
    date: NaiveDate,
    today: bool,
    time: Option<String>,
    subject: Option<&'a str>,
}

impl<'a> EventRow<'a> {
    pub fn new(timetable: &'a Timetable, event: &'a EventWithShortId<&'a Event>) -> Self {
        let date = event.anchor.resolve(timetable.week_start());
        Self {
            event,
            date,
            today: date == timetable.today(),
            time: timetable.class_time_of(event).map(ToString::to_string),
            subject: timetable.subject_of(event),
        }
    }
}

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(columns: Vec<EventColumn>) -> Self {
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, rows: &'a [EventRow<'a>]) -> Display<'a> {
        Display {
            rows,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    rows: &'a [EventRow<'a>],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), &self.formatter.columns, self.rows)
            ),
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), &self.formatter.columns, self.rows)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColumn {
    ShortId,
    Date,
    Time,
    Subject,
    Kind,
    Name,
    Uid,
}

impl EventColumn {
    /// Columns of the homework list, with the full id when verbose.
    pub fn list(verbose: bool) -> Vec<Self> {
        use EventColumn::*;
        if verbose {
            vec![ShortId, Uid, Date, Time, Subject, Kind, Name]
        } else {
            vec![ShortId, Date, Time, Subject, Kind, Name]
        }
    }
}

impl<'r> TableColumn<EventRow<'r>> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::ShortId => "Display Number",
            EventColumn::Date => "Date",
            EventColumn::Time => "Time",
            EventColumn::Subject => "Subject",
            EventColumn::Kind => "Kind",
            EventColumn::Name => "Name",
            EventColumn::Uid => "UID",
        }
        .into()
    }

    fn format<'a>(&self, row: &'a EventRow<'r>) -> Cow<'a, str> {
        match self {
            EventColumn::ShortId => row.event.short_id.to_string().into(),
            EventColumn::Date => format_anchor(row).into(),
            EventColumn::Time => row.time.as_deref().unwrap_or("").into(),
            EventColumn::Subject => row.subject.unwrap_or("?").into(),
            EventColumn::Kind => AsRef::<str>::as_ref(&row.event.kind).into(),
            EventColumn::Name => row.event.name.as_str().into(),
            EventColumn::Uid => format!("#{}", row.event.id).into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::ShortId => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn stylize(&self, row: &EventRow<'r>, cell: String) -> String {
        match self {
            EventColumn::Date if row.today => cell.green().bold().to_string(),
            EventColumn::Kind => match row.event.kind {
                EventKind::Homework => cell.blue().to_string(),
                EventKind::Quiz => cell.red().to_string(),
            },
            EventColumn::Uid => cell.dimmed().to_string(),
            _ => cell,
        }
    }
}

fn format_anchor(row: &EventRow<'_>) -> String {
    let date = match row.event.anchor {
        EventAnchor::Date(date) => format_date(date),
        EventAnchor::Weekday(_) => format!("Every {}", row.date.format("%a")),
    };
    if row.today {
        format!("{date} (Today)")
    } else {
        date
    }
}
