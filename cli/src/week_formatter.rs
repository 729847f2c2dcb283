// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt, num::NonZeroU32};

use chrono::NaiveDate;
use colored::{Color, Colorize};
use timetable_core::{EventKind, SchoolDay, Timetable};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{OutputFormat, format_day_header};

/// The week grid: one row per class slot, one column per school day.
#[derive(Debug)]
pub struct WeekFormatter<'a> {
    columns: Vec<WeekColumn<'a>>,
    rows: Vec<WeekRow<'a>>,
    format: OutputFormat,
}

impl<'a> WeekFormatter<'a> {
    pub fn new(timetable: &'a Timetable) -> Self {
        let today = timetable.today();
        let mut columns = vec![WeekColumn::Class, WeekColumn::Time];
        columns.extend(SchoolDay::ALL.into_iter().map(|day| {
            let date = timetable.date_of(day);
            WeekColumn::Day {
                day,
                header: format_day_header(date),
                today: date == today,
                colors: timetable,
            }
        }));

        let max_slots = u32::try_from(timetable.schedule().max_slots()).unwrap_or(u32::MAX);
        let rows = (1..=max_slots)
            .map(|class_number| WeekRow::new(timetable, class_number))
            .collect();

        Self {
            columns,
            rows,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

impl fmt::Display for WeekFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), &self.columns, &self.rows)
            ),
            OutputFormat::Table => {
                let style = TableStyleBasic::new().with_header().with_separator(" | ");
                write!(f, "{}", Table::new(style, &self.columns, &self.rows))
            }
        }
    }
}

#[derive(Debug)]
pub struct WeekRow<'a> {
    class_number: u32,
    time: String,
    cells: [WeekCell<'a>; 5],
}

impl<'a> WeekRow<'a> {
    fn new(timetable: &'a Timetable, class_number: u32) -> Self {
        let time = timetable
            .class_times()
            .get(class_number)
            .map(ToString::to_string)
            .unwrap_or_default();

        let cells = SchoolDay::ALL.map(|day| {
            let events = timetable
                .events_at(timetable.date_of(day), class_number)
                .iter()
                .map(|e| (e.short_id, e.kind))
                .collect();
            WeekCell {
                subject: timetable.schedule().subject(day, class_number),
                events,
            }
        });

        Self {
            class_number,
            time,
            cells,
        }
    }
}

#[derive(Debug)]
struct WeekCell<'a> {
    subject: Option<&'a str>,
    events: Vec<(NonZeroU32, EventKind)>,
}

impl WeekCell<'_> {
    fn subject(&self) -> &str {
        self.subject.unwrap_or("")
    }

    /// Event markers, `*N` for homework and `!N` for a quiz, N the display number.
    fn markers(&self) -> impl Iterator<Item = (String, EventKind)> + '_ {
        self.events.iter().map(|(short_id, kind)| {
            let marker = match kind {
                EventKind::Homework => format!("*{short_id}"),
                EventKind::Quiz => format!("!{short_id}"),
            };
            (marker, *kind)
        })
    }

    fn text(&self) -> String {
        let mut text = self.subject().to_string();
        for (marker, _) in self.markers() {
            text.push(' ');
            text.push_str(&marker);
        }
        text
    }
}

#[derive(Debug)]
pub enum WeekColumn<'a> {
    Class,
    Time,
    Day {
        day: SchoolDay,
        header: String,
        today: bool,
        colors: &'a Timetable,
    },
}

impl<'r> TableColumn<WeekRow<'r>> for WeekColumn<'_> {
    fn name(&self) -> Cow<'_, str> {
        match self {
            WeekColumn::Class => "Class".into(),
            WeekColumn::Time => "Time".into(),
            WeekColumn::Day { header, .. } => header.as_str().into(),
        }
    }

    fn format<'a>(&self, row: &'a WeekRow<'r>) -> Cow<'a, str> {
        match self {
            WeekColumn::Class => row.class_number.to_string().into(),
            WeekColumn::Time => row.time.as_str().into(),
            WeekColumn::Day { day, .. } => row.cells[day.index()].text().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            WeekColumn::Class => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn stylize(&self, row: &WeekRow<'r>, cell: String) -> String {
        let WeekColumn::Day {
            day, today, colors, ..
        } = self
        else {
            return cell;
        };

        let data = &row.cells[day.index()];
        let fill = " ".repeat(cell.len().saturating_sub(data.text().len()));

        let subject = data.subject();
        let mut styled = match colors.config().color_of(subject).map(str::parse::<Color>) {
            Some(Ok(color)) => subject.color(color),
            _ => subject.normal(),
        };
        if *today {
            styled = styled.bold();
        }

        let mut out = styled.to_string();
        for (marker, kind) in data.markers() {
            out.push(' ');
            let marker = match kind {
                EventKind::Homework => marker.blue(),
                EventKind::Quiz => marker.red(),
            };
            out.push_str(&marker.to_string());
        }
        out.push_str(&fill);
        out
    }

    fn stylize_header(&self, name: String) -> String {
        match self {
            WeekColumn::Day { today: true, .. } => name.green().bold().to_string(),
            _ => name.bold().to_string(),
        }
    }
}

/// Dates of the school days in the displayed week, for headings.
pub fn week_range(timetable: &Timetable) -> (NaiveDate, NaiveDate) {
    let week = timetable.week();
    (week.week_start(), week.week_end())
}
