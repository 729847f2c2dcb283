// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, error::Error, io};

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use timetable_core::{SchoolDay, Timetable};

use crate::arg::CommonArgs;
use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{DayArg, OutputFormat, format_date};
use crate::week_formatter::{WeekFormatter, week_range};

#[derive(Debug, Clone, Default)]
pub struct CmdWeek {
    pub date: Option<String>,
    pub offset: i32,
    pub output_format: OutputFormat,
}

impl CmdWeek {
    pub const NAME: &str = "week";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("w")
            .about("Show the week grid with homework and quizzes")
            .arg(arg!(--date <DATE> "Show the week containing this date or school day"))
            .arg(
                arg!(--offset <N> "Move this many weeks forward, or back when negative")
                    .value_parser(value_parser!(i32))
                    .allow_negative_numbers(true)
                    .default_value("0"),
            )
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: matches.get_one("date").cloned(),
            offset: matches.get_one("offset").copied().unwrap_or(0),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn run(self, timetable: &mut Timetable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing week...");
        self.show(timetable, &mut io::stdout())
    }

    pub fn show(
        self,
        timetable: &mut Timetable,
        out: &mut impl io::Write,
    ) -> Result<(), Box<dyn Error>> {
        let date = match &self.date {
            Some(date) => DayArg::parse(date, timetable.today())?.date(timetable.week_start()),
            None => timetable.week_start(),
        };
        if self.date.is_some() || self.offset != 0 {
            timetable.go_to_week(date, i64::from(self.offset))?;
        }

        if self.output_format == OutputFormat::Table {
            writeln!(out, "{}", week_heading(timetable))?;
        }
        let grid = WeekFormatter::new(timetable).with_output_format(self.output_format);
        writeln!(out, "{grid}")?;
        Ok(())
    }
}

/// Title line of the grid, like `Week of Mon, May 6 - Fri, May 10`.
pub fn week_heading(timetable: &Timetable) -> String {
    let (monday, friday) = week_range(timetable);
    let title = format!("Week of {} - {}", format_date(monday), format_date(friday));
    if timetable.week().contains(timetable.today()) {
        format!("{} {}", title.bold(), "(This week)".green())
    } else {
        title.bold().to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CmdSchedule {
    pub day: Option<SchoolDay>,
    pub output_format: OutputFormat,
}

impl CmdSchedule {
    pub const NAME: &str = "schedule";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List class slots with their times and subjects")
            .arg(arg!([DAY] "Only this school day").value_parser(value_parser!(SchoolDay)))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            day: matches.get_one("DAY").copied(),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn run(self, timetable: &mut Timetable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing schedule...");
        self.list(timetable, &mut io::stdout())
    }

    pub fn list(self, timetable: &Timetable, out: &mut impl io::Write) -> Result<(), Box<dyn Error>> {
        let days = match self.day {
            Some(day) => vec![day],
            None => SchoolDay::ALL.to_vec(),
        };

        let schedule = timetable.schedule();
        let rows: Vec<SlotRow<'_>> = days
            .into_iter()
            .flat_map(|day| {
                schedule
                    .subjects(day)
                    .iter()
                    .zip(1..)
                    .map(move |(subject, class_number)| SlotRow {
                        day,
                        class_number,
                        time: timetable
                            .class_times()
                            .get(class_number)
                            .map(ToString::to_string)
                            .unwrap_or_default(),
                        subject,
                    })
            })
            .collect();

        let columns = [
            SlotColumn::Day,
            SlotColumn::Class,
            SlotColumn::Time,
            SlotColumn::Subject,
        ];
        match self.output_format {
            OutputFormat::Json => {
                writeln!(out, "{}", Table::new(TableStyleJson::new(), &columns, &rows))?
            }
            OutputFormat::Table => {
                let style = TableStyleBasic::new().with_header();
                write!(out, "{}", Table::new(style, &columns, &rows))?
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
struct SlotRow<'a> {
    day: SchoolDay,
    class_number: u32,
    time: String,
    subject: &'a str,
}

#[derive(Debug, Clone, Copy)]
enum SlotColumn {
    Day,
    Class,
    Time,
    Subject,
}

impl TableColumn<SlotRow<'_>> for SlotColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            SlotColumn::Day => "Day",
            SlotColumn::Class => "Class",
            SlotColumn::Time => "Time",
            SlotColumn::Subject => "Subject",
        }
        .into()
    }

    fn format<'a>(&self, row: &'a SlotRow<'_>) -> Cow<'a, str> {
        match self {
            SlotColumn::Day => row.day.abbr().into(),
            SlotColumn::Class => row.class_number.to_string().into(),
            SlotColumn::Time => row.time.as_str().into(),
            SlotColumn::Subject => row.subject.into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            SlotColumn::Class => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn stylize_header(&self, name: String) -> String {
        name.bold().to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use timetable_core::Config;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timetable() -> Timetable {
        colored::control::set_override(false);
        Timetable::with_clock(Config::default(), || date(2024, 5, 8)).unwrap()
    }

    fn parse(args: &[&str]) -> ArgMatches {
        CmdWeek::command().try_get_matches_from(args).unwrap()
    }

    #[test]
    fn test_parse_week() {
        let cmd = CmdWeek::from(&parse(&["week", "--offset", "-2"]));
        assert_eq!(cmd.offset, -2);
        assert_eq!(cmd.date, None);

        let cmd = CmdWeek::from(&parse(&["week", "--date", "2024-06-03"]));
        assert_eq!(cmd.offset, 0);
        assert_eq!(cmd.date.as_deref(), Some("2024-06-03"));
        assert_eq!(cmd.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_week_current() {
        let mut tt = timetable();
        let mut out = Vec::new();
        CmdWeek::default().show(&mut tt, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("Week of Mon, May 6 - Fri, May 10 (This week)")
        );
        assert!(lines.next().unwrap().contains("Wed 05/08"));
    }

    #[test]
    fn test_week_date_then_offset() {
        let mut tt = timetable();
        let cmd = CmdWeek {
            date: Some("2024-06-05".to_string()),
            offset: -1,
            ..Default::default()
        };
        let mut out = Vec::new();
        cmd.show(&mut tt, &mut out).unwrap();

        assert_eq!(tt.week_start(), date(2024, 5, 27));
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Week of Mon, May 27 - Fri, May 31\n"));
    }

    #[test]
    fn test_week_invalid_date() {
        let mut tt = timetable();
        let cmd = CmdWeek {
            date: Some("someday".to_string()),
            ..Default::default()
        };
        let err = cmd.show(&mut tt, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid date: someday"));
        assert_eq!(tt.week_start(), date(2024, 5, 6));
    }

    #[test]
    fn test_week_huge_offset_is_an_error() {
        let mut tt = timetable();
        for offset in [14_000_000, -14_000_000, i32::MAX, i32::MIN] {
            let cmd = CmdWeek {
                offset,
                ..Default::default()
            };
            let err = cmd.show(&mut tt, &mut Vec::new()).unwrap_err();
            assert!(err.to_string().starts_with("Date out of range: 2024-05-06"));
            assert_eq!(tt.week_start(), date(2024, 5, 6));
        }
    }

    #[test]
    fn test_week_date_at_calendar_end_is_an_error() {
        let mut tt = timetable();
        let cmd = CmdWeek {
            date: Some("+262142-12-31".to_string()),
            ..Default::default()
        };
        let mut out = Vec::new();
        let err = cmd.show(&mut tt, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Date out of range: +262142-12-31");
        assert!(out.is_empty());
        assert_eq!(tt.week_start(), date(2024, 5, 6));
    }

    #[test]
    fn test_week_far_date_in_range() {
        let mut tt = timetable();
        let cmd = CmdWeek {
            date: Some("9999-12-29".to_string()),
            offset: 2,
            ..Default::default()
        };
        let mut out = Vec::new();
        cmd.show(&mut tt, &mut out).unwrap();
        assert_eq!(tt.week_start(), date(10000, 1, 10));
    }

    #[test]
    fn test_schedule_one_day() {
        let tt = timetable();
        let matches = CmdSchedule::command()
            .try_get_matches_from(["schedule", "wed"])
            .unwrap();
        let cmd = CmdSchedule::from(&matches);
        assert_eq!(cmd.day, Some(SchoolDay::Wednesday));

        let mut out = Vec::new();
        cmd.list(&tt, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Day Class Time        Subject");
        assert_eq!(lines[3], "Wed     3 10:15-11:05 Living Technology");
    }

    #[test]
    fn test_schedule_json_all_days() {
        let tt = timetable();
        let cmd = CmdSchedule {
            day: None,
            output_format: OutputFormat::Json,
        };
        let mut out = Vec::new();
        cmd.list(&tt, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 7 + 8 + 7 + 7 + 7);
        assert_eq!(value[7]["Day"], "Tue");
        assert_eq!(value[7]["Class"], "1");
    }
}
