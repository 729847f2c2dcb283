// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use clap_num::number_range;
use timetable_core::{EventKind, Id};

use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn id() -> Arg {
        arg!(id: <ID> "The display number or uid of the event")
    }

    pub fn get_id(matches: &ArgMatches) -> Id {
        let id = matches
            .get_one::<String>("id")
            .expect("id is required")
            .clone();

        Id::ShortIdOrUid(id)
    }

    pub fn ids() -> Arg {
        arg!(id: <ID> "The display numbers or uids of the events").num_args(1..)
    }

    pub fn get_ids(matches: &ArgMatches) -> Vec<Id> {
        matches
            .get_many::<String>("id")
            .expect("id is required")
            .map(|a| Id::ShortIdOrUid(a.clone()))
            .collect()
    }

    pub fn day() -> Arg {
        arg!(day: <DAY> "Date (YYYY-MM-DD, today, tomorrow) or school day (mon..fri)")
    }

    pub fn get_day(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("day")
            .expect("day is required")
            .clone()
    }

    pub fn get_optional_day(matches: &ArgMatches) -> Option<String> {
        matches.get_one("day").cloned()
    }

    pub fn on() -> Arg {
        arg!(--on <DAY> "Move to a date (YYYY-MM-DD, today, tomorrow) or school day")
    }

    pub fn get_on(matches: &ArgMatches) -> Option<String> {
        matches.get_one("on").cloned()
    }

    pub fn class_number(positional: bool) -> Arg {
        fn from_1_to_99(s: &str) -> Result<u32, String> {
            number_range(s, 1, 99)
        }

        if positional {
            arg!(class: <CLASS> "Class slot, starting from 1").value_parser(from_1_to_99)
        } else {
            arg!(class: --class <CLASS> "Class slot, starting from 1").value_parser(from_1_to_99)
        }
    }

    pub fn get_class_number(matches: &ArgMatches) -> Option<u32> {
        matches.get_one("class").copied()
    }

    pub fn name(positional: bool) -> Arg {
        if positional {
            arg!(name: <NAME> "Name of the homework or quiz").num_args(1..)
        } else {
            arg!(name: --name <NAME> "Name of the homework or quiz")
        }
    }

    /// The name, words of a positional name joined with spaces.
    pub fn get_name(matches: &ArgMatches) -> Option<String> {
        matches
            .get_many::<String>("name")
            .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
    }

    pub fn kind() -> Arg {
        arg!(--kind <KIND> "Kind of the event").value_parser(value_parser!(EventKind))
    }

    pub fn get_kind(matches: &ArgMatches) -> Option<EventKind> {
        matches.get_one("kind").copied()
    }

    pub fn quiz() -> Arg {
        arg!(--quiz "Mark the event as a quiz")
    }

    pub fn get_quiz(matches: &ArgMatches) -> bool {
        matches.get_flag("quiz")
    }

    pub fn weekly() -> Arg {
        arg!(--weekly "Repeat on the school day every week")
    }

    pub fn get_weekly(matches: &ArgMatches) -> bool {
        matches.get_flag("weekly")
    }
}

#[cfg(test)]
mod tests {
    use clap::Command;

    use super::*;

    #[test]
    fn test_positional_name_joins_words() {
        let cmd = Command::new("add")
            .arg(EventArgs::day())
            .arg(EventArgs::class_number(true))
            .arg(EventArgs::name(true));
        let matches = cmd
            .try_get_matches_from(["add", "mon", "2", "Algebra", "HW"])
            .unwrap();

        assert_eq!(EventArgs::get_day(&matches), "mon");
        assert_eq!(EventArgs::get_class_number(&matches), Some(2));
        assert_eq!(EventArgs::get_name(&matches), Some("Algebra HW".to_string()));
    }

    #[test]
    fn test_optional_positionals() {
        let cmd = Command::new("add")
            .arg(EventArgs::day().required(false))
            .arg(EventArgs::class_number(true).required(false))
            .arg(EventArgs::name(true).required(false));

        let matches = cmd.clone().try_get_matches_from(["add"]).unwrap();
        assert_eq!(EventArgs::get_optional_day(&matches), None);
        assert_eq!(EventArgs::get_class_number(&matches), None);
        assert_eq!(EventArgs::get_name(&matches), None);

        let matches = cmd.try_get_matches_from(["add", "fri", "3"]).unwrap();
        assert_eq!(EventArgs::get_optional_day(&matches), Some("fri".to_string()));
        assert_eq!(EventArgs::get_class_number(&matches), Some(3));
        assert_eq!(EventArgs::get_name(&matches), None);
    }

    #[test]
    fn test_class_number_range() {
        let cmd = Command::new("edit").arg(EventArgs::class_number(false));
        assert!(cmd.clone().try_get_matches_from(["edit", "--class", "0"]).is_err());
        assert!(cmd.clone().try_get_matches_from(["edit", "--class", "x"]).is_err());
        let matches = cmd.try_get_matches_from(["edit", "--class", "8"]).unwrap();
        assert_eq!(EventArgs::get_class_number(&matches), Some(8));
    }

    #[test]
    fn test_kind_aliases() {
        let cmd = Command::new("edit").arg(EventArgs::kind());
        let matches = cmd
            .clone()
            .try_get_matches_from(["edit", "--kind", "hw"])
            .unwrap();
        assert_eq!(EventArgs::get_kind(&matches), Some(EventKind::Homework));
        let matches = cmd.try_get_matches_from(["edit", "--kind", "quiz"]).unwrap();
        assert_eq!(EventArgs::get_kind(&matches), Some(EventKind::Quiz));
    }

    #[test]
    fn test_output_format_default() {
        let cmd = Command::new("list").arg(CommonArgs::output_format());
        let matches = cmd.try_get_matches_from(["list"]).unwrap();
        assert_eq!(CommonArgs::get_output_format(&matches), OutputFormat::Table);
    }
}
