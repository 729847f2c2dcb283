// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Interactive session. The event store only lives as long as the session,
//! commands are read line by line and the week grid is printed again after
//! every change to the store. `add` without a name and `edit` without flags
//! open the event form.

use std::{
    cell::Cell,
    error::Error,
    io::{self, BufRead, Write},
    rc::Rc,
};

use clap::{ArgMatches, ColorChoice, Command, arg};
use colored::Colorize;
use timetable_core::{
    EventAnchor, EventConditions, EventKind, EventPatch, SubscriptionId, Timetable,
    TimetableError, get_day_of_week,
};

use crate::arg::{CommonArgs, EventArgs};
use crate::cmd_week::{CmdWeek, week_heading};
use crate::event_formatter::{EventColumn, EventFormatter, EventRow};
use crate::tui::{FormRunner, TerminalForm, draft_event, patch_event};
use crate::util::{DayArg, format_date, split_words};
use crate::week_formatter::WeekFormatter;

#[derive(Debug, Clone, Copy)]
pub struct CmdShell;

impl CmdShell {
    pub const NAME: &str = "shell";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("i")
            .about("Start an interactive session to track homework and quizzes")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub fn run(self, timetable: &mut Timetable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "starting interactive session...");
        let stdin = io::stdin();
        Session::new(timetable, stdin.lock(), io::stdout()).run()
    }
}

/// Commands accepted inside the session, the first word names the command.
fn session_command() -> Command {
    Command::new(CmdShell::NAME)
        .no_binary_name(true)
        .subcommand_required(true)
        .disable_help_subcommand(true)
        .color(ColorChoice::Never)
        .subcommand(CmdWeek::command())
        .subcommand(
            Command::new("next")
                .alias("n")
                .about("Show the next week"),
        )
        .subcommand(
            Command::new("prev")
                .alias("p")
                .about("Show the previous week"),
        )
        .subcommand(
            Command::new("today")
                .alias("t")
                .about("Go back to the current week"),
        )
        .subcommand(
            Command::new("add")
                .alias("a")
                .about("Add homework or a quiz to a class, in a form when no name is given")
                .arg(EventArgs::day().required(false))
                .arg(EventArgs::class_number(true).required(false))
                .arg(EventArgs::name(true).required(false))
                .arg(EventArgs::quiz())
                .arg(EventArgs::weekly()),
        )
        .subcommand(
            Command::new("edit")
                .alias("e")
                .about("Change homework or a quiz, in a form when no flag is given")
                .arg(EventArgs::id())
                .arg(EventArgs::name(false))
                .arg(EventArgs::kind())
                .arg(EventArgs::class_number(false))
                .arg(EventArgs::on())
                .arg(EventArgs::weekly()),
        )
        .subcommand(
            Command::new("rm")
                .alias("remove")
                .about("Remove homework or quizzes")
                .arg(EventArgs::ids()),
        )
        .subcommand(
            Command::new("list")
                .alias("ls")
                .about("List homework and quizzes")
                .arg(EventArgs::kind())
                .arg(arg!(--week "Only events shown in the displayed week"))
                .arg(CommonArgs::output_format())
                .arg(CommonArgs::verbose()),
        )
        .subcommand(
            Command::new("show")
                .about("Show homework and quizzes of one class")
                .arg(EventArgs::day())
                .arg(EventArgs::class_number(true))
                .arg(EventArgs::weekly()),
        )
        .subcommand(Command::new("help").about("Show available commands"))
        .subcommand(
            Command::new("exit")
                .visible_alias("quit")
                .alias("q")
                .about("Leave the session"),
        )
}

enum Flow {
    Continue,
    Exit,
}

/// An interactive session over a timetable, reading commands from `input`.
pub struct Session<'a, R, W> {
    timetable: &'a mut Timetable,
    input: R,
    output: W,
    form: Box<dyn FormRunner + 'a>,
    dirty: Rc<Cell<bool>>,
    subscription: SubscriptionId,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(timetable: &'a mut Timetable, input: R, output: W) -> Self {
        let dirty = Rc::new(Cell::new(false));
        let subscription = timetable.subscribe({
            let dirty = dirty.clone();
            move |change, snapshot| {
                tracing::debug!(?change, events = snapshot.events.len(), "store changed");
                dirty.set(true);
            }
        });

        Self {
            timetable,
            input,
            output,
            form: Box::new(TerminalForm),
            dirty,
            subscription,
        }
    }

    #[cfg(test)]
    fn with_form(mut self, form: impl FormRunner + 'a) -> Self {
        self.form = Box::new(form);
        self
    }

    /// Reads and executes commands until `exit` or the end of input.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.render_week()?;
        writeln!(self.output, "Type {} for a list of commands", "help".bold())?;

        let mut line = String::new();
        loop {
            write!(self.output, "{} ", ">".cyan())?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            match self.execute(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => writeln!(self.output, "{} {}", "Error:".red(), e)?,
            }

            if self.dirty.replace(false) {
                self.render_week()?;
            }
        }
        Ok(())
    }

    fn execute(&mut self, line: &str) -> Result<Flow, Box<dyn Error>> {
        let words = split_words(line)?;
        if words.is_empty() {
            return Ok(Flow::Continue);
        }

        let matches = match session_command().try_get_matches_from(&words) {
            Ok(matches) => matches,
            Err(e) => {
                write!(self.output, "{e}")?;
                return Ok(Flow::Continue);
            }
        };

        tracing::debug!(command = ?matches.subcommand_name(), "executing...");
        match matches.subcommand() {
            Some((CmdWeek::NAME, matches)) => {
                CmdWeek::from(matches).show(self.timetable, &mut self.output)?;
                self.dirty.set(false);
            }
            Some(("next", _)) => {
                self.timetable.next_week();
            }
            Some(("prev", _)) => {
                self.timetable.previous_week();
            }
            Some(("today", _)) => {
                self.timetable.current_week();
            }
            Some(("add", matches)) => self.add(matches)?,
            Some(("edit", matches)) => self.edit(matches)?,
            Some(("rm", matches)) => self.remove(matches)?,
            Some(("list", matches)) => self.list(matches)?,
            Some(("show", matches)) => self.show(matches)?,
            Some(("help", _)) => self.help()?,
            Some(("exit", _)) => return Ok(Flow::Exit),
            _ => unreachable!(),
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self, matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
        let week_start = self.timetable.week_start();
        let weekly = EventArgs::get_weekly(matches);

        let mut draft = self.timetable.default_event_draft();
        match EventArgs::get_optional_day(matches) {
            Some(day) => {
                let day = DayArg::parse(&day, self.timetable.today())?;
                draft.anchor = day.anchor(week_start, weekly);
            }
            None if weekly => draft.anchor = EventAnchor::Weekday(draft.anchor.school_day()),
            None => {}
        }
        if let Some(class_number) = EventArgs::get_class_number(matches) {
            draft.class_number = class_number;
        }
        if EventArgs::get_quiz(matches) {
            draft.kind = EventKind::Quiz;
        }

        match EventArgs::get_name(matches) {
            Some(name) => draft.name = name,
            None => match draft_event(self.form.as_mut(), draft, week_start)? {
                Some(submitted) => draft = submitted,
                None => {
                    writeln!(self.output, "Cancelled")?;
                    return Ok(());
                }
            },
        }

        match self.timetable.new_event(draft)? {
            Some(event) => writeln!(
                self.output,
                "Added {} {}: {}",
                event.kind, event.short_id, event.name
            )?,
            None => writeln!(self.output, "Nothing added, the name is empty")?,
        }
        Ok(())
    }

    fn edit(&mut self, matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
        let id = EventArgs::get_id(matches);
        let weekly = EventArgs::get_weekly(matches);

        let anchor = match EventArgs::get_on(matches) {
            Some(on) => {
                let day = DayArg::parse(&on, self.timetable.today())?;
                Some(day.anchor(self.timetable.week_start(), weekly))
            }
            None if weekly => {
                let day = self.timetable.get_event(&id)?.school_day();
                Some(EventAnchor::Weekday(day))
            }
            None => None,
        };

        let mut patch = EventPatch {
            anchor,
            class_number: EventArgs::get_class_number(matches),
            name: EventArgs::get_name(matches),
            kind: EventArgs::get_kind(matches),
        };
        if patch.is_empty() {
            let event = self.timetable.get_event(&id)?.inner.clone();
            match patch_event(self.form.as_mut(), &event, self.timetable.week_start())? {
                Some(submitted) => patch = submitted,
                None => {
                    writeln!(self.output, "Cancelled")?;
                    return Ok(());
                }
            }
        }
        if patch.is_empty() {
            writeln!(self.output, "Nothing to change")?;
            return Ok(());
        }

        let event = self.timetable.update_event(&id, patch)?;
        writeln!(
            self.output,
            "Updated {} {}: {}",
            event.kind, event.short_id, event.name
        )?;
        Ok(())
    }

    fn remove(&mut self, matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
        for id in EventArgs::get_ids(matches) {
            match self.timetable.remove_event(&id) {
                Ok(event) => writeln!(self.output, "Removed {}: {}", event.kind, event.name)?,
                Err(e) => writeln!(self.output, "{} {}", "Error:".red(), e)?,
            }
        }
        Ok(())
    }

    fn list(&mut self, matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
        let timetable = &*self.timetable;
        let conds = EventConditions {
            week: matches.get_flag("week").then(|| timetable.week_start()),
            kind: EventArgs::get_kind(matches),
        };

        let events = timetable.list_events(&conds);
        if events.is_empty() {
            writeln!(self.output, "No homework yet")?;
            return Ok(());
        }

        let rows: Vec<_> = events.iter().map(|e| EventRow::new(timetable, e)).collect();
        let formatter = EventFormatter::new(EventColumn::list(CommonArgs::get_verbose(matches)))
            .with_output_format(CommonArgs::get_output_format(matches));
        writeln!(self.output, "{}", formatter.format(&rows))?;
        Ok(())
    }

    fn show(&mut self, matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
        let timetable = &*self.timetable;
        let day = DayArg::parse(&EventArgs::get_day(matches), timetable.today())?;
        let class_number = EventArgs::get_class_number(matches).unwrap_or(1);
        let week_start = timetable.week_start();

        let (title, events) = if EventArgs::get_weekly(matches) {
            let anchor = day.anchor(week_start, true);
            let title = format!("Every {}", anchor.school_day().abbr());
            (title, timetable.events_with_anchor(&anchor, class_number))
        } else {
            let date = day.date(week_start);
            (format_date(date), timetable.events_at(date, class_number))
        };

        let school_day = get_day_of_week(day.date(week_start));
        let schedule = timetable.schedule();
        let Some(subject) = schedule.subject(school_day, class_number) else {
            return Err(TimetableError::InvalidClassNumber {
                day: school_day,
                class_number,
                slots: schedule.slot_count(school_day),
            }
            .into());
        };
        let time = timetable
            .class_times()
            .get(class_number)
            .map(|t| format!(" ({t})"))
            .unwrap_or_default();
        writeln!(
            self.output,
            "{}",
            format!("{title}, class {class_number}: {subject}{time}").bold()
        )?;

        if events.is_empty() {
            writeln!(self.output, "No homework or quiz in this class")?;
            return Ok(());
        }
        let rows: Vec<_> = events.iter().map(|e| EventRow::new(timetable, e)).collect();
        let formatter = EventFormatter::new(EventColumn::list(false));
        write!(self.output, "{}", formatter.format(&rows))?;
        Ok(())
    }

    fn help(&mut self) -> Result<(), Box<dyn Error>> {
        writeln!(self.output, "{}", "Commands:".green().bold())?;
        for cmd in session_command().get_subcommands() {
            let about = cmd.get_about().map(ToString::to_string).unwrap_or_default();
            writeln!(self.output, "  {:<9} {}", cmd.get_name().blue(), about)?;
        }
        writeln!(self.output, "Run `<COMMAND> --help` for details")?;
        Ok(())
    }

    fn render_week(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", week_heading(self.timetable))?;
        writeln!(self.output, "{}", WeekFormatter::new(self.timetable))
    }
}

impl<R, W> Drop for Session<'_, R, W> {
    fn drop(&mut self) {
        self.timetable.unsubscribe(self.subscription);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::crossterm::event::KeyCode;
    use timetable_core::{Config, SchoolDay};

    use super::*;
    use crate::tui::ScriptedForm;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timetable() -> Timetable {
        colored::control::set_override(false);
        Timetable::with_clock(Config::default(), || date(2024, 5, 6)).unwrap()
    }

    fn run_session(timetable: &mut Timetable, input: &str) -> String {
        let mut out = Vec::new();
        Session::new(timetable, input.as_bytes(), &mut out)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn run_session_with_form(timetable: &mut Timetable, input: &str, form: ScriptedForm) -> String {
        let mut out = Vec::new();
        Session::new(timetable, input.as_bytes(), &mut out)
            .with_form(form)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_renders_week_again() {
        let mut tt = timetable();
        let out = run_session(&mut tt, "add mon 1 Algebra HW\nexit\n");

        assert!(out.contains("Added homework 1: Algebra HW"));
        assert!(out.contains("Chinese *1"));
        assert_eq!(out.matches("Week of Mon, May 6").count(), 2);
        assert_eq!(tt.store().len(), 1);
    }

    #[test]
    fn test_add_quiz_weekly() {
        let mut tt = timetable();
        let out = run_session(&mut tt, "add wed 2 Unit test --quiz --weekly\n");

        assert!(out.contains("Added quiz 1: Unit test"));
        let event = &tt.store().events()[0];
        assert_eq!(event.anchor, EventAnchor::Weekday(SchoolDay::Wednesday));
        assert_eq!(event.kind, EventKind::Quiz);
    }

    #[test]
    fn test_add_blank_name_changes_nothing() {
        let mut tt = timetable();
        let out = run_session(&mut tt, "add mon 1 \"  \"\n");

        assert!(out.contains("Nothing added, the name is empty"));
        assert_eq!(out.matches("Week of").count(), 1);
        assert!(tt.store().is_empty());
    }

    #[test]
    fn test_add_invalid_class() {
        let mut tt = timetable();
        let out = run_session(&mut tt, "add mon 8 Essay\n");

        assert!(out.contains("Error: Class 8 does not exist on monday, expected 1 to 7"));
        assert!(tt.store().is_empty());
    }

    #[test]
    fn test_edit_and_remove() {
        let input = "\
add tue 3 Reading
edit 1 --name \"Lab report\" --kind quiz
rm 1 9
list
";
        let mut tt = timetable();
        let out = run_session(&mut tt, input);

        assert!(out.contains("Updated quiz 1: Lab report"));
        assert!(out.contains("Removed quiz: Lab report"));
        assert!(out.contains("Error: Event not found: 9"));
        assert!(out.contains("No homework yet"));
        assert!(tt.store().is_empty());
    }

    #[test]
    fn test_edit_nothing() {
        let mut tt = timetable();
        let form = ScriptedForm::new([KeyCode::Enter]);
        let out = run_session_with_form(&mut tt, "add mon 1 Essay\nedit 1\n", form);
        assert!(out.contains("Nothing to change"));
        assert_eq!(out.matches("Week of").count(), 2);
    }

    #[test]
    fn test_add_in_form() {
        let mut tt = timetable();
        let form = ScriptedForm::new(ScriptedForm::typing("Essay").chain([KeyCode::Enter]));
        let out = run_session_with_form(&mut tt, "add\n", form);

        assert!(out.contains("Added homework 1: Essay"));
        let event = &tt.store().events()[0];
        assert_eq!(event.anchor, EventAnchor::Date(date(2024, 5, 6)));
        assert_eq!(event.class_number, 1);
    }

    #[test]
    fn test_add_in_form_prefilled_from_args() {
        let mut tt = timetable();
        let form = ScriptedForm::new(ScriptedForm::typing("Lab").chain([KeyCode::Enter]));
        let out = run_session_with_form(&mut tt, "add fri 3 --quiz\n", form);

        assert!(out.contains("Added quiz 1: Lab"));
        let event = &tt.store().events()[0];
        assert_eq!(event.anchor, EventAnchor::Date(date(2024, 5, 10)));
        assert_eq!(event.class_number, 3);
    }

    #[test]
    fn test_add_in_form_cancelled() {
        let mut tt = timetable();
        let form = ScriptedForm::new(ScriptedForm::typing("Lab").chain([KeyCode::Esc]));
        let out = run_session_with_form(&mut tt, "add wed\n", form);

        assert!(out.contains("Cancelled"));
        assert_eq!(out.matches("Week of").count(), 1);
        assert!(tt.store().is_empty());
    }

    #[test]
    fn test_edit_in_form() {
        use KeyCode::*;
        let mut tt = timetable();
        let keys = [Down, Right, Down, Down, Right, Enter]; // Tue, quiz
        let form = ScriptedForm::new(keys);
        let out = run_session_with_form(&mut tt, "add mon 2 Dictation\nedit 1\n", form);

        assert!(out.contains("Updated quiz 1: Dictation"));
        let event = &tt.store().events()[0];
        assert_eq!(event.anchor, EventAnchor::Date(date(2024, 5, 7)));
        assert_eq!(event.school_day(), SchoolDay::Tuesday);
        assert_eq!(event.kind, EventKind::Quiz);
    }

    #[test]
    fn test_list_sorted() {
        let input = "\
add wed 1 Problem set
add mon 2 Essay
list --kind homework
";
        let mut tt = timetable();
        let out = run_session(&mut tt, input);

        let essay = out.find("2 Mon, May 6 (Today)").unwrap();
        let problem_set = out.find("1 Wed, May 8").unwrap();
        assert!(essay < problem_set);
    }

    #[test]
    fn test_week_navigation() {
        let mut tt = timetable();
        let out = run_session(&mut tt, "next\nnext\nprev\n");

        assert!(out.contains("Week of Mon, May 13 - Fri, May 17\n"));
        assert!(out.contains("Week of Mon, May 20 - Fri, May 24\n"));
        assert_eq!(tt.week_start(), date(2024, 5, 13));

        let out = run_session(&mut tt, "today\n");
        assert!(out.contains("Week of Mon, May 6 - Fri, May 10 (This week)"));
        assert_eq!(tt.week_start(), date(2024, 5, 6));
    }

    #[test]
    fn test_show_class() {
        let mut tt = timetable();
        let out = run_session(&mut tt, "add wed 3 Wiring\nshow wed 3\nshow wed 4\n");

        assert!(out.contains("Wed, May 8, class 3: Living Technology (10:15-11:05)"));
        assert!(out.contains("homework Wiring"));
        assert!(out.contains("Wed, May 8, class 4: Living Technology (11:15-12:05)"));
        assert!(out.contains("No homework or quiz in this class"));
    }

    #[test]
    fn test_help_and_unknown_command() {
        let mut tt = timetable();
        let out = run_session(&mut tt, "help\nfly\n");

        assert!(out.contains("Commands:"));
        assert!(out.contains("  add"));
        assert!(out.contains("  exit"));
        assert!(out.contains("unrecognized subcommand 'fly'"));
    }

    #[test]
    fn test_unclosed_quote() {
        let mut tt = timetable();
        let out = run_session(&mut tt, "add mon 1 \"Essay\n");
        assert!(out.contains("Error: Unclosed quote: \""));
        assert!(tt.store().is_empty());
    }

    #[test]
    fn test_session_unsubscribes() {
        let mut tt = timetable();
        run_session(&mut tt, "exit\n");

        let events = Rc::new(Cell::new(0));
        let id = tt.subscribe({
            let events = events.clone();
            move |_, _| events.set(events.get() + 1)
        });
        tt.next_week();
        assert_eq!(events.get(), 1);
        assert!(tt.unsubscribe(id));
    }
}
