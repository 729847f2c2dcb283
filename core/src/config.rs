// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use crate::{ClassTimes, EventKind, ScheduleTable, SchoolDay, TimetableError};

/// The name of the timetable application.
pub const APP_NAME: &str = "timetable";

/// Grid colours of the built-in subjects.
const DEFAULT_COLORS: [(&str, &str); 15] = [
    ("Chinese", "#fecaca"),
    ("Math", "#bfdbfe"),
    ("English", "#bbf7d0"),
    ("Chemistry", "#ddd6fe"),
    ("Biology", "#fde68a"),
    ("Scientific reading", "#fed7aa"),
    ("Science and Creative Thinking", "#c7d2fe"),
    ("Living Technology", "#a5b4fc"),
    ("Alternative Learning", "#fecaca"),
    ("History", "#bfdbfe"),
    ("Taiwanese", "#bbf7d0"),
    ("Society", "#ddd6fe"),
    ("PE", "#fde68a"),
    ("Club", "#fed7aa"),
    ("Elective Subjects", "#c7d2fe"),
];

fn default_colors() -> BTreeMap<String, String> {
    DEFAULT_COLORS
        .iter()
        .map(|(subject, color)| (subject.to_string(), color.to_string()))
        .collect()
}

/// Configuration for the timetable application.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Kind of new events when none is given.
    #[serde(default)]
    pub default_kind: EventKind,

    /// Replacement for the built-in subject table.
    #[serde(default)]
    pub timetable: Option<ScheduleTable>,

    /// Replacement for the built-in class times.
    #[serde(default)]
    pub class_times: Option<ClassTimes>,

    /// Grid colour of each subject, by subject name.
    ///
    /// A `[colors]` table replaces the built-in palette as a whole.
    #[serde(default = "default_colors")]
    pub colors: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_kind: EventKind::default(),
            timetable: None,
            class_times: None,
            colors: default_colors(),
        }
    }
}

impl Config {
    /// Normalize the configuration.
    ///
    /// Fills in the built-in table and class times, then checks that every
    /// slot of every day has a class time.
    pub fn normalize(&mut self) -> Result<(), TimetableError> {
        let schedule = self.timetable.get_or_insert_with(ScheduleTable::default);
        let class_times = self.class_times.get_or_insert_with(ClassTimes::default);

        if class_times.is_empty() {
            return Err(TimetableError::InvalidConfig(
                "class_times must not be empty".to_string(),
            ));
        }

        for (i, time) in class_times.iter().enumerate() {
            if time.start >= time.end {
                return Err(TimetableError::InvalidConfig(format!(
                    "class time {} ends before it starts: {time}",
                    i + 1
                )));
            }
        }

        for day in SchoolDay::ALL {
            let slots = schedule.slot_count(day);
            if slots == 0 {
                return Err(TimetableError::InvalidConfig(format!(
                    "no subjects on {day}"
                )));
            }
            if slots > class_times.len() {
                return Err(TimetableError::InvalidConfig(format!(
                    "{day} has {slots} classes but only {} class times",
                    class_times.len()
                )));
            }
        }

        tracing::debug!(?self, "configuration normalized");
        Ok(())
    }

    /// The grid colour of a subject, if configured.
    pub fn color_of(&self, subject: &str) -> Option<&str> {
        self.colors.get(subject).map(String::as_str)
    }
}
