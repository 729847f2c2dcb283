// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

use chrono::NaiveTime;

/// A day of the school week, Monday through Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SchoolDay {
    /// Monday.
    #[cfg_attr(feature = "clap", value(alias = "mon"))]
    Monday,

    /// Tuesday.
    #[cfg_attr(feature = "clap", value(alias = "tue"))]
    Tuesday,

    /// Wednesday.
    #[cfg_attr(feature = "clap", value(alias = "wed"))]
    Wednesday,

    /// Thursday.
    #[cfg_attr(feature = "clap", value(alias = "thu"))]
    Thursday,

    /// Friday.
    #[cfg_attr(feature = "clap", value(alias = "fri"))]
    Friday,
}

impl SchoolDay {
    /// All school days in week order.
    pub const ALL: [SchoolDay; 5] = [
        SchoolDay::Monday,
        SchoolDay::Tuesday,
        SchoolDay::Wednesday,
        SchoolDay::Thursday,
        SchoolDay::Friday,
    ];

    /// Zero-based position in the week, Monday is 0.
    pub const fn index(self) -> usize {
        match self {
            SchoolDay::Monday => 0,
            SchoolDay::Tuesday => 1,
            SchoolDay::Wednesday => 2,
            SchoolDay::Thursday => 3,
            SchoolDay::Friday => 4,
        }
    }

    /// Three-letter title-cased abbreviation, e.g. `Mon`.
    pub const fn abbr(self) -> &'static str {
        match self {
            SchoolDay::Monday => "Mon",
            SchoolDay::Tuesday => "Tue",
            SchoolDay::Wednesday => "Wed",
            SchoolDay::Thursday => "Thu",
            SchoolDay::Friday => "Fri",
        }
    }
}

impl AsRef<str> for SchoolDay {
    fn as_ref(&self) -> &str {
        match self {
            SchoolDay::Monday => "monday",
            SchoolDay::Tuesday => "tuesday",
            SchoolDay::Wednesday => "wednesday",
            SchoolDay::Thursday => "thursday",
            SchoolDay::Friday => "friday",
        }
    }
}

impl Display for SchoolDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for SchoolDay {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_lowercase();
        SchoolDay::ALL
            .into_iter()
            .find(|day| day.as_ref() == lower || day.abbr().to_lowercase() == lower)
            .ok_or(())
    }
}

/// Subjects of every school day, one per class slot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ScheduleTable {
    monday: Vec<String>,
    tuesday: Vec<String>,
    wednesday: Vec<String>,
    thursday: Vec<String>,
    friday: Vec<String>,
}

impl ScheduleTable {
    /// Builds a table from the subjects of each day, Monday first.
    pub fn new(days: [Vec<String>; 5]) -> Self {
        let [monday, tuesday, wednesday, thursday, friday] = days;
        Self {
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
        }
    }

    /// The subjects of the given day, ordered by class slot.
    pub fn subjects(&self, day: SchoolDay) -> &[String] {
        match day {
            SchoolDay::Monday => &self.monday,
            SchoolDay::Tuesday => &self.tuesday,
            SchoolDay::Wednesday => &self.wednesday,
            SchoolDay::Thursday => &self.thursday,
            SchoolDay::Friday => &self.friday,
        }
    }

    /// The subject taught in the 1-based class slot, if the slot exists.
    pub fn subject(&self, day: SchoolDay, class_number: u32) -> Option<&str> {
        let index = usize::try_from(class_number).ok()?.checked_sub(1)?;
        self.subjects(day).get(index).map(String::as_str)
    }

    /// Number of class slots on the given day.
    pub fn slot_count(&self, day: SchoolDay) -> usize {
        self.subjects(day).len()
    }

    /// The largest number of slots of any day.
    pub fn max_slots(&self) -> usize {
        SchoolDay::ALL
            .into_iter()
            .map(|day| self.slot_count(day))
            .max()
            .unwrap_or_default()
    }

    /// Whether the 1-based class slot exists on the given day.
    pub fn has_slot(&self, day: SchoolDay, class_number: u32) -> bool {
        self.subject(day, class_number).is_some()
    }
}

impl Default for ScheduleTable {
    fn default() -> Self {
        fn day(subjects: &[&str]) -> Vec<String> {
            subjects.iter().map(|s| (*s).to_string()).collect()
        }

        Self::new([
            day(&[
                "Chinese",
                "Chinese",
                "Scientific reading",
                "Scientific reading",
                "English",
                "Club",
                "Club",
            ]),
            day(&[
                "Science and Creative Thinking",
                "Science and Creative Thinking",
                "English",
                "English",
                "Chemistry",
                "Society",
                "Biology",
                "Biology",
            ]),
            day(&[
                "Math",
                "Math",
                "Living Technology",
                "Living Technology",
                "English",
                "Society",
                "Chinese",
            ]),
            day(&[
                "Chemistry",
                "Biology",
                "Alternative Learning",
                "Alternative Learning",
                "History",
                "Taiwanese",
                "Chinese",
            ]),
            day(&[
                "PE",
                "PE",
                "Math",
                "Math",
                "Chinese",
                "Elective Subjects",
                "Elective Subjects",
            ]),
        ])
    }
}

/// Wall-clock range of one class slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassTime {
    /// When the class starts.
    pub start: NaiveTime,

    /// When the class ends.
    pub end: NaiveTime,
}

impl ClassTime {
    /// Creates a class time from hours and minutes, `None` for an invalid time.
    pub fn from_hm(start: (u32, u32), end: (u32, u32)) -> Option<Self> {
        Some(Self {
            start: NaiveTime::from_hms_opt(start.0, start.1, 0)?,
            end: NaiveTime::from_hms_opt(end.0, end.1, 0)?,
        })
    }
}

impl Display for ClassTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

impl<'de> serde::Deserialize<'de> for ClassTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(serde::Deserialize)]
        struct Raw {
            start: String,
            end: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        let parse = |s: &str| {
            NaiveTime::parse_from_str(s.trim(), "%H:%M")
                .map_err(|e| D::Error::custom(format!("invalid time \"{s}\", expected HH:MM: {e}")))
        };
        Ok(Self {
            start: parse(&raw.start)?,
            end: parse(&raw.end)?,
        })
    }
}

/// Class times index-aligned with the class slots of every day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(transparent)]
pub struct ClassTimes(Vec<ClassTime>);

impl ClassTimes {
    /// The time of the 1-based class slot.
    pub fn get(&self, class_number: u32) -> Option<&ClassTime> {
        let index = usize::try_from(class_number).ok()?.checked_sub(1)?;
        self.0.get(index)
    }

    /// Number of slots with a known time.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no class time is defined.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates class times in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassTime> {
        self.0.iter()
    }
}

impl Default for ClassTimes {
    fn default() -> Self {
        const TIMES: [((u32, u32), (u32, u32)); 8] = [
            ((8, 5), (8, 55)),
            ((9, 5), (9, 55)),
            ((10, 15), (11, 5)),
            ((11, 15), (12, 5)),
            ((13, 10), (14, 0)),
            ((14, 10), (15, 0)),
            ((15, 10), (16, 0)),
            ((16, 10), (17, 0)),
        ];

        Self(
            TIMES
                .iter()
                .filter_map(|(start, end)| ClassTime::from_hm(*start, *end))
                .collect(),
        )
    }
}
