// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of the school timetable: the week grid, the class
//! schedule and an interactive session for homework and quizzes.

mod arg;
mod cli;
mod cmd_generate_completion;
mod cmd_shell;
mod cmd_week;
mod config;
mod event_formatter;
mod table;
mod tui;
mod util;
mod week_formatter;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_shell::Session;
