// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Timetable - school week grid with homework and quiz tracking

use std::error::Error;

use timetable_cli::run;

fn main() -> Result<(), Box<dyn Error>> {
    run()
}
