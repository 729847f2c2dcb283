// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the timetable-core crate.
//!
//! These tests drive the store and the timetable through multi-step sessions
//! and check the observed state and notifications.

mod config_driven;
mod event_lifecycle;
mod store_properties;
mod week_navigation;
