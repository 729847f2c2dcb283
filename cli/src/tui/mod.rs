// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod app;
mod component;
mod component_form;
mod component_page;
mod dispatcher;
mod draft_store;
mod event_editor;

#[cfg(test)]
pub use app::ScriptedForm;
pub use app::{FormRunner, TerminalForm, draft_event, patch_event};
