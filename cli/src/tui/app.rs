// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, io, rc::Rc};

use chrono::NaiveDate;
use ratatui::crossterm::event::{self, Event as TermEvent, KeyEventKind};
use ratatui::prelude::*;
use timetable_core::{Event, EventDraft, EventPatch};

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;
use crate::tui::draft_store::DraftStore;
use crate::tui::event_editor::new_event_editor;

/// Runs the event form until it is submitted or cancelled.
pub trait FormRunner {
    fn run(&mut self, title: &str, store: DraftStore) -> Result<DraftStore, Box<dyn Error>>;
}

/// The form on the real terminal, in the alternate screen.
#[derive(Debug, Default)]
pub struct TerminalForm;

impl FormRunner for TerminalForm {
    fn run(&mut self, title: &str, store: DraftStore) -> Result<DraftStore, Box<dyn Error>> {
        let mut terminal = ratatui::init();
        let result = run_event_editor(&mut terminal, title, store, event::read);
        ratatui::restore();
        result
    }
}

/// Opens the form on a new draft, returns `None` when cancelled.
pub fn draft_event(
    runner: &mut dyn FormRunner,
    draft: EventDraft,
    week_start: NaiveDate,
) -> Result<Option<EventDraft>, Box<dyn Error>> {
    let store = DraftStore::new_by_draft(draft, week_start);
    let store = runner.run("New Homework or Quiz", store)?;
    match store.submit {
        true => store.submit_draft().map(Some),
        false => Ok(None),
    }
}

/// Opens the form on an existing event, returns `None` when cancelled.
pub fn patch_event(
    runner: &mut dyn FormRunner,
    event: &Event,
    week_start: NaiveDate,
) -> Result<Option<EventPatch>, Box<dyn Error>> {
    let store = DraftStore::new_by_event(event, week_start);
    let store = runner.run("Edit Homework or Quiz", store)?;
    match store.submit {
        true => store.submit_patch().map(Some),
        false => Ok(None),
    }
}

pub fn run_event_editor<B: Backend>(
    terminal: &mut Terminal<B>,
    title: &str,
    store: DraftStore,
    mut read: impl FnMut() -> io::Result<TermEvent>,
) -> Result<DraftStore, Box<dyn Error>> {
    let store = Rc::new(RefCell::new(store));

    let result: Result<(), Box<dyn Error>> = {
        let mut dispatcher = Dispatcher::new();
        DraftStore::register_to(store.clone(), &mut dispatcher);
        let mut editor = new_event_editor::<DraftStore>(title);
        editor.activate(&mut dispatcher, &store);

        let mut area = Rect::default();
        loop {
            let drawn = terminal.draw(|frame| {
                area = frame.area();
                draw(&editor, &*store, frame);
            });
            if let Err(e) = drawn {
                break Err(e.into());
            }

            match read() {
                Err(e) => break Err(e.into()),
                Ok(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(Message::Exit) = editor.on_key(&mut dispatcher, &store, area, key) {
                        break Ok(());
                    }
                }
                Ok(_) => {} // resize and friends only need a redraw
            }
        }
    }; // release dispatcher and editor here, they hold the store
    result?;

    let owned_store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    Ok(owned_store)
}

fn draw<S, C: Component<S>>(component: &C, store: &RefCell<S>, frame: &mut Frame) {
    let area = frame.area();
    component.render(store, area, frame.buffer_mut());
    if let Some(position) = component.get_cursor_position(store, area) {
        frame.set_cursor_position(position);
    }
}

/// Replays a fixed list of keys on an in-memory terminal.
#[cfg(test)]
pub struct ScriptedForm {
    keys: std::collections::VecDeque<ratatui::crossterm::event::KeyEvent>,
}

#[cfg(test)]
impl ScriptedForm {
    pub fn new(keys: impl IntoIterator<Item = ratatui::crossterm::event::KeyCode>) -> Self {
        use ratatui::crossterm::event::{KeyEvent, KeyModifiers};
        let keys = keys
            .into_iter()
            .map(|code| KeyEvent::new(code, KeyModifiers::NONE))
            .collect();
        Self { keys }
    }

    pub fn typing(text: &str) -> impl Iterator<Item = ratatui::crossterm::event::KeyCode> + '_ {
        text.chars().map(ratatui::crossterm::event::KeyCode::Char)
    }
}

#[cfg(test)]
impl FormRunner for ScriptedForm {
    fn run(&mut self, title: &str, store: DraftStore) -> Result<DraftStore, Box<dyn Error>> {
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(72, 24))?;
        run_event_editor(&mut terminal, title, store, || match self.keys.pop_front() {
            Some(key) => Ok(TermEvent::Key(key)),
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more keys")),
        })
    }
}
