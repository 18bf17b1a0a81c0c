use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::io;
use std::time::Duration;

use super::app_state::{App, Focus};

mod global;

/// Short enough to pick up engine replies and expire notifications promptly
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

impl App {
    pub fn handle_events(&mut self) -> io::Result<()> {
        self.poll_conversation();

        if event::poll(EVENT_POLL_TIMEOUT)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Paste(text) => {
                    self.handle_paste_event(text);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_paste_event(&mut self, text: String) {
        if self.focus == Focus::InputField && !self.is_generating() {
            self.input.insert_paste(&text);
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.pending_apply.is_some() {
            self.handle_confirm_key(key);
            return;
        }

        if global::handle_global_keys(self, key) {
            return;
        }

        match self.focus {
            Focus::InputField => self.handle_input_field_key(key),
            Focus::Suggestions => self.handle_suggestions_key(key),
        }
    }

    fn handle_input_field_key(&mut self, key: KeyEvent) {
        // Input is disabled until the reply arrives
        if self.is_generating() {
            return;
        }

        if key.code == KeyCode::Enter {
            self.submit_input();
            return;
        }

        self.input.handle_key(key);
    }

    fn handle_suggestions_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Char('a') | KeyCode::Enter => self.add_selected_block(),
            KeyCode::Char('A') => self.request_apply_all(),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_apply_all(),
            _ => self.cancel_apply_all(),
        }
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
