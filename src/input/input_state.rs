use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Style;
use tui_textarea::TextArea;

use crate::theme;

pub const PLACEHOLDER: &str = "Describe what to build...";

/// Single-line utterance input
pub struct InputState {
    pub textarea: TextArea<'static>,
}

impl InputState {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_cursor_style(theme::palette::CURSOR);
        textarea.set_placeholder_text(PLACEHOLDER);
        textarea.set_placeholder_style(Style::default().fg(theme::input::PLACEHOLDER));

        Self { textarea }
    }

    pub fn text(&self) -> &str {
        self.textarea.lines()[0].as_ref()
    }

    /// Take the current text and clear the field
    pub fn take_text(&mut self) -> String {
        let text = self.text().to_string();
        self.clear();
        text
    }

    pub fn clear(&mut self) {
        self.textarea.move_cursor(tui_textarea::CursorMove::Head);
        self.textarea.delete_line_by_end();
    }

    /// Insert pasted text, flattening newlines so the field stays single-line
    pub fn insert_paste(&mut self, text: &str) {
        let flattened = text.replace(['\r', '\n'], " ");
        self.textarea.insert_str(flattened);
    }

    /// Forward an editing key to the textarea
    ///
    /// Enter is not an editing key here; callers handle submission.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Enter {
            return false;
        }
        self.textarea.input(key)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
