use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::app_state::App;

/// Keys that work regardless of focus. Returns true if the key was handled.
pub fn handle_global_keys(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            true
        }
        KeyCode::Esc => {
            app.should_quit = true;
            true
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            true
        }
        KeyCode::Char('r') if ctrl => {
            app.reset_conversation();
            true
        }
        KeyCode::Char('s') if ctrl => {
            app.save_template();
            true
        }
        _ => false,
    }
}
