use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders},
};

use super::InputState;
use crate::theme;

/// Render the utterance input
///
/// While a reply is being generated the field is drawn disabled and keys are
/// ignored by the caller.
pub fn render_field(
    input: &mut InputState,
    frame: &mut Frame,
    area: Rect,
    focused: bool,
    disabled: bool,
) -> Rect {
    let border_color = if disabled {
        theme::input::BORDER_DISABLED
    } else if focused {
        theme::input::BORDER_FOCUSED
    } else {
        theme::input::BORDER_UNFOCUSED
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(" Ask ")
        .border_style(Style::default().fg(border_color));

    if disabled {
        block = block.title_top(
            Line::from(Span::styled(" waiting for reply ", theme::input::DISABLED_HINT))
                .alignment(Alignment::Right),
        );
    }

    let cursor_style = if focused && !disabled {
        theme::palette::CURSOR
    } else {
        Style::default()
    };
    input.textarea.set_cursor_style(cursor_style);
    input.textarea.set_block(block);

    frame.render_widget(&input.textarea, area);
    area
}

#[cfg(test)]
#[path = "input_render_tests.rs"]
mod input_render_tests;
