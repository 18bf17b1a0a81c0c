//! Conversation pane rendering

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::message::{Message, Role};
use crate::theme;

pub const SUGGESTIONS_HEADER: &str = "AI GENERATED BLOCKS";
pub const GENERATING_TEXT: &str = "Generating suggestions...";

/// Conversation lines, already wrapped to the pane width
pub struct ConversationView {
    pub lines: Vec<Line<'static>>,
    /// Row of the selected suggestion's first line
    pub selected_row: Option<usize>,
}

/// Build the conversation lines, wrapped to `max_width` columns
///
/// `selected` is an index into the flattened list of suggested blocks.
pub fn conversation_lines(
    messages: &[Message],
    is_generating: bool,
    selected: Option<usize>,
    max_width: usize,
) -> ConversationView {
    let mut lines = Vec::new();
    let mut selected_row = None;
    let mut suggestion_index = 0;

    for message in messages {
        let (label, label_color) = match message.role {
            Role::User => ("You", theme::assistant::USER_LABEL),
            Role::Assistant => ("Assistant", theme::assistant::ASSISTANT_LABEL),
        };

        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        )));
        if !message.content.is_empty() {
            for text_line in wrap_text(&message.content, max_width.saturating_sub(2)) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", text_line),
                    Style::default().fg(theme::palette::TEXT),
                )));
            }
        }

        let blocks = message.suggestions.blocks();
        if !blocks.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", SUGGESTIONS_HEADER),
                Style::default().fg(theme::assistant::SUGGESTIONS_HEADER),
            )));
            for block in blocks {
                let is_selected = selected == Some(suggestion_index);
                if is_selected {
                    selected_row = Some(lines.len());
                }
                let bg = if is_selected {
                    theme::assistant::SUGGESTION_SELECTED_BG
                } else {
                    theme::palette::BG_DARK
                };
                let marker = if is_selected { "  ▸ " } else { "    " };
                let tag = format!("[{}]", block.kind().as_str().to_uppercase());
                // Summary continuation lines align under the first word
                let indent = 4 + tag.chars().count() + 1;
                let summary_lines = wrap_text(block.summary(), max_width.saturating_sub(indent));

                for (i, summary_line) in summary_lines.into_iter().enumerate() {
                    let mut spans = if i == 0 {
                        vec![
                            Span::styled(
                                marker,
                                Style::default().fg(theme::assistant::SUGGESTION_MARKER).bg(bg),
                            ),
                            Span::styled(
                                tag.clone(),
                                Style::default()
                                    .fg(theme::template::TYPE_TAG)
                                    .bg(bg)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(" ", Style::default().bg(bg)),
                        ]
                    } else {
                        vec![Span::styled(" ".repeat(indent), Style::default().bg(bg))]
                    };
                    spans.push(Span::styled(
                        summary_line,
                        Style::default().fg(theme::palette::TEXT).bg(bg),
                    ));
                    lines.push(Line::from(spans));
                }
                suggestion_index += 1;
            }
        }

        lines.push(Line::from(""));
    }

    if is_generating {
        lines.push(Line::from(Span::styled(
            GENERATING_TEXT,
            theme::assistant::GENERATING,
        )));
    }

    ConversationView {
        lines,
        selected_row,
    }
}

/// First visible row
///
/// Pinned to the newest lines, unless that would hide the selected suggestion.
fn scroll_offset(total: usize, visible: usize, selected_row: Option<usize>) -> usize {
    let bottom = total.saturating_sub(visible);
    match selected_row {
        Some(row) => row.min(bottom),
        None => bottom,
    }
}

/// Render the conversation pane
pub fn render_conversation(
    frame: &mut Frame,
    area: Rect,
    messages: &[Message],
    is_generating: bool,
    selected: Option<usize>,
    focused: bool,
) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let view = conversation_lines(messages, is_generating, selected, inner_width);

    let border_color = if focused {
        theme::assistant::BORDER_FOCUSED
    } else {
        theme::assistant::BORDER_UNFOCUSED
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(Span::styled(" Assistant ", theme::assistant::TITLE)))
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme::palette::BG_DARK));

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = scroll_offset(view.lines.len(), visible, view.selected_row) as u16;

    frame.render_widget(
        Paragraph::new(view.lines).block(block).scroll((scroll, 0)),
        area,
    );
}

/// Word-wrap text to `max_width` columns
///
/// Words longer than the width stay whole; the pane clips them.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();

    for paragraph in text.lines() {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.chars().count() + 1 + word.chars().count() <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current_line));
                current_line = word.to_string();
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
