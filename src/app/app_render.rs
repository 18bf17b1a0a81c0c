use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app_state::{App, Focus};
use crate::assistant::assistant_render::render_conversation;
use crate::input::input_render::render_field;
use crate::notification::render_notification;
use crate::template::render_template;
use crate::theme;
use crate::widgets::popup;

const CONFIRM_TEXT: &str = "Replace the whole template with these blocks?";

const INPUT_HINTS: &[(&str, &str)] = &[
    ("Enter", "send"),
    ("Tab", "suggestions"),
    ("Ctrl+R", "reset"),
    ("Ctrl+S", "save"),
    ("Esc", "quit"),
];

const SUGGESTION_HINTS: &[(&str, &str)] = &[
    ("↑↓", "select"),
    ("a", "add block"),
    ("A", "apply all"),
    ("Tab", "input"),
    ("Esc", "quit"),
];

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let [main_area, hints_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());
        let [template_area, assistant_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(main_area);
        let [conversation_area, input_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(assistant_area);

        let editor = self.panel.host();
        render_template(frame, template_area, editor.template(), editor.is_dirty());

        let store = self.panel.store();
        render_conversation(
            frame,
            conversation_area,
            store.messages(),
            store.is_generating(),
            self.selection.get_selected(),
            self.focus == Focus::Suggestions,
        );

        let generating = self.is_generating();
        render_field(
            &mut self.input,
            frame,
            input_area,
            self.focus == Focus::InputField,
            generating,
        );

        render_hints(frame, hints_area, self.focus);

        if self.pending_apply.is_some() {
            render_confirm_popup(frame);
        }

        render_notification(frame, &mut self.notification);
    }
}

fn render_hints(frame: &mut Frame, area: Rect, focus: Focus) {
    let hints = match focus {
        Focus::InputField => INPUT_HINTS,
        Focus::Suggestions => SUGGESTION_HINTS,
    };

    let mut spans = Vec::new();
    for (i, (key, description)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme::hints::KEY)));
        spans.push(Span::styled(format!(" {}", description), theme::hints::DESCRIPTION));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_confirm_popup(frame: &mut Frame) {
    let width = CONFIRM_TEXT.len() as u16 + 6;
    let area = popup::centered_popup(frame.area(), width, 6);
    popup::clear_area(frame, area);

    let lines = vec![
        Line::from(Span::styled(
            CONFIRM_TEXT,
            Style::default().fg(theme::confirm::TEXT),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", theme::confirm::KEY),
            Span::styled(" confirm   ", Style::default().fg(theme::confirm::TEXT)),
            Span::styled("any other key", theme::confirm::KEY),
            Span::styled(" cancel", Style::default().fg(theme::confirm::TEXT)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Apply to template ")
        .border_style(Style::default().fg(theme::confirm::BORDER))
        .style(Style::default().bg(theme::confirm::BACKGROUND));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
