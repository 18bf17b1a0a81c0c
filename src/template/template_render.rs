//! Template outline rendering

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::template_state::EmailTemplate;
use crate::theme;

/// Build the outline lines for a template
pub fn template_lines(template: &EmailTemplate) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if !template.subject.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Subject: ", Style::default().fg(theme::template::LABEL)),
            Span::styled(
                template.subject.clone(),
                Style::default().fg(theme::palette::TEXT),
            ),
        ]));
        lines.push(Line::from(""));
    }

    if template.blocks.is_empty() {
        lines.push(Line::from(Span::styled(
            "No blocks yet. Ask the assistant for some.",
            Style::default().fg(theme::palette::TEXT_DIM),
        )));
        return lines;
    }

    for (i, block) in template.blocks.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>2}. ", i + 1),
                Style::default().fg(theme::palette::TEXT_DIM),
            ),
            Span::styled(
                format!("[{}]", block.kind().as_str().to_uppercase()),
                Style::default()
                    .fg(theme::template::TYPE_TAG)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                block.summary().to_string(),
                Style::default().fg(theme::palette::TEXT),
            ),
        ]));
    }

    lines
}

/// Render the template pane
pub fn render_template(frame: &mut Frame, area: Rect, template: &EmailTemplate, dirty: bool) {
    let title = if dirty {
        format!(" {} (modified) ", template.name)
    } else {
        format!(" {} ", template.name)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme::template::BORDER));

    let paragraph = Paragraph::new(template_lines(template))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{create_button_block, create_title_block};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_template_shows_hint() {
        let lines = template_lines(&EmailTemplate::untitled());
        assert_eq!(lines.len(), 1);
        assert!(line_text(&lines[0]).contains("No blocks yet"));
    }

    #[test]
    fn test_blocks_are_numbered_in_order() {
        let mut template = EmailTemplate::untitled();
        template.blocks.push(create_title_block("Featured Product"));
        template.blocks.push(create_button_block("Shop Now", "#"));

        let lines = template_lines(&template);
        assert_eq!(line_text(&lines[0]), " 1. [TITLE] Featured Product");
        assert_eq!(line_text(&lines[1]), " 2. [BUTTON] Shop Now");
    }

    #[test]
    fn test_subject_line_comes_first() {
        let mut template = EmailTemplate::untitled();
        template.subject = "Big news".to_string();
        let lines = template_lines(&template);
        assert_eq!(line_text(&lines[0]), "Subject: Big news");
    }
}
