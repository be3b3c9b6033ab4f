use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};

use dm_base::config::UI;

use super::helpers::mask;
use super::theme;

/// Settings form: a single masked field for the API key.
pub fn render_settings(frame: &mut Frame, credential: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::border_focus()))
        .style(Style::default().bg(theme::bg_surface()))
        .padding(Padding::new(1, 1, 1, 0));

    let field = format!(" {}", mask(credential, &UI.settings.mask));
    let lines = vec![
        Line::from(Span::styled(UI.settings.label.clone(), Style::default().fg(theme::text()).bold())),
        Line::from(vec![
            Span::styled(field, Style::default().fg(theme::text()).bg(theme::bg_input())),
            Span::styled("▏", Style::default().fg(theme::accent()).bg(theme::bg_input())),
        ]),
        Line::from(""),
        Line::from(Span::styled(UI.settings.hint.clone(), Style::default().fg(theme::text_muted()))),
    ];

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}
