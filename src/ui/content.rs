use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};

use dm_base::config::{THEME, UI};
use dm_base::state::FlowState;

use super::helpers::wrap_text;
use super::markdown::render_markdown;
use super::theme;
use crate::state::State;

/// Content pane: one rendering per flow state
pub fn render_content(frame: &mut Frame, state: &mut State, flow_state: &FlowState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::border()))
        .style(Style::default().bg(theme::bg_surface()))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    let width = inner.width as usize;

    let lines: Vec<Line<'static>> = match flow_state {
        FlowState::Loading => {
            let frames = &UI.spinner;
            let glyph = frames.get(state.spinner_frame % frames.len().max(1)).cloned().unwrap_or_default();
            vec![Line::from(vec![
                Span::styled(format!("{glyph} "), Style::default().fg(theme::accent())),
                Span::styled(UI.loading.clone(), Style::default().fg(theme::text_secondary())),
            ])]
        }
        FlowState::Failed { message } => wrap_text(message, width.saturating_sub(2))
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let icon = if i == 0 { format!("{} ", THEME.icons.error) } else { "  ".to_string() };
                Line::from(vec![
                    Span::styled(icon, Style::default().fg(theme::error())),
                    Span::styled(text, Style::default().fg(theme::error())),
                ])
            })
            .collect(),
        FlowState::Succeeded { explanation } => render_markdown(explanation),
        FlowState::Idle => wrap_text(&UI.placeholder, width)
            .into_iter()
            .map(|text| Line::from(Span::styled(text, Style::default().fg(theme::text_muted()).italic())))
            .collect(),
    };

    // Row count comes from the same word wrapper that renders the pane
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let total = paragraph.line_count(inner.width);
    state.max_scroll = total.saturating_sub(inner.height as usize).min(u16::MAX as usize) as u16;
    state.scroll = state.scroll.min(state.max_scroll);

    frame.render_widget(block, area);
    frame.render_widget(paragraph.scroll((state.scroll, 0)), inner);
}
