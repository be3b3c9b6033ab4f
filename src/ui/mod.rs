mod content;
mod helpers;
mod highlight;
mod markdown;
mod settings;
mod theme;

use ratatui::{prelude::*, widgets::Block};

use dm_base::config::{THEME, UI};

use crate::app::flow::DemystifyFlow;
use crate::state::State;

pub fn render(frame: &mut Frame, state: &mut State, flow: &DemystifyFlow) {
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(theme::bg_base())), area);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, state, main_layout[0]);
    if state.show_settings {
        settings::render_settings(frame, flow.credential(), main_layout[1]);
    } else {
        content::render_content(frame, state, flow.state(), main_layout[1]);
    }
    render_status_bar(frame, state, main_layout[2]);
}

fn render_header(frame: &mut Frame, state: &State, area: Rect) {
    let base = Style::default().bg(theme::bg_base());
    let mut left = vec![Span::styled(format!(" {} ", UI.title), base.fg(theme::accent()).bold())];
    if let Some(source) = &state.source_label {
        left.push(Span::styled(format!("[{source}]"), base.fg(theme::text_muted())));
    }

    // Gear is highlighted while settings are open
    let gear_style = if state.show_settings { base.fg(theme::accent()).bold() } else { base.fg(theme::text_secondary()) };
    let gear = Span::styled(format!("{} ", THEME.icons.settings), gear_style);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(gear.width() as u16)])
        .split(area);
    frame.render_widget(Line::from(left).style(base), layout[0]);
    frame.render_widget(Line::from(gear).style(base), layout[1]);
}

fn render_status_bar(frame: &mut Frame, state: &State, area: Rect) {
    let hints = if state.show_settings { &UI.status.settings } else { &UI.status.popup };
    let line = Line::from(Span::styled(hints.clone(), Style::default().fg(theme::text_muted())))
        .style(Style::default().bg(theme::bg_base()));
    frame.render_widget(line, area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use ratatui::backend::TestBackend;
    use secrecy::SecretString;

    use dm_base::state::Selection;

    use super::*;
    use crate::app::flow::Config;
    use crate::llms::{CompletionClient, CompletionError};

    struct Canned(Result<String, ()>);

    impl CompletionClient for Canned {
        fn complete(&self, _prompt: &str, _credential: &SecretString) -> Result<String, CompletionError> {
            self.0.clone().map_err(|_| CompletionError::Transport("boom".into()))
        }
    }

    fn draw(state: &mut State, flow: &DemystifyFlow) -> String {
        draw_sized(state, flow, 60, 12)
    }

    fn draw_sized(state: &mut State, flow: &DemystifyFlow, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state, flow)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn flow_with(result: Result<String, ()>, credential: &str) -> DemystifyFlow {
        DemystifyFlow::new(Arc::new(Canned(result)), Config { credential: credential.into() })
    }

    #[test]
    fn idle_shows_placeholder_and_title() {
        let flow = flow_with(Ok(String::new()), "");
        let out = draw(&mut State::new(Some("tmux".into())), &flow);
        assert!(out.contains("Demystify code"));
        assert!(out.contains("[tmux]"));
        assert!(out.contains("Select some code to demystify it."));
    }

    #[test]
    fn loading_shows_spinner_text() {
        let mut flow = flow_with(Ok("x".into()), "sk");
        flow.set_selection(Selection::new("let a = 1;"));
        let out = draw(&mut State::new(None), &flow);
        // The canned client may already have answered, but poll was not called
        assert!(out.contains("Demystifying..."));
    }

    #[test]
    fn success_renders_markdown() {
        let mut flow = flow_with(Ok("## What it does\n- binds **a**".into()), "sk");
        flow.set_selection(Selection::new("let a = 1;"));
        assert!(flow.wait(Duration::from_secs(5)));
        let out = draw(&mut State::new(None), &flow);
        assert!(out.contains("What it does"));
        assert!(out.contains("• binds a"));
        assert!(!out.contains("**"));
    }

    #[test]
    fn failure_shows_fixed_message() {
        let mut flow = flow_with(Err(()), "sk");
        flow.set_selection(Selection::new("let a = 1;"));
        assert!(flow.wait(Duration::from_secs(5)));
        let out = draw(&mut State::new(None), &flow);
        assert!(out.contains("Request failed. Validate your OpenAI API key."));
    }

    #[test]
    fn settings_mask_the_key() {
        let flow = flow_with(Ok(String::new()), "sk-secret");
        let mut state = State::new(None);
        state.show_settings = true;
        let out = draw(&mut state, &flow);
        assert!(out.contains("OpenAI API Key:"));
        assert!(out.contains("•••••••••"));
        assert!(!out.contains("sk-secret"));
    }

    #[test]
    fn long_output_sets_max_scroll() {
        let body = (0..40).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let mut flow = flow_with(Ok(body), "sk");
        flow.set_selection(Selection::new("x"));
        assert!(flow.wait(Duration::from_secs(5)));
        let mut state = State::new(None);
        state.scroll = 500;
        draw(&mut state, &flow);
        assert!(state.max_scroll > 0);
        assert_eq!(state.scroll, state.max_scroll);
    }

    #[test]
    fn word_wrapped_tail_is_reachable() {
        // Long words wrap earlier than a character count suggests
        let mut body: Vec<String> = (0..6)
            .map(|i| {
                ["a", "b", "c", "d"]
                    .iter()
                    .map(|c| format!("w{i}{}", c.repeat(17)))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        body.push("THE_END".to_string());
        assert_eq!(body[0].chars().count(), 79);

        let mut flow = flow_with(Ok(body.join("\n")), "sk");
        flow.set_selection(Selection::new("x"));
        assert!(flow.wait(Duration::from_secs(5)));

        let mut state = State::new(None);
        state.scroll = u16::MAX;
        let out = draw_sized(&mut state, &flow, 40, 12);
        assert_eq!(state.scroll, state.max_scroll);
        assert!(out.contains("THE_END"), "last line not visible at max scroll:\n{out}");
    }
}
