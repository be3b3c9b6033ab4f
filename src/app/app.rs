use std::io;
use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::prelude::*;

use dm_base::constants::{EVENT_POLL_MS, SPINNER_FRAME_MS};
use dm_mod_selection::{Tab, TabHost};

use super::actions::{Action, apply_credential_edit};
use super::events::handle_event;
use super::flow::DemystifyFlow;
use crate::state::State;
use crate::state::persistence::ConfigStore;
use crate::ui;

pub struct App {
    pub state: State,
    flow: DemystifyFlow,
    store: ConfigStore,
    host: Box<dyn TabHost>,
    /// Explicitly requested tab; `None` follows the host's active tab
    tab: Option<Tab>,
    last_spinner: Instant,
}

impl App {
    pub fn new(flow: DemystifyFlow, store: ConfigStore, host: Box<dyn TabHost>, tab: Option<Tab>) -> Self {
        let source_label = tab.as_ref().or(host.active_tab().as_ref()).map(|t| t.kind.name().to_string());
        Self { state: State::new(source_label), flow, store, host, tab, last_spinner: Instant::now() }
    }

    /// Opening the popup: without a key, show settings and stop there;
    /// otherwise capture the selection, which starts the flow.
    pub fn start(&mut self) {
        if self.flow.credential().is_empty() {
            tracing::info!("no credential stored, opening settings");
            self.state.show_settings = true;
            self.state.dirty = true;
            return;
        }
        self.reread_selection();
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        loop {
            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                let evt = event::read()?;
                let Some(action) = handle_event(&evt, &self.state) else {
                    break;
                };
                self.handle_action(action);
                self.state.dirty = true;
            }

            if self.flow.poll() {
                self.state.reset_scroll();
            }
            self.tick_spinner();

            if self.state.dirty {
                terminal.draw(|frame| ui::render(frame, &mut self.state, &self.flow))?;
                self.state.dirty = false;
            }
        }
        Ok(())
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::ToggleSettings => {
                self.state.show_settings = !self.state.show_settings;
            }
            Action::EditCredential(edit) => {
                let credential = apply_credential_edit(self.flow.credential(), &edit);
                if self.flow.set_credential(credential.clone()) {
                    self.store.set(&credential);
                    self.state.reset_scroll();
                }
            }
            Action::ScrollUp(n) => self.state.scroll_up(n),
            Action::ScrollDown(n) => self.state.scroll_down(n),
            Action::ScrollTop => self.state.reset_scroll(),
            Action::RereadSelection => self.reread_selection(),
        }
        self.state.dirty = true;
    }

    fn reread_selection(&mut self) {
        let selection = dm_mod_selection::read(self.host.as_ref(), self.tab.as_ref());
        if self.flow.set_selection(selection) {
            self.state.reset_scroll();
        }
        self.state.dirty = true;
    }

    fn tick_spinner(&mut self) {
        if !self.flow.state().is_loading() {
            return;
        }
        if self.last_spinner.elapsed() >= Duration::from_millis(SPINNER_FRAME_MS) {
            self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
            self.last_spinner = Instant::now();
            self.state.dirty = true;
        }
    }
}
