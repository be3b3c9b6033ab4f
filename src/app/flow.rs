//! The demystify flow: selection + credential in, one completion per distinct
//! pair, [`FlowState`] out.
//!
//! Every change of an input starts a new run and bumps the run token. A run
//! executes the blocking client on its own thread and reports back over a
//! channel; [`DemystifyFlow::poll`] applies a report only if its token is still
//! current. In-flight requests are never cancelled, their results are simply
//! dropped once superseded.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use secrecy::SecretString;

use dm_base::constants::FAILED_MESSAGE;
use dm_base::state::{FlowState, Selection};

use super::prompt_builder::build_prompt;
use crate::llms::{CompletionClient, CompletionError};

/// Configuration owned by the flow. Updated only through
/// [`DemystifyFlow::set_credential`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub credential: String,
}

/// Result of one run, tagged with the token it was started under
struct RunReport {
    token: u64,
    result: Result<String, CompletionError>,
}

pub struct DemystifyFlow {
    client: Arc<dyn CompletionClient>,
    config: Config,
    selection: Selection,
    state: FlowState,
    /// Token of the most recent evaluation; reports carrying another token are stale
    token: u64,
    stale_dropped: u64,
    tx: Sender<RunReport>,
    rx: Receiver<RunReport>,
}

impl DemystifyFlow {
    pub fn new(client: Arc<dyn CompletionClient>, config: Config) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            config,
            selection: Selection::empty(),
            state: FlowState::Idle,
            token: 0,
            stale_dropped: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn credential(&self) -> &str {
        &self.config.credential
    }

    /// Number of run reports discarded because a newer run had started
    #[cfg(test)]
    pub fn stale_dropped(&self) -> u64 {
        self.stale_dropped
    }

    /// Replace the selection. Returns `false` (and does nothing) when the text
    /// is identical to the current one.
    pub fn set_selection(&mut self, selection: Selection) -> bool {
        if selection == self.selection {
            return false;
        }
        self.selection = selection;
        self.evaluate();
        true
    }

    /// Replace the credential. Returns `false` (and does nothing) when unchanged.
    pub fn set_credential(&mut self, credential: impl Into<String>) -> bool {
        let credential = credential.into();
        if credential == self.config.credential {
            return false;
        }
        self.config.credential = credential;
        self.evaluate();
        true
    }

    /// Start over from the current inputs: Idle if either is empty, otherwise
    /// Loading with exactly one request issued.
    fn evaluate(&mut self) {
        self.token += 1;

        if self.selection.is_empty() || self.config.credential.is_empty() {
            tracing::debug!(
                token = self.token,
                has_selection = !self.selection.is_empty(),
                has_credential = !self.config.credential.is_empty(),
                "flow idle"
            );
            self.state = FlowState::Idle;
            return;
        }

        self.state = FlowState::Loading;
        tracing::info!(token = self.token, selection_chars = self.selection.as_str().chars().count(), "flow loading");

        let token = self.token;
        let prompt = build_prompt(&self.selection);
        let credential = SecretString::from(self.config.credential.clone());
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();

        thread::spawn(move || {
            let result = client.complete(&prompt, &credential);
            // The flow may be gone by now
            let _ = tx.send(RunReport { token, result });
        });
    }

    /// Apply any finished runs without blocking. Returns whether the state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(report) = self.rx.try_recv() {
            changed |= self.apply(report);
        }
        changed
    }

    /// Block until the current run leaves Loading or `timeout` elapses.
    /// Returns `true` when the state is no longer Loading.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.state.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.rx.recv_timeout(remaining) {
                Ok(report) => {
                    self.apply(report);
                }
                Err(_) => return false,
            }
        }
        true
    }

    fn apply(&mut self, report: RunReport) -> bool {
        if report.token != self.token {
            self.stale_dropped += 1;
            tracing::debug!(stale = report.token, current = self.token, dropped = self.stale_dropped, "dropping superseded run");
            return false;
        }

        self.state = match report.result {
            Ok(text) => FlowState::Succeeded { explanation: text.trim().to_string() },
            Err(e) => {
                tracing::warn!(token = report.token, error = %e, "completion failed");
                FlowState::Failed { message: FAILED_MESSAGE.to_string() }
            }
        };
        tracing::info!(token = report.token, state = self.state.label(), "flow finished");
        true
    }
}
