//! `--print` mode: run the flow once without a terminal UI.
use std::process::ExitCode;
use std::time::Duration;

use dm_base::state::{FlowState, Selection};

use super::flow::DemystifyFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// What the process should print, where, and whether it succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOutcome {
    pub stream: Stream,
    pub text: String,
    pub success: bool,
}

impl PrintOutcome {
    fn out(text: impl Into<String>) -> Self {
        Self { stream: Stream::Stdout, text: text.into(), success: true }
    }

    fn err(text: impl Into<String>) -> Self {
        Self { stream: Stream::Stderr, text: text.into(), success: false }
    }

    /// Print the text and return the exit code
    pub fn emit(&self) -> ExitCode {
        match self.stream {
            Stream::Stdout => println!("{}", self.text),
            Stream::Stderr => eprintln!("{}", self.text),
        }
        if self.success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    }
}

/// Feed `selection` to the flow and wait up to `timeout` for the answer.
pub fn run(flow: &mut DemystifyFlow, selection: Selection, timeout: Duration) -> PrintOutcome {
    flow.set_selection(selection);
    flow.wait(timeout);

    match flow.state() {
        FlowState::Succeeded { explanation } => PrintOutcome::out(explanation.clone()),
        FlowState::Failed { message } => PrintOutcome::err(message.clone()),
        FlowState::Idle if flow.selection().is_empty() => PrintOutcome::err("Nothing selected."),
        FlowState::Idle => {
            PrintOutcome::err("No OpenAI API key stored. Run demystify and press Ctrl+S to add one.")
        }
        FlowState::Loading => {
            tracing::warn!(timeout_secs = timeout.as_secs_f64(), "no answer before timeout");
            PrintOutcome::err(format!("Timed out after {}s.", timeout.as_secs()))
        }
    }
}
