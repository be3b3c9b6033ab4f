//! Flow-facing value types shared between the flow, the UI, and the selection crate.

/// Observable status of the demystify flow.
///
/// Only the flow mutates it; the UI renders it with an exhaustive match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlowState {
    /// Nothing to do: selection or credential is empty
    #[default]
    Idle,
    /// A completion request for the current run is in flight
    Loading,
    /// The current run finished with an explanation (already trimmed)
    Succeeded { explanation: String },
    /// The current run failed; carries the user-facing message only
    Failed { message: String },
}

impl FlowState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FlowState::Loading)
    }

    /// Short lowercase name, used in logs
    pub fn label(&self) -> &'static str {
        match self {
            FlowState::Idle => "idle",
            FlowState::Loading => "loading",
            FlowState::Succeeded { .. } => "succeeded",
            FlowState::Failed { .. } => "failed",
        }
    }
}

/// Text captured from a selection source. Immutable once captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(String);

impl Selection {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Selection {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Selection {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}
