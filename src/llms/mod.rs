//! Completion provider layer.
//!
//! One trait, one production implementation (OpenAI text completions). The
//! flow only sees [`CompletionClient`], so tests swap in scripted clients.

pub mod error;
pub mod openai;

use secrecy::SecretString;

pub use error::CompletionError;
pub use openai::OpenAiClient;

/// Issues one completion request and returns the answer text.
///
/// Implementations perform exactly one outbound call per invocation, with no
/// retries. Called from a background thread, hence `Send + Sync`.
pub trait CompletionClient: Send + Sync {
    fn complete(&self, prompt: &str, credential: &SecretString) -> Result<String, CompletionError>;
}
