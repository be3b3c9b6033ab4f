//! File-based persistence. Only settings are persisted; explanations are not.
pub mod config;

pub use config::ConfigStore;
