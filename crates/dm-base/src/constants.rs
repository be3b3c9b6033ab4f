// =============================================================================
// COMPLETION API
// =============================================================================

/// Output token budget, sent as `max_tokens` and quoted in the prompt
pub const MAX_TOKENS: u32 = 1000;

/// OpenAI text completion endpoint
pub const COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1/completions";

/// Completion model identifier
pub const COMPLETION_MODEL: &str = "text-davinci-003";

/// Env override for the completion endpoint
pub const ENDPOINT_ENV: &str = "DEMYSTIFY_API_ENDPOINT";

/// Env override for the completion model
pub const MODEL_ENV: &str = "DEMYSTIFY_MODEL";

// =============================================================================
// FLOW
// =============================================================================

/// Message shown for any failed completion, whatever the cause
pub const FAILED_MESSAGE: &str = "Request failed. Validate your OpenAI API key.";

/// Literal reply the model is told to give for non-code selections
pub const NOT_CODE_REPLY: &str = "Selection does not appear to be code.";

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Directory name under the user config dir
pub const STORE_DIR_NAME: &str = "demystify";

/// Env override for the whole store directory
pub const STORE_DIR_ENV: &str = "DEMYSTIFY_STORE_DIR";

/// Key-value settings file
pub const CONFIG_FILE: &str = "config.json";

/// Storage key of the API credential
pub const CREDENTIAL_KEY: &str = "openAIAPIKey";

/// Log file written by the tracing subscriber
pub const LOG_FILE: &str = "demystify.log";

/// Panic logs directory
pub const ERRORS_DIR: &str = "errors";

/// Env var holding the tracing filter directive
pub const LOG_ENV: &str = "DEMYSTIFY_LOG";

// =============================================================================
// UI TIMING & SCROLLING
// =============================================================================

/// Input poll interval for the main loop
pub const EVENT_POLL_MS: u64 = 50;

/// Spinner frame interval while a request is in flight
pub const SPINNER_FRAME_MS: u64 = 80;

/// Scroll amount for arrow keys
pub const SCROLL_ARROW_AMOUNT: u16 = 1;

/// Scroll amount for PageUp/PageDown
pub const SCROLL_PAGE_AMOUNT: u16 = 10;
