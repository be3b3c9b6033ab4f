//! OpenAI text completion client.
//!
//! Sends the prompt to the legacy `/v1/completions` endpoint with fixed,
//! deterministic sampling parameters and returns `choices[0].text`, trimmed.


use std::env;

use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use dm_base::constants::{COMPLETION_ENDPOINT, COMPLETION_MODEL, ENDPOINT_ENV, MAX_TOKENS, MODEL_ENV};

use super::{CompletionClient, CompletionError};

/// Blocking OpenAI client. Cheap to share behind an `Arc`.
pub struct OpenAiClient {
    http: Client,
    endpoint: String,
    model: String,
}

impl OpenAiClient {
    /// Endpoint and model from `DEMYSTIFY_API_ENDPOINT` / `DEMYSTIFY_MODEL`
    /// (a `.env` file is honoured), falling back to the OpenAI defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self::with_endpoint(
            var(ENDPOINT_ENV).unwrap_or_else(|| COMPLETION_ENDPOINT.to_string()),
            var(MODEL_ENV).unwrap_or_else(|| COMPLETION_MODEL.to_string()),
        )
    }

    pub fn with_endpoint(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self { http: Client::new(), endpoint: endpoint.into(), model: model.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::from_env()
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: u32,
    top_p: u32,
    presence_penalty: u32,
    frequency_penalty: u32,
    max_tokens: u32,
    prompt: &'a str,
}

impl<'a> CompletionRequest<'a> {
    fn new(model: &'a str, prompt: &'a str) -> Self {
        Self { model, temperature: 0, top_p: 1, presence_penalty: 0, frequency_penalty: 0, max_tokens: MAX_TOKENS, prompt }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

/// Extract the trimmed text of the first choice from a response body.
pub fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let response: CompletionResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::ResponseShape(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text.trim().to_string())
        .ok_or_else(|| CompletionError::ResponseShape("response has no choices".to_string()))
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, prompt: &str, credential: &SecretString) -> Result<String, CompletionError> {
        let request = CompletionRequest::new(&self.model, prompt);

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, prompt_chars = prompt.len(), "sending completion request");

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", credential.expose_secret()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(CompletionError::status(status.as_u16(), &body));
        }

        let text = parse_completion(&body)?;
        tracing::debug!(answer_chars = text.len(), "completion received");
        Ok(text)
    }
}
