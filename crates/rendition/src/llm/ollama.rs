//! Candidate generation through a local Ollama server.
//!
//! Requests go to `/api/chat` in JSON mode, so the model's reply is the
//! `{"translations": [...]}` object `parse_candidates` expects without any
//! code fences around it.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RenditionError, Result};

use super::prompts;
use super::provider::{GenerationRequest, LlmConfig, TranslationProvider};

/// Used when `OLLAMA_HOST` is not set.
const DEFAULT_HOST: &str = "http://localhost:11434";

/// Local models are slow to load on first use.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Translation provider backed by Ollama. Needs no API key.
pub struct OllamaProvider {
    client: Client,
    chat_url: String,
    config: LlmConfig,
}

impl OllamaProvider {
    /// qwen2.5 as primary and llama3.2 as fallback; both must be pulled.
    pub fn new() -> Result<Self> {
        Self::with_config(LlmConfig {
            primary_model: "qwen2.5".to_string(),
            fallback_model: "llama3.2".to_string(),
            ..LlmConfig::default()
        })
    }

    /// Use `model` for both the primary and the fallback selector.
    pub fn with_model(model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        Self::with_config(LlmConfig {
            primary_model: model.clone(),
            fallback_model: model,
            ..LlmConfig::default()
        })
    }

    pub fn with_config(config: LlmConfig) -> Result<Self> {
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Self::with_host(&host, config)
    }

    /// Talk to the server at `host`, e.g. `http://10.0.0.5:11434`.
    pub fn with_host(host: &str, config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RenditionError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            chat_url: chat_url(host),
            config,
        })
    }

    fn chat_body<'a>(&'a self, model: &'a str, system: &'a str, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model,
            stream: false,
            format: "json",
            options: ChatOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        }
    }
}

impl TranslationProvider for OllamaProvider {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>> {
        let model = self.config.model_for(request.model);
        let system = prompts::system_prompt(&self.config);
        let user = prompts::translation_prompt(request, &self.config);

        debug!(model, url = %self.chat_url, "requesting candidates from Ollama");
        let response = self
            .client
            .post(&self.chat_url)
            .json(&self.chat_body(model, &system, &user))
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    RenditionError::Generation(format!(
                        "Cannot reach Ollama at {}; start it with `ollama serve`",
                        self.chat_url
                    ))
                } else {
                    RenditionError::Generation(format!("Ollama request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(status_error(status, &body, model));
        }

        let reply: ChatResponse = response.json().map_err(|e| {
            RenditionError::Generation(format!("Unexpected Ollama response: {}", e))
        })?;
        prompts::parse_candidates(&reply.message.content, self.config.candidate_count)
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

fn chat_url(host: &str) -> String {
    format!("{}/api/chat", host.trim().trim_end_matches('/'))
}

/// A missing model is the common failure, so it gets an actionable message.
fn status_error(status: StatusCode, body: &str, model: &str) -> RenditionError {
    if status == StatusCode::NOT_FOUND || body.contains("not found") {
        RenditionError::Generation(format!(
            "Ollama has no model '{}'; pull it with `ollama pull {}`",
            model, model
        ))
    } else {
        RenditionError::Generation(format!("Ollama error ({}): {}", status, body))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    stream: bool,
    format: &'static str,
    options: ChatOptions,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f64,
    num_predict: usize,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: String,
}
