//! Candidate generation through LLM providers.
//!
//! A provider takes a [`GenerationRequest`] (source sentence, few-shot
//! examples, model selector, instructions) and returns a fixed number of
//! candidate translations.
//!
//! # Supported Providers
//!
//! - **Gemini** - Google models via API (requires `GEMINI_API_KEY`)
//! - **Ollama** - Local models, no API key needed (requires Ollama installed)
//! - **Mock** - Deterministic candidates for tests and offline use
//!
//! # Example
//!
//! ```no_run
//! use rendition::llm::{GenerationRequest, ModelSelector, OllamaProvider, TranslationProvider};
//!
//! let provider = OllamaProvider::new().unwrap();
//! let request = GenerationRequest::new("The cat sat on the mat")
//!     .with_model(ModelSelector::Primary);
//! let candidates = provider.generate(&request).unwrap();
//! ```

mod gemini;
mod mock;
mod ollama;
mod prompts;
mod provider;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use prompts::{parse_candidates, system_prompt, translation_prompt};
pub use provider::{GenerationRequest, LlmConfig, ModelSelector, TranslationProvider};
