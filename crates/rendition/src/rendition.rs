//! Main Rendition struct and public API.

use std::sync::Arc;

use tracing::{info, warn};

use crate::diff::DiffOptions;
use crate::error::Result;
use crate::llm::{GenerationRequest, ModelSelector, TranslationProvider};
use crate::prompt::PromptStore;
use crate::review::ReviewSession;
use crate::store::TranslationStore;

/// Configuration for loading review sessions.
#[derive(Debug, Clone)]
pub struct RenditionConfig {
    /// How candidates are compared against the source.
    pub diff: DiffOptions,
    /// Most recent accepted pairs passed to the generator as examples
    /// (None = all).
    pub max_examples: Option<usize>,
}

impl Default for RenditionConfig {
    fn default() -> Self {
        Self {
            diff: DiffOptions::default(),
            max_examples: Some(50),
        }
    }
}

/// Ties a generator, a store and an optional prompt together to produce
/// review sessions.
pub struct Rendition {
    config: RenditionConfig,
    provider: Arc<dyn TranslationProvider>,
    store: Arc<dyn TranslationStore>,
    prompt: Option<Arc<dyn PromptStore>>,
}

impl Rendition {
    /// Create with default configuration.
    pub fn new(
        provider: Arc<dyn TranslationProvider>,
        store: Arc<dyn TranslationStore>,
    ) -> Self {
        Self::with_config(provider, store, RenditionConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(
        provider: Arc<dyn TranslationProvider>,
        store: Arc<dyn TranslationStore>,
        config: RenditionConfig,
    ) -> Self {
        Self {
            config,
            provider,
            store,
            prompt: None,
        }
    }

    /// Read instructions for every request from this prompt store.
    pub fn with_prompt(mut self, prompt: Arc<dyn PromptStore>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// The configured provider.
    pub fn provider(&self) -> &Arc<dyn TranslationProvider> {
        &self.provider
    }

    /// The configured store.
    pub fn store(&self) -> &Arc<dyn TranslationStore> {
        &self.store
    }

    /// The configured prompt store, if any.
    pub fn prompt(&self) -> Option<&Arc<dyn PromptStore>> {
        self.prompt.as_ref()
    }

    /// Current configuration.
    pub fn config(&self) -> &RenditionConfig {
        &self.config
    }

    /// Build the generation request for `source`, pulling examples from the
    /// store and instructions from the prompt store.
    pub fn request_for(
        &self,
        source: &str,
        prior_translations: Vec<String>,
        model: ModelSelector,
    ) -> Result<GenerationRequest> {
        let mut examples = self.store.entries()?;
        if let Some(max) = self.config.max_examples {
            let skip = examples.len().saturating_sub(max);
            examples.drain(..skip);
        }

        let mut request = GenerationRequest::new(source)
            .with_examples(examples)
            .with_prior_translations(prior_translations)
            .with_model(model);

        if let Some(prompt) = &self.prompt {
            match prompt.get() {
                Ok(text) => request = request.with_instructions(text),
                Err(e) => warn!(error = %e, "could not read instructions, continuing without"),
            }
        }

        Ok(request)
    }

    /// Generate candidates for `source` and open a review session on them.
    ///
    /// On failure nothing is created; any session the caller already holds
    /// is unaffected.
    pub fn review(
        &self,
        source: &str,
        prior_translations: Vec<String>,
        model: ModelSelector,
    ) -> Result<ReviewSession> {
        let request = self.request_for(source, prior_translations, model)?;
        let candidates = self.provider.generate(&request)?;

        info!(
            provider = self.provider.name(),
            model = %model,
            candidates = candidates.len(),
            "generated candidates"
        );

        Ok(self.session(source, candidates))
    }

    /// Open a review session on candidates obtained elsewhere.
    pub fn session(&self, source: &str, candidates: Vec<String>) -> ReviewSession {
        ReviewSession::new(
            source,
            candidates,
            Arc::clone(&self.store),
            self.config.diff.clone(),
        )
    }
}
