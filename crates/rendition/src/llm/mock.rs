//! Mock provider for testing and offline use.

use crate::error::{RenditionError, Result};

use super::provider::{GenerationRequest, LlmConfig, ModelSelector, TranslationProvider};

/// Provider that returns predictable candidates without any network access.
pub struct MockProvider {
    config: LlmConfig,
    fixed: Option<Vec<String>>,
    failure: Option<String>,
}

impl MockProvider {
    /// Create a new mock provider.
    pub fn new() -> Self {
        Self::with_config(LlmConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(config: LlmConfig) -> Self {
        Self {
            config,
            fixed: None,
            failure: None,
        }
    }

    /// Always return these candidates.
    pub fn with_candidates<S: Into<String>>(candidates: impl IntoIterator<Item = S>) -> Self {
        let fixed: Vec<String> = candidates.into_iter().map(Into::into).collect();
        let config = LlmConfig {
            candidate_count: fixed.len(),
            ..LlmConfig::default()
        };
        Self {
            config,
            fixed: Some(fixed),
            failure: None,
        }
    }

    /// Always fail with a generation error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            config: LlmConfig::default(),
            fixed: None,
            failure: Some(message.into()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationProvider for MockProvider {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>> {
        if let Some(message) = &self.failure {
            return Err(RenditionError::Generation(message.clone()));
        }
        if let Some(fixed) = &self.fixed {
            return Ok(fixed.clone());
        }
        if request.source.trim().is_empty() {
            return Err(RenditionError::Generation("No sentence provided".to_string()));
        }

        // Variations: the sentence itself, then tagged copies so every
        // candidate differs from the source in a predictable place.
        let tag = match request.model {
            ModelSelector::Primary => "variant",
            ModelSelector::Fallback => "fallback",
        };
        let candidates = (0..self.config.candidate_count)
            .map(|i| {
                if i == 0 {
                    request.source.clone()
                } else {
                    format!("{} ({} {})", request.source, tag, i)
                }
            })
            .collect();

        Ok(candidates)
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_generates_configured_count() {
        let provider = MockProvider::new();
        let candidates = provider
            .generate(&GenerationRequest::new("The cat sat"))
            .unwrap();

        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0], "The cat sat");
        assert_eq!(candidates[2], "The cat sat (variant 2)");
    }

    #[test]
    fn test_mock_model_selector() {
        let provider = MockProvider::new();
        let request = GenerationRequest::new("Hi").with_model(ModelSelector::Fallback);
        let candidates = provider.generate(&request).unwrap();
        assert_eq!(candidates[1], "Hi (fallback 1)");
    }

    #[test]
    fn test_fixed_and_failing() {
        let fixed = MockProvider::with_candidates(["a", "b"]);
        assert_eq!(fixed.generate(&GenerationRequest::new("x")).unwrap(), vec!["a", "b"]);
        assert_eq!(fixed.config().candidate_count, 2);

        let failing = MockProvider::failing("service unavailable");
        let err = failing.generate(&GenerationRequest::new("x")).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "Generation error: service unavailable");
    }

    #[test]
    fn test_empty_sentence_rejected() {
        let provider = MockProvider::new();
        assert!(provider.generate(&GenerationRequest::new("  ")).is_err());
    }
}
