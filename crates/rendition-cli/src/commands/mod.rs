//! CLI command implementations.

pub mod diff;
pub mod serve;
pub mod status;
pub mod translate;

use std::path::Path;
use std::sync::Arc;

use colored::{ColoredString, Colorize};
use rendition::{
    DiffSegment, GeminiProvider, JsonlStore, LlmConfig, MockProvider, OllamaProvider,
    SegmentKind, TextFileStore, TranslationProvider, TranslationStore,
};

use crate::cli::LlmProviderChoice;

/// Build the provider selected on the command line.
pub fn build_provider(
    choice: &LlmProviderChoice,
    model: Option<String>,
) -> Result<Arc<dyn TranslationProvider>, Box<dyn std::error::Error>> {
    let provider: Arc<dyn TranslationProvider> = match choice {
        LlmProviderChoice::Mock => Arc::new(MockProvider::new()),
        LlmProviderChoice::Gemini => {
            let mut config = LlmConfig::default();
            if let Some(model) = model {
                config.primary_model = model;
            }
            Arc::new(GeminiProvider::from_env_with_config(config)?)
        }
        LlmProviderChoice::Ollama => match model {
            Some(model) => Arc::new(OllamaProvider::with_model(model)?),
            None => Arc::new(OllamaProvider::new()?),
        },
    };
    Ok(provider)
}

/// Open the store at `path`; `.jsonl` files use JSON Lines, anything else
/// the plain text log.
pub fn open_store(path: &Path) -> Arc<dyn TranslationStore> {
    if path.extension().map(|e| e == "jsonl").unwrap_or(false) {
        Arc::new(JsonlStore::new(path))
    } else {
        Arc::new(TextFileStore::new(path))
    }
}

/// Terminal rendering of diff segments: deletions red and struck through,
/// insertions green and underlined.
pub fn colorize(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .map(|segment| -> ColoredString {
            match segment.kind {
                SegmentKind::Equal => segment.text.normal(),
                SegmentKind::Deleted => segment.text.red().strikethrough(),
                SegmentKind::Inserted => segment.text.green().underline(),
            }
        })
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use rendition::AcceptedTranslation;

    use super::*;

    #[test]
    fn test_open_store_by_extension() {
        assert_eq!(open_store(Path::new("accepted.jsonl")).name(), "jsonl");
        assert_eq!(open_store(Path::new("translation.txt")).name(), "text");
    }

    #[test]
    fn test_open_store_writes_matching_format() {
        let dir = tempfile::TempDir::new().unwrap();
        let jsonl = dir.path().join("accepted.jsonl");
        let text = dir.path().join("translation.txt");

        for path in [&jsonl, &text] {
            let store = open_store(path);
            store
                .record(&AcceptedTranslation::new("Good morning", "Bom dia"))
                .unwrap();
            assert!(open_store(path).contains("Good morning").unwrap());
        }

        let line = std::fs::read_to_string(&jsonl).unwrap();
        assert!(line.starts_with("{\"original\":\"Good morning\""));
        let block = std::fs::read_to_string(&text).unwrap();
        assert_eq!(block, "Original: Good morning\nTranslation: Bom dia\n\n");
    }

    #[test]
    fn test_colorize_keeps_text() {
        colored::control::set_override(false);
        let segments = vec![
            DiffSegment::new(SegmentKind::Equal, "The "),
            DiffSegment::new(SegmentKind::Deleted, "cat"),
            DiffSegment::new(SegmentKind::Inserted, "dog"),
        ];
        assert_eq!(colorize(&segments), "The catdog");
    }
}
