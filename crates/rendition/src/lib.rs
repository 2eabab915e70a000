//! Rendition: diff-and-review engine for machine translation candidates.
//!
//! A reviewer compares a source sentence against several generated
//! candidates, sees how each one differs from the source, edits any of them
//! in place, and commits one as the accepted translation.
//!
//! # Core Principles
//!
//! - **Deterministic diffs**: Same inputs always produce the same segments
//! - **Optimistic commits**: The review state updates before the save lands
//! - **Pluggable collaborators**: Generation, storage, sentences and prompt
//!   are traits with file, network and in-memory implementations
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rendition::{MockProvider, ModelSelector, Rendition, TextFileStore};
//!
//! let rendition = Rendition::new(
//!     Arc::new(MockProvider::new()),
//!     Arc::new(TextFileStore::new("translation.txt")),
//! );
//! let session = rendition
//!     .review("The cat sat on the mat", vec![], ModelSelector::Primary)
//!     .unwrap();
//!
//! for item in session.items() {
//!     println!("{}: {}", item.index(), item.render().to_html());
//! }
//! ```

pub mod diff;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod review;
pub mod sentences;
pub mod store;

mod rendition;

pub use crate::rendition::{Rendition, RenditionConfig};
pub use diff::{DiffOptions, DiffSegment, Granularity, Markup, SegmentKind};
pub use error::{RenditionError, Result};
pub use llm::{
    GeminiProvider, GenerationRequest, LlmConfig, MockProvider, ModelSelector, OllamaProvider,
    TranslationProvider,
};
pub use prompt::{FilePrompt, MemoryPrompt, PromptStore};
pub use review::{ItemView, PendingSave, ReviewItem, ReviewSession, ReviewState};
pub use sentences::{Direction, SentenceCursor, SentenceList, SentenceSource};
pub use store::{AcceptedTranslation, JsonlStore, MemoryStore, TextFileStore, TranslationStore};
