//! Candidate review: per-candidate view/edit/commit state.
//!
//! A [`ReviewSession`] holds one [`ReviewItem`] per candidate translation of
//! a source sentence. Items move between `Viewing` and `Editing`; committing
//! from either state records the text as accepted, returns the item to
//! `Viewing`, and starts a background save.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use rendition::diff::DiffOptions;
//! use rendition::review::ReviewSession;
//! use rendition::store::TextFileStore;
//!
//! # async fn example() -> rendition::Result<()> {
//! let mut session = ReviewSession::new(
//!     "The cat sat on the mat",
//!     vec!["O gato sentou no tapete", "A gata sentou-se no tapete"],
//!     Arc::new(TextFileStore::new("translation.txt")),
//!     DiffOptions::default(),
//! );
//!
//! session.start_edit(1)?;
//! let save = session.commit(1, "A gata sentou no tapete")?;
//!
//! // The item already shows the committed text; the save may still be running.
//! assert_eq!(session.item(1)?.text(), "A gata sentou no tapete");
//! save.outcome().await?;
//! # Ok(())
//! # }
//! ```

mod commit;
mod item;
mod session;

pub use commit::PendingSave;
pub use item::{ItemView, ReviewItem, ReviewState};
pub use session::ReviewSession;
