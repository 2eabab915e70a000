//! API request handlers.

mod notifications;
mod prompt;
mod sentence;
mod session;
mod translate;

pub use notifications::*;
pub use prompt::*;
pub use sentence::*;
pub use session::*;
pub use translate::*;
