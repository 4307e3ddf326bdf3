//! Reducer: the single state-transition entry point.
//!
//! # Responsibility
//! - Define the application state snapshot.
//! - Expose `apply`, a total function over every [`Message`] variant.
//!
//! # See also
//! - [`crate::service::session`] for the dispatch loop that feeds it.
//!
//! [`Message`]: crate::model::message::Message

mod dispatch;
pub mod state;

pub use dispatch::{apply, DEFAULT_NOTE_TITLE};
pub use state::AppState;
