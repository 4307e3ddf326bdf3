//! Domain model for notes, notebooks and engine messages.
//!
//! # Responsibility
//! - Define canonical data structures used by the notebook engine.
//! - Keep serialization shape of notebooks stable for storage.
//!
//! # Invariants
//! - Every note is identified by an externally generated `NoteId`.
//! - Backlinks are derived data, always re-derivable from outgoing links.

pub mod message;
pub mod note;
pub mod notebook;
pub mod value;
