//! Core notebook engine for Nexia.
//! This crate is the single source of truth for note/link invariants and
//! the state transitions of the editor.

pub mod env;
pub mod logging;
pub mod model;
pub mod reducer;
pub mod repo;
pub mod search;
pub mod selection;
pub mod service;
pub mod storage;
pub mod viewport;

pub use env::{
    Clock, Env, Environment, FixedClock, IdGenerator, SequentialIdGenerator, SystemClock,
    UuidIdGenerator,
};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings};
pub use model::message::{Message, ViewMode};
pub use model::note::{Note, NoteId, Point, Size, Timestamp};
pub use model::notebook::{LinkViolation, Notebook, DEFAULT_NOTEBOOK_NAME};
pub use model::value::AttributeValue;
pub use reducer::{apply, AppState, DEFAULT_NOTE_TITLE};
pub use search::substring::{search, search_by_content, search_by_title};
pub use selection::Selection;
pub use service::session::{Session, NO_FILE_PATH_ERROR};
pub use storage::{JsonStorage, Storage, StorageError, StorageResult};
pub use viewport::{Viewport, MAX_ZOOM, MIN_ZOOM};

/// Minimal health-check API for front-end wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
