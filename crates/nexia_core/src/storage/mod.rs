//! Notebook persistence collaborator.
//!
//! # Responsibility
//! - Define the `Storage` contract used by the dispatch loop.
//! - Provide a JSON file implementation.
//!
//! # Invariants
//! - The reducer never calls storage; results re-enter as messages.
//! - Loaded notebooks always satisfy link symmetry (backlinks are rebuilt).

use crate::model::notebook::Notebook;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

mod json;

pub use json::JsonStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from loading or saving a notebook.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Target file does not exist.
    NotFound(PathBuf),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::Json(err) => write!(f, "JSON serialization error: {err}"),
            Self::NotFound(path) => write!(f, "File not found: {}", path.display()),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Notebook persistence contract.
pub trait Storage {
    fn save(&self, notebook: &Notebook, path: &Path) -> StorageResult<()>;
    fn load(&self, path: &Path) -> StorageResult<Notebook>;
}
