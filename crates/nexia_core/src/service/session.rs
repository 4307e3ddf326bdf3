//! Editor session: the dispatch loop around the reducer.
//!
//! # Responsibility
//! - Own the current `AppState` and the notebook file path.
//! - Run persistence commands (`SaveNotebook`, `SaveNotebookAs`,
//!   `LoadNotebook`) after the reducer has seen them, translating outcomes
//!   into `NotebookSaved`, `NotebookLoaded` or `SetError` messages.
//!
//! # Invariants
//! - Exactly one reducer call runs at a time; follow-up messages are applied
//!   before `dispatch` returns.
//! - Storage failures never panic; they surface through the state error slot.

use crate::env::Environment;
use crate::model::message::Message;
use crate::reducer::{apply, AppState};
use crate::storage::Storage;
use log::{error, info};
use std::path::{Path, PathBuf};

/// Error text shown when saving before any path is known.
pub const NO_FILE_PATH_ERROR: &str = "No file path specified";

enum Command {
    Save,
    SaveAs(PathBuf),
    Load(PathBuf),
    ForgetPath,
}

impl Command {
    fn from_message(message: &Message) -> Option<Self> {
        match message {
            Message::SaveNotebook => Some(Self::Save),
            Message::SaveNotebookAs(path) => Some(Self::SaveAs(path.clone())),
            Message::LoadNotebook(path) => Some(Self::Load(path.clone())),
            Message::NewNotebook => Some(Self::ForgetPath),
            _ => None,
        }
    }
}

/// Dispatch loop over one notebook, its file and its collaborators.
pub struct Session<S: Storage, E: Environment> {
    state: AppState,
    path: Option<PathBuf>,
    storage: S,
    env: E,
}

impl<S: Storage, E: Environment> Session<S, E> {
    /// Starts a session with an empty notebook and no file path.
    pub fn new(storage: S, env: E) -> Self {
        Self::with_state(AppState::default(), storage, env)
    }

    pub fn with_state(state: AppState, storage: S, env: E) -> Self {
        Self {
            state,
            path: None,
            storage,
            env,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Applies `message`, then performs any persistence it requests.
    pub fn dispatch(&mut self, message: Message) -> &AppState {
        let command = Command::from_message(&message);
        self.reduce(message);

        match command {
            Some(Command::Save) => self.save(),
            Some(Command::SaveAs(path)) => {
                self.path = Some(path);
                self.save();
            }
            Some(Command::Load(path)) => self.load(path),
            Some(Command::ForgetPath) => self.path = None,
            None => {}
        }

        &self.state
    }

    fn reduce(&mut self, message: Message) {
        let state = std::mem::take(&mut self.state);
        self.state = apply(state, message, &mut self.env);
    }

    fn save(&mut self) {
        let Some(path) = self.path.clone() else {
            error!("event=notebook_save module=session status=error reason=no_path");
            self.reduce(Message::SetError(NO_FILE_PATH_ERROR.to_string()));
            return;
        };

        match self.storage.save(self.state.notebook(), &path) {
            Ok(()) => {
                info!("event=notebook_save module=session status=ok");
                self.reduce(Message::NotebookSaved);
            }
            Err(err) => {
                error!("event=notebook_save module=session status=error error={err}");
                self.reduce(Message::SetError(err.to_string()));
            }
        }
    }

    fn load(&mut self, path: PathBuf) {
        match self.storage.load(&path) {
            Ok(notebook) => {
                info!("event=notebook_load module=session status=ok");
                self.path = Some(path);
                self.reduce(Message::NotebookLoaded(Box::new(notebook)));
            }
            Err(err) => {
                error!("event=notebook_load module=session status=error error={err}");
                self.reduce(Message::SetError(err.to_string()));
            }
        }
    }
}
