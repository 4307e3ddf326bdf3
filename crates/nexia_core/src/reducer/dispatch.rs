//! Total message dispatch over [`AppState`].
//!
//! # Responsibility
//! - Map `(state, message)` to the next state by composing the repository,
//!   selection, viewport and search components.
//! - Own cross-cutting bookkeeping: `dirty`, `editing_note`, `error`.
//!
//! # Invariants
//! - Never fails and never panics; unknown ids leave the state unchanged.
//! - `dirty` is raised only when the notebook actually changed and lowered
//!   only by `NotebookSaved`, `NotebookLoaded` and `NewNotebook`.
//! - Time and ids come from the supplied environment, never from ambient
//!   globals.
//! - Persistence messages are identity here; the dispatch loop performs them.

use crate::env::Environment;
use crate::model::message::Message;
use crate::model::note::{Note, NoteId, Point, Size, Timestamp};
use crate::model::notebook::{Notebook, DEFAULT_NOTEBOOK_NAME};
use crate::reducer::state::AppState;
use crate::repo::notebook_repo;
use log::{debug, trace};

/// Title given to notes created from the UI.
pub const DEFAULT_NOTE_TITLE: &str = "New Note";

/// Applies one message and returns the next state.
pub fn apply<E>(state: AppState, message: Message, env: &mut E) -> AppState
where
    E: Environment + ?Sized,
{
    trace!("event=message_apply module=reducer name={}", message.name());

    match message {
        Message::CreateNote => create_note(state, None, env),
        Message::CreateNoteAt(position) => create_note(state, Some(position), env),
        Message::DeleteNote(id) => delete_note(state, &id, env.now()),
        Message::DeleteSelectedNotes => {
            let now = env.now();
            let ids = state.selection.ids();
            debug!(
                "event=notes_delete_selected module=reducer count={}",
                ids.len()
            );
            ids.iter().fold(state, |state, id| delete_note(state, id, now))
        }
        Message::UpdateNoteTitle(id, title) => {
            update_existing(state, &id, env.now(), true, |note| Note { title, ..note })
        }
        Message::UpdateNoteContent(id, content) => {
            update_existing(state, &id, env.now(), true, |note| Note { content, ..note })
        }
        Message::StartEditingNote(id) => {
            if state.notebook.contains(&id) {
                AppState {
                    editing_note: Some(id),
                    ..state
                }
            } else {
                state
            }
        }
        Message::StopEditingNote => AppState {
            editing_note: None,
            ..state
        },
        Message::MoveNote(id, position) => {
            update_existing(state, &id, env.now(), false, |note| Note {
                position: Some(position),
                ..note
            })
        }
        Message::ResizeNote(id, width, height) => {
            update_existing(state, &id, env.now(), false, |note| Note {
                size: Some(Size::new(width, height)),
                ..note
            })
        }
        Message::LinkNotes { from, to } => {
            if !link_would_change(&state.notebook, &from, &to) {
                return state;
            }
            let notebook = notebook_repo::add_link(state.notebook, &from, &to, env.now());
            AppState {
                notebook,
                dirty: true,
                ..state
            }
        }
        Message::UnlinkNotes { from, to } => {
            if !unlink_would_change(&state.notebook, &from, &to) {
                return state;
            }
            let notebook = notebook_repo::remove_link(state.notebook, &from, &to, env.now());
            AppState {
                notebook,
                dirty: true,
                ..state
            }
        }
        Message::SelectNote(id) => {
            if !state.notebook.contains(&id) {
                return state;
            }
            AppState {
                selection: state.selection.select(id),
                ..state
            }
        }
        Message::AddToSelection(id) => {
            if !state.notebook.contains(&id) {
                return state;
            }
            AppState {
                selection: state.selection.add(id),
                ..state
            }
        }
        Message::ClearSelection => AppState {
            selection: state.selection.clear(),
            ..state
        },
        Message::SelectAll => {
            let all_ids = state.notebook.note_ids();
            AppState {
                selection: state.selection.select_all(all_ids),
                ..state
            }
        }
        Message::SetViewMode(view_mode) => AppState { view_mode, ..state },
        Message::ToggleSidebar => AppState {
            sidebar_visible: !state.sidebar_visible,
            ..state
        },
        Message::PanCanvas { dx, dy } => AppState {
            viewport: state.viewport.pan(dx, dy),
            ..state
        },
        Message::ZoomCanvas(factor) => AppState {
            viewport: state.viewport.zoom_by(factor),
            ..state
        },
        Message::ResetViewport => AppState {
            viewport: state.viewport.reset(),
            ..state
        },
        Message::SetSearchQuery(search_query) => AppState {
            search_query,
            ..state
        }
        .refresh_search(),
        Message::ClearSearch => AppState {
            search_query: String::new(),
            search_results: Vec::new(),
            ..state
        },
        Message::NewNotebook => {
            debug!("event=notebook_new module=reducer status=ok");
            AppState {
                view_mode: state.view_mode,
                sidebar_visible: state.sidebar_visible,
                ..AppState::new(Notebook::new(DEFAULT_NOTEBOOK_NAME, env.now()))
            }
        }
        Message::SaveNotebook | Message::SaveNotebookAs(_) | Message::LoadNotebook(_) => state,
        Message::NotebookLoaded(notebook) => {
            debug!(
                "event=notebook_loaded module=reducer status=ok notes={}",
                notebook.len()
            );
            AppState {
                notebook: *notebook,
                selection: state.selection.clear(),
                editing_note: None,
                dirty: false,
                ..state
            }
            .refresh_search()
        }
        Message::NotebookSaved => AppState {
            dirty: false,
            ..state
        },
        Message::SetError(error) => AppState {
            error: Some(error),
            ..state
        },
        Message::ClearError => AppState {
            error: None,
            ..state
        },
        Message::NoOp => state,
    }
}

fn create_note<E>(state: AppState, position: Option<Point>, env: &mut E) -> AppState
where
    E: Environment + ?Sized,
{
    let id = env.fresh();
    let now = env.now();
    let mut note = Note::new(id.clone(), DEFAULT_NOTE_TITLE, now);
    note.position = position;

    debug!("event=note_create module=reducer status=ok note_id={id}");
    let notebook = notebook_repo::add_note(state.notebook, note, now);
    AppState {
        notebook,
        selection: state.selection.select(id.clone()),
        editing_note: Some(id),
        dirty: true,
        ..state
    }
    .refresh_search()
}

fn delete_note(state: AppState, id: &NoteId, now: Timestamp) -> AppState {
    if !state.notebook.contains(id) {
        debug!("event=note_delete module=reducer status=noop note_id={id}");
        return state;
    }

    let notebook = notebook_repo::remove_note(state.notebook, id, now);
    let editing_note = state.editing_note.filter(|editing| editing != id);
    let mut search_results = state.search_results;
    search_results.retain(|hit| hit != id);

    AppState {
        notebook,
        selection: state.selection.remove(id),
        editing_note,
        search_results,
        dirty: true,
        ..state
    }
}

fn update_existing<F>(
    state: AppState,
    id: &NoteId,
    now: Timestamp,
    affects_search: bool,
    transform: F,
) -> AppState
where
    F: FnOnce(Note) -> Note,
{
    if !state.notebook.contains(id) {
        debug!("event=note_update module=reducer status=noop note_id={id}");
        return state;
    }

    let notebook = notebook_repo::update_note(state.notebook, id, now, transform);
    let next = AppState {
        notebook,
        dirty: true,
        ..state
    };
    if affects_search {
        next.refresh_search()
    } else {
        next
    }
}

fn link_would_change(notebook: &Notebook, from: &NoteId, to: &NoteId) -> bool {
    if from == to || !notebook.contains(to) {
        return false;
    }
    notebook
        .get(from)
        .is_some_and(|note| !note.links_to(to) || !notebook.backlinks_of(to).contains(from))
}

fn unlink_would_change(notebook: &Notebook, from: &NoteId, to: &NoteId) -> bool {
    notebook.get(from).is_some_and(|note| note.links_to(to))
        || notebook.backlinks_of(to).contains(from)
}
