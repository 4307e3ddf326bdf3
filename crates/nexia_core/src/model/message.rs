//! Message vocabulary consumed by the reducer.
//!
//! # Responsibility
//! - Enumerate every user/system intent the engine reacts to.
//!
//! # Invariants
//! - The reducer matches this enum exhaustively; adding a variant must fail
//!   to compile until the reducer handles it.

use crate::model::note::{NoteId, Point};
use crate::model::notebook::Notebook;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the notebook is presented. Pass-through state for renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    List,
    #[default]
    Canvas,
    Graph,
}

/// Discrete intent delivered to [`crate::reducer::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    CreateNote,
    CreateNoteAt(Point),
    DeleteNote(NoteId),
    DeleteSelectedNotes,
    UpdateNoteTitle(NoteId, String),
    UpdateNoteContent(NoteId, String),
    StartEditingNote(NoteId),
    StopEditingNote,
    MoveNote(NoteId, Point),
    ResizeNote(NoteId, f64, f64),
    LinkNotes { from: NoteId, to: NoteId },
    UnlinkNotes { from: NoteId, to: NoteId },
    SelectNote(NoteId),
    AddToSelection(NoteId),
    ClearSelection,
    SelectAll,
    SetViewMode(ViewMode),
    ToggleSidebar,
    PanCanvas { dx: f64, dy: f64 },
    ZoomCanvas(f64),
    ResetViewport,
    SetSearchQuery(String),
    ClearSearch,
    NewNotebook,
    /// Handled by the persistence collaborator; identity in the reducer.
    SaveNotebook,
    /// Handled by the persistence collaborator; identity in the reducer.
    SaveNotebookAs(PathBuf),
    /// Handled by the persistence collaborator; identity in the reducer.
    LoadNotebook(PathBuf),
    NotebookLoaded(Box<Notebook>),
    NotebookSaved,
    SetError(String),
    ClearError,
    NoOp,
}

impl Message {
    /// Stable event name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateNote => "create_note",
            Self::CreateNoteAt(_) => "create_note_at",
            Self::DeleteNote(_) => "delete_note",
            Self::DeleteSelectedNotes => "delete_selected_notes",
            Self::UpdateNoteTitle(..) => "update_note_title",
            Self::UpdateNoteContent(..) => "update_note_content",
            Self::StartEditingNote(_) => "start_editing_note",
            Self::StopEditingNote => "stop_editing_note",
            Self::MoveNote(..) => "move_note",
            Self::ResizeNote(..) => "resize_note",
            Self::LinkNotes { .. } => "link_notes",
            Self::UnlinkNotes { .. } => "unlink_notes",
            Self::SelectNote(_) => "select_note",
            Self::AddToSelection(_) => "add_to_selection",
            Self::ClearSelection => "clear_selection",
            Self::SelectAll => "select_all",
            Self::SetViewMode(_) => "set_view_mode",
            Self::ToggleSidebar => "toggle_sidebar",
            Self::PanCanvas { .. } => "pan_canvas",
            Self::ZoomCanvas(_) => "zoom_canvas",
            Self::ResetViewport => "reset_viewport",
            Self::SetSearchQuery(_) => "set_search_query",
            Self::ClearSearch => "clear_search",
            Self::NewNotebook => "new_notebook",
            Self::SaveNotebook => "save_notebook",
            Self::SaveNotebookAs(_) => "save_notebook_as",
            Self::LoadNotebook(_) => "load_notebook",
            Self::NotebookLoaded(_) => "notebook_loaded",
            Self::NotebookSaved => "notebook_saved",
            Self::SetError(_) => "set_error",
            Self::ClearError => "clear_error",
            Self::NoOp => "noop",
        }
    }
}
