//! Application state snapshot produced by the reducer.

use crate::model::message::ViewMode;
use crate::model::note::NoteId;
use crate::model::notebook::Notebook;
use crate::search::substring::search;
use crate::selection::Selection;
use crate::viewport::Viewport;

/// Complete editor state. Replaced wholesale on every message.
///
/// Read-only outside the reducer; renderers borrow it through the getters.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub(crate) notebook: Notebook,
    pub(crate) selection: Selection,
    pub(crate) viewport: Viewport,
    pub(crate) view_mode: ViewMode,
    pub(crate) sidebar_visible: bool,
    pub(crate) search_query: String,
    pub(crate) search_results: Vec<NoteId>,
    pub(crate) editing_note: Option<NoteId>,
    pub(crate) dirty: bool,
    pub(crate) error: Option<String>,
}

impl AppState {
    /// Fresh state around an existing notebook. Nothing selected, not dirty.
    pub fn new(notebook: Notebook) -> Self {
        Self {
            notebook,
            selection: Selection::None,
            viewport: Viewport::default(),
            view_mode: ViewMode::default(),
            sidebar_visible: true,
            search_query: String::new(),
            search_results: Vec::new(),
            editing_note: None,
            dirty: false,
            error: None,
        }
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Matching note ids for the current query, in notebook order.
    pub fn search_results(&self) -> &[NoteId] {
        &self.search_results
    }

    pub fn editing_note(&self) -> Option<&NoteId> {
        self.editing_note.as_ref()
    }

    /// `true` when the notebook changed since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Recomputes `search_results` for the stored query.
    pub(crate) fn refresh_search(mut self) -> Self {
        self.search_results = search(&self.notebook, &self.search_query);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Notebook::default())
    }
}
