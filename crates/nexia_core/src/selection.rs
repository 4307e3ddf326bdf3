//! Selection state machine.
//!
//! # Invariants
//! - `Multiple` always holds two or more distinct ids.
//! - Any transition that leaves one id collapses to `Single`, zero ids to
//!   `None`.

use crate::model::note::NoteId;

/// Notes currently targeted by user actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Single(NoteId),
    /// Two or more distinct ids in selection order.
    Multiple(Vec<NoteId>),
}

impl Selection {
    /// Builds a selection from `ids`, dropping duplicates and normalizing by
    /// size.
    pub fn from_ids(ids: impl IntoIterator<Item = NoteId>) -> Self {
        let mut unique: Vec<NoteId> = Vec::new();
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self::normalized(unique)
    }

    fn normalized(mut ids: Vec<NoteId>) -> Self {
        match ids.len() {
            0 => Self::None,
            1 => Self::Single(ids.remove(0)),
            _ => Self::Multiple(ids),
        }
    }

    /// Replaces any selection with `id` alone.
    pub fn select(self, id: NoteId) -> Self {
        Self::Single(id)
    }

    /// Extends the selection with `id`, keeping existing order.
    pub fn add(self, id: NoteId) -> Self {
        match self {
            Self::None => Self::Single(id),
            Self::Single(current) if current == id => Self::Single(current),
            Self::Single(current) => Self::Multiple(vec![current, id]),
            Self::Multiple(mut ids) => {
                if !ids.contains(&id) {
                    ids.push(id);
                }
                Self::Multiple(ids)
            }
        }
    }

    pub fn clear(self) -> Self {
        Self::None
    }

    /// Selects every id in `all_ids`, in the given order.
    pub fn select_all(self, all_ids: Vec<NoteId>) -> Self {
        Self::from_ids(all_ids)
    }

    /// Drops `id` from the selection and re-normalizes by size.
    pub fn remove(self, id: &NoteId) -> Self {
        match self {
            Self::Single(current) if current == *id => Self::None,
            Self::Multiple(mut ids) => {
                ids.retain(|selected| selected != id);
                Self::normalized(ids)
            }
            other => other,
        }
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        match self {
            Self::None => false,
            Self::Single(current) => current == id,
            Self::Multiple(ids) => ids.contains(id),
        }
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> Vec<NoteId> {
        match self {
            Self::None => Vec::new(),
            Self::Single(id) => vec![id.clone()],
            Self::Multiple(ids) => ids.clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(_) => 1,
            Self::Multiple(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use crate::model::note::NoteId;

    fn id(value: &str) -> NoteId {
        NoteId::from(value)
    }

    #[test]
    fn select_replaces_any_state() {
        let multiple = Selection::Multiple(vec![id("a"), id("b")]);
        assert_eq!(multiple.select(id("c")), Selection::Single(id("c")));
        assert_eq!(Selection::None.select(id("a")), Selection::Single(id("a")));
    }

    #[test]
    fn add_grows_single_into_multiple() {
        let selection = Selection::None.add(id("a"));
        assert_eq!(selection, Selection::Single(id("a")));

        let selection = selection.add(id("a"));
        assert_eq!(selection, Selection::Single(id("a")));

        let selection = selection.add(id("b")).add(id("c")).add(id("b"));
        assert_eq!(selection, Selection::Multiple(vec![id("a"), id("b"), id("c")]));
    }

    #[test]
    fn select_all_normalizes_by_size() {
        assert_eq!(Selection::None.select_all(Vec::new()), Selection::None);
        assert_eq!(
            Selection::None.select_all(vec![id("a")]),
            Selection::Single(id("a"))
        );
        assert_eq!(
            Selection::Single(id("z")).select_all(vec![id("a"), id("b")]),
            Selection::Multiple(vec![id("a"), id("b")])
        );
    }

    #[test]
    fn remove_collapses_multiple_to_single() {
        let selection = Selection::Multiple(vec![id("a"), id("b")]).remove(&id("b"));
        assert_eq!(selection, Selection::Single(id("a")));
        assert_eq!(selection.remove(&id("a")), Selection::None);
    }

    #[test]
    fn remove_of_unselected_id_is_noop() {
        let selection = Selection::Single(id("a")).remove(&id("b"));
        assert_eq!(selection, Selection::Single(id("a")));
        assert_eq!(Selection::None.remove(&id("a")), Selection::None);
    }

    #[test]
    fn clear_always_empties() {
        let selection = Selection::Multiple(vec![id("a"), id("b")]).clear();
        assert!(selection.is_empty());
        assert_eq!(selection.len(), 0);
    }
}
