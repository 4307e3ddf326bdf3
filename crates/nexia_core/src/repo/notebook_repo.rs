//! Notebook repository: note CRUD and link/backlink maintenance.
//!
//! # Responsibility
//! - Provide the only mutation paths for notes inside a [`Notebook`].
//! - Keep the backlink index consistent with outgoing links.
//!
//! # Invariants
//! - Every operation consumes the aggregate and returns the next one; callers
//!   never observe a half-applied change.
//! - Operations on unknown ids are no-ops, never errors.
//! - `add_link` is atomic: both notes must exist, otherwise nothing changes.
//! - `remove_note` prunes the removed id from backlinks AND from every other
//!   note's outgoing links, so link symmetry holds after deletes.

use crate::model::note::{Note, NoteId, Timestamp};
use crate::model::notebook::Notebook;
use log::{debug, warn};

/// Appends `note` keyed by its id and refreshes the notebook timestamp.
///
/// A duplicate id leaves the notes map untouched. Carried links are kept
/// only when they target a note already in the notebook; self links and
/// repeats are dropped.
pub fn add_note(mut notebook: Notebook, mut note: Note, now: Timestamp) -> Notebook {
    if notebook.notes.contains_key(&note.id) {
        warn!(
            "event=note_add module=repo status=noop reason=duplicate_id note_id={}",
            note.id
        );
        notebook.modified_at = now;
        return notebook;
    }

    let carried = note.links.len();
    let mut links: Vec<NoteId> = Vec::with_capacity(carried);
    for target in note.links.drain(..) {
        if target != note.id && notebook.notes.contains_key(&target) && !links.contains(&target) {
            links.push(target);
        }
    }
    if links.len() < carried {
        debug!(
            "event=note_add module=repo status=filtered note_id={} dropped_links={}",
            note.id,
            carried - links.len()
        );
    }
    note.links = links;

    for target in &note.links {
        let sources = notebook.backlinks.entry(target.clone()).or_default();
        if !sources.contains(&note.id) {
            sources.push(note.id.clone());
        }
    }

    notebook.notes.insert(note.id.clone(), note);
    notebook.modified_at = now;
    notebook
}

/// Replaces the note `id` with `transform(note)` and stamps it with `now`.
///
/// The note keeps its id and links whatever the transform does. Unknown ids
/// return the notebook unchanged.
pub fn update_note<F>(mut notebook: Notebook, id: &NoteId, now: Timestamp, transform: F) -> Notebook
where
    F: FnOnce(Note) -> Note,
{
    let Some(slot) = notebook.notes.get_mut(id) else {
        debug!("event=note_update module=repo status=noop reason=not_found note_id={id}");
        return notebook;
    };

    let current = std::mem::replace(slot, Note::new(id.clone(), "", now));
    let links = current.links.clone();
    let mut next = transform(current);
    next.id = id.clone();
    next.links = links;
    next.modified_at = now;
    *slot = next;

    notebook.modified_at = now;
    notebook
}

/// Deletes note `id` and every link that touches it.
pub fn remove_note(mut notebook: Notebook, id: &NoteId, now: Timestamp) -> Notebook {
    let removed = notebook.notes.shift_remove(id);
    notebook.backlinks.shift_remove(id);

    for sources in notebook.backlinks.values_mut() {
        sources.retain(|source| source != id);
    }
    notebook.backlinks.retain(|_, sources| !sources.is_empty());

    for note in notebook.notes.values_mut() {
        note.links.retain(|target| target != id);
    }

    if removed.is_none() {
        debug!("event=note_remove module=repo status=noop reason=not_found note_id={id}");
    }
    notebook.modified_at = now;
    notebook
}

/// Adds the edge `from -> to` once.
///
/// Self links and edges touching unknown notes are rejected silently.
pub fn add_link(mut notebook: Notebook, from: &NoteId, to: &NoteId, now: Timestamp) -> Notebook {
    if from == to {
        debug!("event=link_add module=repo status=noop reason=self_link note_id={from}");
        return notebook;
    }
    if !notebook.notes.contains_key(to) {
        debug!("event=link_add module=repo status=noop reason=target_not_found note_id={to}");
        return notebook;
    }
    let Some(source) = notebook.notes.get_mut(from) else {
        debug!("event=link_add module=repo status=noop reason=source_not_found note_id={from}");
        return notebook;
    };

    let mut changed = false;
    if !source.links.contains(to) {
        source.links.push(to.clone());
        source.modified_at = now;
        changed = true;
    }

    let sources = notebook.backlinks.entry(to.clone()).or_default();
    if !sources.contains(from) {
        sources.push(from.clone());
        changed = true;
    }

    if changed {
        notebook.modified_at = now;
    }
    notebook
}

/// Removes the edge `from -> to` if present. Safe on missing edges.
pub fn remove_link(mut notebook: Notebook, from: &NoteId, to: &NoteId, now: Timestamp) -> Notebook {
    let mut changed = false;

    if let Some(source) = notebook.notes.get_mut(from) {
        if let Some(index) = source.links.iter().position(|target| target == to) {
            source.links.remove(index);
            source.modified_at = now;
            changed = true;
        }
    }

    if let Some(sources) = notebook.backlinks.get_mut(to) {
        if let Some(index) = sources.iter().position(|source| source == from) {
            sources.remove(index);
            changed = true;
        }
        if sources.is_empty() {
            notebook.backlinks.shift_remove(to);
        }
    }

    if changed {
        notebook.modified_at = now;
    }
    notebook
}

#[cfg(test)]
mod tests {
    use super::{add_link, add_note, remove_link, remove_note, update_note};
    use crate::model::note::{Note, NoteId};
    use crate::model::notebook::Notebook;

    fn id(value: &str) -> NoteId {
        NoteId::from(value)
    }

    fn seeded(ids: &[&str]) -> Notebook {
        ids.iter().fold(Notebook::new("Test", 0), |notebook, value| {
            add_note(notebook, Note::new(id(value), *value, 1), 1)
        })
    }

    #[test]
    fn add_note_keeps_insertion_order() {
        let notebook = seeded(&["c", "a", "b"]);
        assert_eq!(notebook.note_ids(), vec![id("c"), id("a"), id("b")]);
        assert_eq!(notebook.modified_at, 1);
    }

    #[test]
    fn add_note_drops_self_dangling_and_repeated_links() {
        let notebook = seeded(&["b"]);
        let mut note = Note::new(id("a"), "a", 2);
        note.links = vec![id("a"), id("ghost"), id("b"), id("b")];

        let notebook = add_note(notebook, note, 2);

        assert_eq!(notebook.get(&id("a")).expect("note a").links, vec![id("b")]);
        assert_eq!(notebook.backlinks_of(&id("b")), &[id("a")]);
        assert!(notebook.backlinks_of(&id("a")).is_empty());
        assert!(notebook.backlinks_of(&id("ghost")).is_empty());
        assert!(notebook.check_link_symmetry().is_ok());
    }

    #[test]
    fn add_note_with_duplicate_id_keeps_original() {
        let notebook = seeded(&["a"]);
        let notebook = add_note(notebook, Note::new(id("a"), "other", 9), 9);
        assert_eq!(notebook.len(), 1);
        assert_eq!(notebook.get(&id("a")).expect("note a").title, "a");
    }

    #[test]
    fn update_note_forces_modified_at_and_keeps_id_and_links() {
        let notebook = seeded(&["a"]);
        let notebook = update_note(notebook, &id("a"), 50, |mut note| {
            note.title = "renamed".to_string();
            note.id = NoteId::from("hijacked");
            note.links.push(NoteId::from("ghost"));
            note.modified_at = 0;
            note
        });

        let note = notebook.get(&id("a")).expect("note a");
        assert_eq!(note.title, "renamed");
        assert_eq!(note.id, id("a"));
        assert!(note.links.is_empty());
        assert_eq!(note.modified_at, 50);
        assert_eq!(note.created_at, 1);
        assert_eq!(notebook.modified_at, 50);
    }

    #[test]
    fn update_missing_note_is_noop() {
        let notebook = seeded(&["a"]);
        let expected = notebook.clone();
        let notebook = update_note(notebook, &id("missing"), 50, |note| note);
        assert_eq!(notebook, expected);
    }

    #[test]
    fn add_link_requires_both_notes() {
        let notebook = seeded(&["a"]);
        let expected = notebook.clone();

        let notebook = add_link(notebook, &id("a"), &id("ghost"), 5);
        assert_eq!(notebook, expected);

        let notebook = add_link(notebook, &id("ghost"), &id("a"), 5);
        assert_eq!(notebook, expected);
        assert!(notebook.backlinks_of(&id("a")).is_empty());
    }

    #[test]
    fn remove_link_drops_empty_backlink_entries() {
        let notebook = add_link(seeded(&["a", "b"]), &id("a"), &id("b"), 2);
        let notebook = remove_link(notebook, &id("a"), &id("b"), 3);

        assert!(notebook.get(&id("a")).expect("note a").links.is_empty());
        assert!(notebook.backlinks.is_empty());
        assert_eq!(notebook.modified_at, 3);
    }

    #[test]
    fn remove_missing_note_still_refreshes_timestamp() {
        let notebook = seeded(&["a"]);
        let notebook = remove_note(notebook, &id("ghost"), 77);
        assert_eq!(notebook.len(), 1);
        assert_eq!(notebook.modified_at, 77);
    }
}
