//! Case-insensitive substring search over note title and content.
//!
//! `search` matches either field; `search_by_title` and `search_by_content`
//! narrow the match to one.
//!
//! # Invariants
//! - An empty query matches nothing.
//! - Hits are returned in notebook insertion order; there is no ranking.

use crate::model::note::{Note, NoteId};
use crate::model::notebook::Notebook;

/// Returns ids of notes whose title or content contains `query`,
/// ignoring case.
///
/// The query is used as typed: it is not trimmed or tokenized.
pub fn search(notebook: &Notebook, query: &str) -> Vec<NoteId> {
    search_with(notebook, query, |note, needle| {
        contains_folded(&note.title, needle) || contains_folded(&note.content, needle)
    })
}

/// Like [`search`], restricted to note titles.
pub fn search_by_title(notebook: &Notebook, query: &str) -> Vec<NoteId> {
    search_with(notebook, query, |note, needle| {
        contains_folded(&note.title, needle)
    })
}

/// Like [`search`], restricted to note content.
pub fn search_by_content(notebook: &Notebook, query: &str) -> Vec<NoteId> {
    search_with(notebook, query, |note, needle| {
        contains_folded(&note.content, needle)
    })
}

fn search_with<F>(notebook: &Notebook, query: &str, matches: F) -> Vec<NoteId>
where
    F: Fn(&Note, &str) -> bool,
{
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    notebook
        .notes()
        .filter(|note| matches(note, needle.as_str()))
        .map(|note| note.id.clone())
        .collect()
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{search, search_by_content, search_by_title};
    use crate::model::note::{Note, NoteId};
    use crate::model::notebook::Notebook;
    use crate::repo::notebook_repo::add_note;

    fn sample() -> Notebook {
        let notes = [
            Note::new(NoteId::from("a"), "Meeting Notes", 1)
                .with_content("Discussion about project timeline"),
            Note::new(NoteId::from("b"), "Project Plan", 1).with_content("Milestones"),
            Note::new(NoteId::from("c"), "Groceries", 1).with_content("milk, eggs"),
        ];
        notes
            .into_iter()
            .fold(Notebook::new("Test", 0), |notebook, note| add_note(notebook, note, 1))
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(search(&sample(), "").is_empty());
    }

    #[test]
    fn matches_title_or_content_ignoring_case() {
        let hits = search(&sample(), "PROJECT");
        assert_eq!(hits, vec![NoteId::from("a"), NoteId::from("b")]);

        let hits = search(&sample(), "Milk");
        assert_eq!(hits, vec![NoteId::from("c")]);
    }

    #[test]
    fn whitespace_query_is_not_trimmed() {
        assert_eq!(search(&sample(), " ").len(), 3);
        assert!(search(&sample(), "  ").is_empty());
    }

    #[test]
    fn field_searches_match_one_side_only() {
        let notebook = sample();
        assert_eq!(search_by_title(&notebook, "project"), vec![NoteId::from("b")]);
        assert_eq!(search_by_content(&notebook, "project"), vec![NoteId::from("a")]);
        assert!(search_by_title(&notebook, "").is_empty());
        assert!(search_by_content(&notebook, "groceries").is_empty());
    }
}
