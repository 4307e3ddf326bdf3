use nexia_core::repo::notebook_repo::{add_link, add_note, remove_link, remove_note};
use nexia_core::{Note, NoteId, Notebook};

fn id(value: &str) -> NoteId {
    NoteId::from(value)
}

fn notebook_with(ids: &[&str]) -> Notebook {
    ids.iter().fold(Notebook::new("Links", 0), |notebook, value| {
        add_note(notebook, Note::new(id(value), *value, 1), 1)
    })
}

#[test]
fn add_link_updates_both_directions() {
    let notebook = add_link(notebook_with(&["a", "b"]), &id("a"), &id("b"), 10);

    assert_eq!(notebook.get(&id("a")).unwrap().links, vec![id("b")]);
    assert_eq!(notebook.backlinks_of(&id("b")), &[id("a")]);
    assert_eq!(notebook.get(&id("a")).unwrap().modified_at, 10);
    assert_eq!(notebook.modified_at, 10);
    assert!(notebook.check_link_symmetry().is_ok());
}

#[test]
fn add_link_twice_equals_once() {
    let once = add_link(notebook_with(&["a", "b"]), &id("a"), &id("b"), 10);
    let twice = add_link(once.clone(), &id("a"), &id("b"), 20);

    assert_eq!(twice, once);
    assert_eq!(twice.get(&id("a")).unwrap().links.len(), 1);
}

#[test]
fn self_link_is_rejected() {
    let notebook = notebook_with(&["a"]);
    let expected = notebook.clone();

    let notebook = add_link(notebook, &id("a"), &id("a"), 10);
    assert_eq!(notebook, expected);
}

#[test]
fn remove_missing_link_is_noop() {
    let notebook = notebook_with(&["a", "b"]);
    let expected = notebook.clone();

    let notebook = remove_link(notebook, &id("a"), &id("b"), 10);
    assert_eq!(notebook, expected);
    let notebook = remove_link(notebook, &id("ghost"), &id("b"), 10);
    assert_eq!(notebook, expected);
}

#[test]
fn link_sequences_keep_symmetry() {
    let ids = ["a", "b", "c", "d"];
    let mut notebook = notebook_with(&ids);

    // Deterministic pseudo-random walk over add/remove link operations.
    let mut seed: u64 = 0x5eed;
    for step in 0..200 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let from = id(ids[(seed >> 33) as usize % ids.len()]);
        let to = id(ids[(seed >> 17) as usize % ids.len()]);
        notebook = if (seed >> 7) % 3 == 0 {
            remove_link(notebook, &from, &to, step)
        } else {
            add_link(notebook, &from, &to, step)
        };

        assert!(
            notebook.check_link_symmetry().is_ok(),
            "symmetry broken at step {step}: {:?}",
            notebook.check_link_symmetry()
        );
    }
}

#[test]
fn remove_note_prunes_links_in_both_directions() {
    let notebook = notebook_with(&["a", "b", "c"]);
    let notebook = add_link(notebook, &id("a"), &id("b"), 2);
    let notebook = add_link(notebook, &id("b"), &id("c"), 3);

    let notebook = remove_note(notebook, &id("b"), 4);

    assert!(!notebook.contains(&id("b")));
    assert!(notebook.backlinks_of(&id("c")).is_empty());
    assert!(notebook.backlinks_of(&id("b")).is_empty());
    assert!(notebook.get(&id("a")).unwrap().links.is_empty());
    assert_eq!(notebook.modified_at, 4);
    assert!(notebook.check_link_symmetry().is_ok());
}
