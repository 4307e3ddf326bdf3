//! Notebook aggregate root.
//!
//! # Responsibility
//! - Own all notes of one knowledge base, keyed by id, in insertion order.
//! - Hold the derived backlink index used by graph views.
//!
//! # Invariants
//! - Link symmetry: `t` is in `notes[f].links` iff `f` is in `backlinks[t]`.
//! - Note ids are unique, and each note's `id` equals its map key.
//! - No note links to itself.
//!
//! Mutation goes through [`crate::repo::notebook_repo`]; this module only
//! exposes read access and load-time repair.

use crate::model::note::{Note, NoteId, Timestamp};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Name given to notebooks created without one.
pub const DEFAULT_NOTEBOOK_NAME: &str = "Untitled";

/// A collection of interconnected notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub(crate) notes: IndexMap<NoteId, Note>,
    /// Reverse index: for each note id, which notes link to it.
    #[serde(default)]
    pub(crate) backlinks: IndexMap<NoteId, Vec<NoteId>>,
    pub name: String,
    pub created_at: Timestamp,
    pub modified_at: Timestamp,
}

/// First link-symmetry violation found by [`Notebook::check_link_symmetry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkViolation {
    /// `from` links to `to`, but `backlinks[to]` does not list `from`.
    MissingBacklink { from: NoteId, to: NoteId },
    /// `backlinks[to]` lists `from`, but `from` does not link to `to`.
    OrphanBacklink { from: NoteId, to: NoteId },
    /// A note lists itself as a link target.
    SelfLink(NoteId),
}

impl Display for LinkViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBacklink { from, to } => {
                write!(f, "link {from} -> {to} has no backlink entry")
            }
            Self::OrphanBacklink { from, to } => {
                write!(f, "backlink {to} <- {from} has no forward link")
            }
            Self::SelfLink(id) => write!(f, "note links to itself: {id}"),
        }
    }
}

impl Error for LinkViolation {}

impl Notebook {
    /// Creates an empty notebook stamped with `now`.
    pub fn new(name: impl Into<String>, now: Timestamp) -> Self {
        Self {
            notes: IndexMap::new(),
            backlinks: IndexMap::new(),
            name: name.into(),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.notes.contains_key(id)
    }

    /// Iterates notes in insertion order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    /// Note ids in insertion order.
    pub fn note_ids(&self) -> Vec<NoteId> {
        self.notes.keys().cloned().collect()
    }

    /// Ids of the notes linking to `id`, in link-creation order.
    pub fn backlinks_of(&self, id: &NoteId) -> &[NoteId] {
        self.backlinks
            .get(id)
            .map(|sources| sources.as_slice())
            .unwrap_or(&[])
    }

    /// Verifies the link-symmetry and no-self-link invariants.
    ///
    /// Links pointing at ids that are not in the notebook are only checked
    /// for their backlink entry; dangling targets are a storage concern.
    pub fn check_link_symmetry(&self) -> Result<(), LinkViolation> {
        for note in self.notes.values() {
            for target in &note.links {
                if *target == note.id {
                    return Err(LinkViolation::SelfLink(note.id.clone()));
                }
                if !self.backlinks_of(target).contains(&note.id) {
                    return Err(LinkViolation::MissingBacklink {
                        from: note.id.clone(),
                        to: target.clone(),
                    });
                }
            }
        }

        for (target, sources) in &self.backlinks {
            for source in sources {
                let linked = self
                    .notes
                    .get(source)
                    .is_some_and(|note| note.links_to(target));
                if !linked {
                    return Err(LinkViolation::OrphanBacklink {
                        from: source.clone(),
                        to: target.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Rewrites every note's `id` to the key it is stored under.
    ///
    /// Returns the number of notes whose id was rewritten.
    pub fn align_note_ids(&mut self) -> usize {
        let mut rewritten = 0;
        for (key, note) in self.notes.iter_mut() {
            if note.id != *key {
                note.id = key.clone();
                rewritten += 1;
            }
        }
        rewritten
    }

    /// Drops self links and links to unknown notes, then rebuilds the
    /// backlink index from outgoing links.
    ///
    /// Returns the number of dropped outgoing links.
    pub fn rebuild_backlinks(&mut self) -> usize {
        let known: Vec<NoteId> = self.notes.keys().cloned().collect();
        let mut dropped = 0;
        for note in self.notes.values_mut() {
            let before = note.links.len();
            let own_id = note.id.clone();
            let mut kept: Vec<NoteId> = Vec::with_capacity(before);
            for target in note.links.drain(..) {
                if target != own_id && known.contains(&target) && !kept.contains(&target) {
                    kept.push(target);
                }
            }
            dropped += before - kept.len();
            note.links = kept;
        }

        let mut backlinks: IndexMap<NoteId, Vec<NoteId>> = IndexMap::new();
        for note in self.notes.values() {
            for target in &note.links {
                backlinks
                    .entry(target.clone())
                    .or_default()
                    .push(note.id.clone());
            }
        }
        self.backlinks = backlinks;
        dropped
    }
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new(DEFAULT_NOTEBOOK_NAME, 0)
    }
}
