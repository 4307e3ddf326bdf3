//! Repository layer over the in-memory notebook aggregate.
//!
//! # Responsibility
//! - Own every mutation of notes and links.
//! - Keep derived link data (backlinks) in step with outgoing links.
//!
//! # Invariants
//! - Repository operations are pure: aggregate in, aggregate out.
//! - Unknown ids are no-ops, not errors.

pub mod notebook_repo;
