//! Clock and id-generation collaborators.
//!
//! # Responsibility
//! - Abstract wall-clock time and fresh-id generation behind traits so the
//!   reducer never reads ambient time or randomness.
//! - Provide system-backed and deterministic implementations.
//!
//! # Invariants
//! - `IdGenerator::fresh` never returns the same id twice for one generator.
//! - `SystemClock` never panics; a clock before the Unix epoch reads as `0`.

use crate::model::note::{NoteId, Timestamp};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Source of "now" for note and notebook timestamps.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Source of fresh note ids.
pub trait IdGenerator {
    fn fresh(&mut self) -> NoteId;
}

/// Everything the reducer needs from the outside world.
pub trait Environment: Clock + IdGenerator {}

impl<T: Clock + IdGenerator> Environment for T {}

/// Wall clock in Unix epoch milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Clock pinned to a caller-controlled instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedClock {
    now: Timestamp,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: Timestamp) {
        self.now = now;
    }

    pub fn advance(&mut self, millis: i64) {
        self.now = self.now.saturating_add(millis);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now
    }
}

/// Random v4 UUID ids, rendered as hyphenated strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn fresh(&mut self) -> NoteId {
        NoteId::new(Uuid::new_v4().to_string())
    }
}

/// Deterministic ids `prefix-1`, `prefix-2`, ... for replay and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("note")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn fresh(&mut self) -> NoteId {
        let id = NoteId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Pairs one clock with one id generator.
#[derive(Debug, Clone, Default)]
pub struct Env<C, G> {
    pub clock: C,
    pub ids: G,
}

impl<C, G> Env<C, G> {
    pub fn new(clock: C, ids: G) -> Self {
        Self { clock, ids }
    }
}

impl Env<SystemClock, UuidIdGenerator> {
    /// Wall clock plus random UUID ids.
    pub fn system() -> Self {
        Self::new(SystemClock, UuidIdGenerator)
    }
}

impl Env<FixedClock, SequentialIdGenerator> {
    /// Fixed clock at `now` plus `note-N` ids.
    pub fn deterministic(now: Timestamp) -> Self {
        Self::new(FixedClock::new(now), SequentialIdGenerator::default())
    }
}

impl<C: Clock, G> Clock for Env<C, G> {
    fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

impl<C, G: IdGenerator> IdGenerator for Env<C, G> {
    fn fresh(&mut self) -> NoteId {
        self.ids.fresh()
    }
}
