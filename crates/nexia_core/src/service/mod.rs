//! Use-case services above the pure engine.
//!
//! # Responsibility
//! - Drive the reducer from a dispatch loop.
//! - Perform persistence commands and feed results back as messages.

pub mod session;
