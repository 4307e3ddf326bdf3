//! Note search entry points.
//!
//! # Responsibility
//! - Answer type-as-you-search queries over note titles and bodies.
//! - Keep result ordering identical to notebook insertion order.

pub mod substring;
