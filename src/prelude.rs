//! Prelude module for gregorian_pattern crate.
//!
//! Re-exports the derive macros from derive_more used across the crate.

pub use derive_more::{Display, From};
