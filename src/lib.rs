//! Bubble Pop (workspace facade crate).
//!
//! Re-exports the member crates under short names so the binary, tests and
//! benches can write `bubble_pop::core::Board` instead of depending on each
//! crate directly. Runtime configuration lives here because only the binary
//! needs it.

pub mod config;

pub use bubble_pop_core as core;
pub use bubble_pop_input as input;
pub use bubble_pop_term as term;
pub use bubble_pop_types as types;
