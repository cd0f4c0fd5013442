//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events into commands and keeps a keyboard
//! cursor that turns arrow-key movement into [`crate::types::GameAction`]s.
//! Converting mouse cells into board coordinates belongs to the view, which
//! knows where the board is drawn.

pub mod cursor;
pub mod map;

pub use bubble_pop_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, handle_mouse_event, should_quit, InputCommand, PointerEvent};
