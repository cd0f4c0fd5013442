//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the grid, selection and collapse rules of the bubble
//! puzzle. It has **no dependencies** on UI, terminals, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards
//! - **Testable**: Every rule is exercised by unit and property tests
//! - **Portable**: Can drive a terminal frontend, a GUI, or a headless bot
//!
//! # Module Structure
//!
//! - [`grid`]: bounds-checked storage of bubble slots
//! - [`selection`]: 4-connected same-color group search
//! - [`settle`]: gravity and column compaction
//! - [`board`]: the engine tying grid, selection and settling together
//! - [`session`]: one game from fresh board to game over
//! - [`rng`]: deterministic color generation
//! - [`snapshot`]: read-only views for renderers
//!
//! # Game Rules
//!
//! - Hovering a bubble selects its whole group of same-colored, 4-connected
//!   neighbors; groups of one are never selected
//! - Popping removes the group; bubbles above fall down, and empty columns
//!   close up towards the left
//! - The game ends when no two adjacent bubbles share a color
//!
//! # Example
//!
//! ```
//! use bubble_pop_core::{Board, Grid};
//!
//! let mut board = Board::from_grid(Grid::from_rows(&["rb", "rr"]).unwrap());
//!
//! board.update_selection(0, 0);
//! assert_eq!(board.selection().len(), 3);
//!
//! let popped = board.pop().unwrap();
//! assert_eq!(popped.len(), 3);
//! assert_eq!(board.grid().to_rows(), vec!["nn", "bn"]);
//! assert!(!board.has_more_moves());
//! ```

pub mod board;
pub mod grid;
pub mod rng;
pub mod selection;
pub mod session;
pub mod settle;
pub mod snapshot;

pub use bubble_pop_types as types;

// Re-export commonly used types for convenience
pub use board::{has_more_moves, poppable_colors, Board};
pub use grid::Grid;
pub use rng::{ColorSource, CycleColors, SimpleRng};
pub use selection::Selection;
pub use session::{GameSession, Phase, SessionConfig};
pub use snapshot::BoardSnapshot;
