//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 24 columns (indexed 0-23, left to right)
//! - **Height**: 17 rows (indexed 0-16, top to bottom)
//!
//! Coordinates are always `(x, y)` with `x` the column and `y` the row.
//! Gravity pulls bubbles towards `y = height - 1`.
//!
//! # Examples
//!
//! ```
//! use bubble_pop_types::{Color, GameAction, Pos, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let color = Color::from_str("red").unwrap();
//! assert_eq!(color, Color::Red);
//! assert_eq!(Color::from_char('b'), Some(Color::Blue));
//!
//! let action = GameAction::from_str("pop").unwrap();
//! assert_eq!(action, GameAction::Pop);
//!
//! assert_eq!(Pos::new(3, 4).right(), Pos::new(4, 4));
//! assert_eq!(BOARD_WIDTH, 24);
//! assert_eq!(BOARD_HEIGHT, 17);
//! ```

/// Board width in cells (24 columns)
pub const BOARD_WIDTH: u16 = 24;

/// Board height in cells (17 rows)
pub const BOARD_HEIGHT: u16 = 17;

/// Largest board side accepted from configuration; keeps every coordinate
/// and snapshot dimension inside `u16`
pub const MAX_BOARD_SIDE: u16 = 1024;

/// Number of colors in the palette
pub const PALETTE_SIZE: usize = 4;

/// Smallest group that can be popped
pub const MIN_POP_SIZE: usize = 2;

/// Frame interval of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long bubbles removed by the last pop stay visible (for flashing)
pub const POP_FLASH_MS: u32 = 120;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_dimensions() {
        assert_eq!(BOARD_WIDTH, 24);
        assert_eq!(BOARD_HEIGHT, 17);
        assert_eq!(PALETTE_SIZE, Color::ALL.len());
        assert_eq!(MIN_POP_SIZE, 2);
    }

    #[test]
    fn color_index_roundtrip_covers_palette() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(Color::from_index(i), Some(*color));
            assert_eq!(color.index(), i);
        }
        assert_eq!(Color::from_index(PALETTE_SIZE), None);
    }

    #[test]
    fn pos_neighbors() {
        let p = Pos::new(2, 5);
        assert_eq!(p.left(), Pos::new(1, 5));
        assert_eq!(p.right(), Pos::new(3, 5));
        assert_eq!(p.up(), Pos::new(2, 4));
        assert_eq!(p.down(), Pos::new(2, 6));
        assert_eq!(p.neighbors().len(), 4);
    }
}

/// The four bubble colors
///
/// Colors are plain values: two bubbles match iff their colors are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    /// Every palette color, in index order
    pub const ALL: [Color; PALETTE_SIZE] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// Palette index (0-3)
    pub fn index(&self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Green => 2,
            Color::Yellow => 3,
        }
    }

    /// Color for a palette index, `None` past the end of the palette
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse color from string (case-insensitive)
    ///
    /// Accepts full names or the single-letter grid notation.
    ///
    /// # Examples
    ///
    /// ```
    /// use bubble_pop_types::Color;
    ///
    /// assert_eq!(Color::from_str("Green"), Some(Color::Green));
    /// assert_eq!(Color::from_str("y"), Some(Color::Yellow));
    /// assert_eq!(Color::from_str("purple"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" | "r" => Some(Color::Red),
            "blue" | "b" => Some(Color::Blue),
            "green" | "g" => Some(Color::Green),
            "yellow" | "y" => Some(Color::Yellow),
            _ => None,
        }
    }

    /// Parse the single-letter grid notation (`r`, `b`, `g`, `y`, any case)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'r' => Some(Color::Red),
            'b' => Some(Color::Blue),
            'g' => Some(Color::Green),
            'y' => Some(Color::Yellow),
            _ => None,
        }
    }

    /// Single-letter grid notation
    pub fn as_char(&self) -> char {
        match self {
            Color::Red => 'r',
            Color::Blue => 'b',
            Color::Green => 'g',
            Color::Yellow => 'y',
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }
}

/// A board coordinate: `x` is the column, `y` the row (0 = top)
///
/// Signed so that pointer-derived coordinates left of or above the board
/// can be passed straight through; they simply address no cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn left(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    pub fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    pub fn up(self) -> Self {
        Self::new(self.x, self.y - 1)
    }

    pub fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }

    /// The 4-neighborhood: right, left, down, up
    pub fn neighbors(self) -> [Pos; 4] {
        [self.right(), self.left(), self.down(), self.up()]
    }
}

/// Contents of an occupied slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bubble {
    pub color: Color,
    /// Member of the current selection (maintained by the engine, read by renderers)
    pub selected: bool,
}

impl Bubble {
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            selected: false,
        }
    }
}

/// A slot on the board
///
/// - `None`: Empty slot
/// - `Some(Bubble)`: Slot holding a bubble
pub type Slot = Option<Bubble>;

/// A bubble together with its board position
///
/// This is what the engine hands out: reads of the grid and the cells
/// removed by a pop. `popped` is set only on cells returned by a pop, so a
/// renderer can keep drawing them briefly after they left the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub pos: Pos,
    pub color: Color,
    pub selected: bool,
    pub popped: bool,
}

impl Cell {
    pub fn from_bubble(pos: Pos, bubble: Bubble) -> Self {
        Self {
            pos,
            color: bubble.color,
            selected: bubble.selected,
            popped: false,
        }
    }
}

/// Commands a frontend (human input or a bot) can send to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Select the group under a board coordinate (skipped if the coordinate is unchanged)
    Select { x: i32, y: i32 },
    /// Same as `Select` but always recomputes
    ForceSelect { x: i32, y: i32 },
    /// Pop the current selection
    Pop,
    /// Start a new game with a fresh board
    Restart,
}

impl GameAction {
    /// Parse a parameterless action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use bubble_pop_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("pop"), Some(GameAction::Pop));
    /// assert_eq!(GameAction::from_str("Restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("select"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pop" => Some(GameAction::Pop),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Select { .. } => "select",
            GameAction::ForceSelect { .. } => "forceSelect",
            GameAction::Pop => "pop",
            GameAction::Restart => "restart",
        }
    }
}
