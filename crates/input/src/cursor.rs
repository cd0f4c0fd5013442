//! Keyboard cursor over the board.
//!
//! Terminals without mouse reporting still need a "pointer": the cursor is
//! a board coordinate moved by the arrow keys. Every move turns into a
//! selection at the new coordinate; mouse hovers move the cursor too, so
//! keyboard and mouse can be mixed.

use crate::map::InputCommand;
use crate::types::{GameAction, MAX_BOARD_SIDE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Cursor {
    /// Cursor for a board of the given size, starting bottom-left where
    /// bubbles collect.
    pub fn new(width: usize, height: usize) -> Self {
        let side = |n: usize| n.clamp(1, MAX_BOARD_SIDE as usize) as i32;
        let (width, height) = (side(width), side(height));
        Self {
            x: 0,
            y: height - 1,
            width,
            height,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Move to a board coordinate (e.g. from the mouse), clamped to the board
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x.clamp(0, self.width - 1);
        self.y = y.clamp(0, self.height - 1);
    }

    /// Apply a key command.
    ///
    /// Cursor moves yield a `Select` at the new position; `Pop` and
    /// `Restart` map straight through. Returns `None` when the cursor is
    /// already against the edge.
    pub fn apply(&mut self, command: InputCommand) -> Option<GameAction> {
        let (dx, dy) = match command {
            InputCommand::CursorLeft => (-1, 0),
            InputCommand::CursorRight => (1, 0),
            InputCommand::CursorUp => (0, -1),
            InputCommand::CursorDown => (0, 1),
            InputCommand::Pop => return Some(GameAction::Pop),
            InputCommand::Restart => return Some(GameAction::Restart),
        };

        let (old_x, old_y) = (self.x, self.y);
        self.set_position(self.x + dx, self.y + dy);
        if (self.x, self.y) == (old_x, old_y) {
            return None;
        }
        Some(self.select())
    }

    /// Selection at the cursor, bypassing the unchanged-coordinate cache
    /// (used after pops and restarts, when the board moved under the cursor)
    pub fn force_select(&self) -> GameAction {
        GameAction::ForceSelect {
            x: self.x,
            y: self.y,
        }
    }

    fn select(&self) -> GameAction {
        GameAction::Select {
            x: self.x,
            y: self.y,
        }
    }
}
