//! Board module - the selection and collapse engine
//!
//! Owns the grid, the current selection and the "any move left" flag. All
//! mutation of the grid after initialization goes through this type:
//!
//! - [`Board::update_selection`] recomputes the group under a coordinate
//! - [`Board::pop`] removes the selected group and settles the grid
//! - [`Board::settle`] re-packs the grid and recomputes the move flag
//!
//! Coordinates are board coordinates (x = column, y = row). Anything outside
//! the grid simply addresses no bubble.

use crate::grid::Grid;
use crate::rng::ColorSource;
use crate::selection::{find_group, Selection};
use crate::settle;
use crate::types::{Cell, Color, Pos};

/// Fresh fills tried before accepting a board without moves.
///
/// Only tiny or degenerate boards ever need more than one attempt.
pub const MAX_FILL_ATTEMPTS: u32 = 64;

#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    selection: Selection,
    /// Seed of the last cached selection update
    last_seed: Option<Pos>,
    has_more_moves: bool,
}

impl Board {
    /// Create a board with an empty grid of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_grid(Grid::new(width, height))
    }

    /// Wrap an existing grid as-is (no settling).
    ///
    /// Selection flags already present on the grid are cleared.
    pub fn from_grid(mut grid: Grid) -> Self {
        for bubble in grid.bubbles_mut() {
            bubble.selected = false;
        }
        let has_more_moves = has_more_moves(&grid);
        Self {
            grid,
            selection: Selection::new(),
            last_seed: None,
            has_more_moves,
        }
    }

    /// Refill the board with random colors at new dimensions.
    ///
    /// Keeps drawing fresh fills until one has at least one move, giving up
    /// after [`MAX_FILL_ATTEMPTS`] (a 1x1 board can never have a move).
    /// Returns the final move flag.
    pub fn initialize(
        &mut self,
        width: usize,
        height: usize,
        colors: &mut impl ColorSource,
    ) -> bool {
        self.selection.clear();
        self.last_seed = None;

        for attempt in 1..=MAX_FILL_ATTEMPTS {
            self.grid.initialize(width, height, colors);
            if self.settle() {
                if attempt > 1 {
                    tracing::debug!(attempt, width, height, "playable board after re-roll");
                }
                return true;
            }
        }

        tracing::warn!(
            width,
            height,
            attempts = MAX_FILL_ATTEMPTS,
            "no playable board found, keeping last fill"
        );
        false
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether any two adjacent bubbles share a color
    pub fn has_more_moves(&self) -> bool {
        self.has_more_moves
    }

    /// Select the group at (x, y), skipping the work if the same coordinate
    /// was the last one selected.
    pub fn update_selection(&mut self, x: i32, y: i32) -> &Selection {
        let seed = Pos::new(x, y);
        if self.last_seed != Some(seed) {
            self.force_update_selection(x, y);
        }
        &self.selection
    }

    /// Select the group at (x, y) unconditionally.
    ///
    /// An empty or out-of-range coordinate, or a lone bubble, clears the
    /// selection. Every bubble's `selected` flag is rewritten to match.
    pub fn force_update_selection(&mut self, x: i32, y: i32) -> &Selection {
        let seed = Pos::new(x, y);
        self.last_seed = Some(seed);

        let previous = self.selection.len();
        find_group(&self.grid, seed, &mut self.selection);
        self.sync_selected_flags();

        if previous != self.selection.len() {
            tracing::trace!(x, y, size = self.selection.len(), "selection changed");
        }
        &self.selection
    }

    /// Drop the current selection (and the cached seed)
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.last_seed = None;
        self.sync_selected_flags();
    }

    fn sync_selected_flags(&mut self) {
        for bubble in self.grid.bubbles_mut() {
            bubble.selected = false;
        }
        for pos in self.selection.iter() {
            if let Some(bubble) = self.grid.bubble_mut(pos) {
                bubble.selected = true;
            }
        }
    }

    /// Remove the selected group.
    ///
    /// Returns `None` (and changes nothing) unless at least two bubbles are
    /// selected. Otherwise empties the selected slots, settles the grid and
    /// returns the removed cells, marked `popped`, at their pre-settle
    /// positions. The selection is cleared; callers should re-select at the
    /// pointer position since the bubbles under it have moved.
    pub fn pop(&mut self) -> Option<Vec<Cell>> {
        if !self.selection.is_poppable() {
            return None;
        }

        let mut removed = Vec::with_capacity(self.selection.len());
        for pos in self.selection.iter() {
            if let Some(cell) = self.grid.get(pos.x, pos.y) {
                removed.push(Cell {
                    selected: false,
                    popped: true,
                    ..cell
                });
                self.grid.set(pos.x, pos.y, None);
            }
        }

        self.selection.clear();
        self.last_seed = None;
        self.settle();

        tracing::trace!(
            popped = removed.len(),
            remaining = self.grid.occupied_count(),
            more_moves = self.has_more_moves,
            "pop"
        );
        Some(removed)
    }

    /// Re-pack the grid (gravity + column compaction) until stable.
    ///
    /// Returns the freshly computed move flag.
    pub fn settle(&mut self) -> bool {
        settle::settle(&mut self.grid);
        self.has_more_moves = has_more_moves(&self.grid);
        self.has_more_moves
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_grid(Grid::default())
    }
}

/// True iff some bubble has a same-colored right or bottom neighbor.
///
/// Scanning only right and down from every slot still visits each adjacent
/// pair exactly once.
pub fn has_more_moves(grid: &Grid) -> bool {
    grid.cells().any(|cell| {
        let same = |p: Pos| grid.color_at(p) == Some(cell.color);
        same(cell.pos.right()) || same(cell.pos.down())
    })
}

/// Colors still on the grid with at least one poppable group
pub fn poppable_colors(grid: &Grid) -> Vec<Color> {
    let mut out: Vec<Color> = Vec::new();
    for cell in grid.cells() {
        if out.contains(&cell.color) {
            continue;
        }
        let same = |p: Pos| grid.color_at(p) == Some(cell.color);
        if same(cell.pos.right()) || same(cell.pos.down()) {
            out.push(cell.color);
        }
    }
    out.sort();
    out
}
