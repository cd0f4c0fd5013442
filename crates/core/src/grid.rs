//! Grid module - bounds-checked storage of bubble slots
//!
//! The grid is a `width x height` matrix where each slot is empty or holds a
//! colored bubble. Uses a flat row-major vector; callers only ever see
//! `(x, y)` coordinates (x = column, y = row, 0 = top).
//!
//! Out-of-range reads behave exactly like empty slots, so adjacency checks
//! never need a separate bounds test.

use crate::rng::ColorSource;
use crate::types::{Bubble, Cell, Color, Pos, Slot};

/// Character used for empty slots in the text notation
pub const EMPTY_CHAR: char = 'n';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of slots, row-major order (y * width + x)
    slots: Vec<Slot>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            slots: vec![None; width * height],
        }
    }

    /// Create a grid with every slot holding a bubble drawn from `colors`
    pub fn filled(width: usize, height: usize, colors: &mut impl ColorSource) -> Self {
        let mut grid = Self::new(width, height);
        grid.initialize(width, height, colors);
        grid
    }

    /// Replace the whole grid: new dimensions, every slot freshly colored
    pub fn initialize(&mut self, width: usize, height: usize, colors: &mut impl ColorSource) {
        self.width = width;
        self.height = height;
        self.slots.clear();
        self.slots
            .extend((0..width * height).map(|_| Some(Bubble::new(colors.next_color()))));
    }

    /// Parse the text notation: one string per row (top first), one char per
    /// column. `r`, `b`, `g`, `y` are colors; `n` or `.` is empty.
    ///
    /// Returns `None` for ragged rows or unknown characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use bubble_pop_core::Grid;
    ///
    /// let grid = Grid::from_rows(&["rn", "bb"]).unwrap();
    /// assert_eq!(grid.width(), 2);
    /// assert_eq!(grid.height(), 2);
    /// assert!(grid.get(1, 0).is_none());
    /// assert!(Grid::from_rows(&["rr", "b"]).is_none());
    /// ```
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);

        let mut slots = Vec::with_capacity(width * height);
        for row in rows {
            if row.chars().count() != width {
                return None;
            }
            for ch in row.chars() {
                let slot = match ch {
                    EMPTY_CHAR | '.' => None,
                    c => Some(Bubble::new(Color::from_char(c)?)),
                };
                slots.push(slot);
            }
        }

        Some(Self {
            width,
            height,
            slots,
        })
    }

    /// Render back to the text notation (empty slots as `n`)
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                self.row(y)
                    .map(|slot| slot.map(|b| b.color.as_char()).unwrap_or(EMPTY_CHAR))
                    .collect()
            })
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    /// The occupied cell at (x, y); `None` if empty or out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        let idx = self.index(x, y)?;
        let bubble = self.slots[idx]?;
        Some(Cell::from_bubble(Pos::new(x, y), bubble))
    }

    /// Color at `pos`; `None` if empty or out of bounds
    pub fn color_at(&self, pos: Pos) -> Option<Color> {
        self.index(pos.x, pos.y)
            .and_then(|idx| self.slots[idx])
            .map(|b| b.color)
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some()
    }

    /// Write a slot.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the grid. All writers live inside the
    /// engine, so an out-of-range write is a bug, not input to tolerate.
    pub fn set(&mut self, x: i32, y: i32, slot: Slot) {
        match self.index(x, y) {
            Some(idx) => self.slots[idx] = slot,
            None => panic!(
                "grid write out of bounds: ({}, {}) on {}x{} grid",
                x, y, self.width, self.height
            ),
        }
    }

    /// Slot at in-range column/row indices (settling hot path)
    #[inline(always)]
    pub(crate) fn slot_at(&self, x: usize, y: usize) -> Slot {
        debug_assert!(x < self.width && y < self.height);
        self.slots[y * self.width + x]
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, x: usize, y: usize, slot: Slot) {
        debug_assert!(x < self.width && y < self.height);
        self.slots[y * self.width + x] = slot;
    }

    pub(crate) fn bubble_mut(&mut self, pos: Pos) -> Option<&mut Bubble> {
        let idx = self.index(pos.x, pos.y)?;
        self.slots[idx].as_mut()
    }

    pub(crate) fn bubbles_mut(&mut self) -> impl Iterator<Item = &mut Bubble> + '_ {
        self.slots.iter_mut().flatten()
    }

    /// Slots of column `x`, top to bottom
    ///
    /// # Panics
    ///
    /// Panics if `x` is not a column of the grid.
    pub fn column(&self, x: usize) -> impl Iterator<Item = Slot> + '_ {
        assert!(x < self.width, "column {} out of range", x);
        (0..self.height).map(move |y| self.slot_at(x, y))
    }

    /// Slots of row `y`, left to right
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a row of the grid.
    pub fn row(&self, y: usize) -> impl Iterator<Item = Slot> + '_ {
        assert!(y < self.height, "row {} out of range", y);
        let start = y * self.width;
        self.slots[start..start + self.width].iter().copied()
    }

    /// All occupied cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.slots.iter().enumerate().filter_map(move |(idx, slot)| {
            slot.map(|bubble| {
                let pos = Pos::new((idx % self.width) as i32, (idx / self.width) as i32);
                Cell::from_bubble(pos, bubble)
            })
        })
    }

    pub fn is_column_empty(&self, x: usize) -> bool {
        self.column(x).all(|slot| slot.is_none())
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(
            crate::types::BOARD_WIDTH as usize,
            crate::types::BOARD_HEIGHT as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{CycleColors, SimpleRng};

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(3, 0), Some(3));
        assert_eq!(grid.index(0, 1), Some(4));
        assert_eq!(grid.index(3, 2), Some(11));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(4, 0), None);
        assert_eq!(grid.index(0, 3), None);
    }

    #[test]
    fn test_get_treats_empty_and_out_of_range_alike() {
        let grid = Grid::from_rows(&["rn"]).unwrap();

        let cell = grid.get(0, 0).unwrap();
        assert_eq!(cell.pos, Pos::new(0, 0));
        assert_eq!(cell.color, Color::Red);
        assert!(!cell.selected && !cell.popped);

        assert_eq!(grid.get(1, 0), None);
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, 1), None);
        assert_eq!(grid.get(i32::MAX, i32::MIN), None);
    }

    #[test]
    fn test_set_and_clear_slot() {
        let mut grid = Grid::new(3, 3);
        grid.set(2, 1, Some(Bubble::new(Color::Green)));
        assert_eq!(grid.color_at(Pos::new(2, 1)), Some(Color::Green));

        grid.set(2, 1, None);
        assert!(!grid.is_occupied(2, 1));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_out_of_range_panics() {
        let mut grid = Grid::new(3, 3);
        grid.set(3, 0, Some(Bubble::new(Color::Red)));
    }

    #[test]
    fn test_initialize_fills_every_slot() {
        let mut rng = SimpleRng::new(9);
        let grid = Grid::filled(24, 17, &mut rng);
        assert_eq!(grid.occupied_count(), 24 * 17);
        assert!(grid.cells().all(|c| !c.selected));
    }

    #[test]
    fn test_initialize_replaces_dimensions() {
        let mut grid = Grid::new(2, 2);
        let mut src = CycleColors::new(vec![Color::Yellow]).unwrap();
        grid.initialize(5, 1, &mut src);
        assert_eq!((grid.width(), grid.height()), (5, 1));
        assert_eq!(grid.to_rows(), vec!["yyyyy".to_string()]);
    }

    #[test]
    fn test_rows_notation_roundtrip() {
        let rows = ["rbgy", "n.nr"];
        let grid = Grid::from_rows(&rows).unwrap();
        assert_eq!(grid.to_rows(), vec!["rbgy", "nnnr"]);
        assert!(Grid::from_rows(&["rx"]).is_none());
    }

    #[test]
    fn test_column_and_row_iteration() {
        let grid = Grid::from_rows(&["rb", "ng"]).unwrap();

        let col: Vec<Option<Color>> = grid.column(1).map(|s| s.map(|b| b.color)).collect();
        assert_eq!(col, vec![Some(Color::Blue), Some(Color::Green)]);

        let row: Vec<Option<Color>> = grid.row(1).map(|s| s.map(|b| b.color)).collect();
        assert_eq!(row, vec![None, Some(Color::Green)]);

        assert!(!grid.is_column_empty(0));
        assert_eq!(grid.occupied_count(), 3);
    }

    #[test]
    fn test_cells_reports_positions() {
        let grid = Grid::from_rows(&["nr", "bn"]).unwrap();
        let cells: Vec<(Pos, Color)> = grid.cells().map(|c| (c.pos, c.color)).collect();
        assert_eq!(
            cells,
            vec![(Pos::new(1, 0), Color::Red), (Pos::new(0, 1), Color::Blue)]
        );
    }
}
