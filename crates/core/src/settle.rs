//! Settling - re-packing the grid after bubbles are removed
//!
//! Two phases restore the structural invariants:
//!
//! - **Gravity**: within each column, bubbles fall to form one contiguous run
//!   flush with the bottom row, keeping their top-to-bottom order.
//! - **Column compaction**: empty columns move to the right edge, keeping the
//!   left-to-right order of the non-empty ones.
//!
//! [`settle`] runs both phases in a loop until neither moves anything.

use crate::grid::Grid;

/// Drop every bubble as far down its column as it goes.
///
/// Two-pointer pass per column, scanning bottom to top.
/// Returns true if any bubble moved.
pub fn apply_gravity(grid: &mut Grid) -> bool {
    let height = grid.height();
    let mut moved = false;

    for x in 0..grid.width() {
        let mut write_y = height;
        for read_y in (0..height).rev() {
            let slot = grid.slot_at(x, read_y);
            if slot.is_none() {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                grid.put(x, write_y, slot);
                grid.put(x, read_y, None);
                moved = true;
            }
        }
    }

    moved
}

/// Shift non-empty columns left over empty ones.
///
/// Returns true if any column moved.
pub fn compact_columns(grid: &mut Grid) -> bool {
    let mut moved = false;
    let mut write_x = 0;

    for read_x in 0..grid.width() {
        if grid.is_column_empty(read_x) {
            continue;
        }
        if write_x != read_x {
            for y in 0..grid.height() {
                let slot = grid.slot_at(read_x, y);
                grid.put(write_x, y, slot);
                grid.put(read_x, y, None);
            }
            moved = true;
        }
        write_x += 1;
    }

    moved
}

/// Re-pack until stable. Returns the number of passes that moved something.
pub fn settle(grid: &mut Grid) -> usize {
    let mut passes = 0;
    loop {
        let fell = apply_gravity(grid);
        let shifted = compact_columns(grid);
        if !fell && !shifted {
            return passes;
        }
        passes += 1;
    }
}

/// True when no bubble floats above an empty slot and no empty column sits
/// left of a non-empty one.
pub fn is_settled(grid: &Grid) -> bool {
    let (width, height) = (grid.width(), grid.height());

    for x in 0..width {
        for y in 1..height {
            if grid.slot_at(x, y - 1).is_some() && grid.slot_at(x, y).is_none() {
                return false;
            }
        }
    }

    let mut seen_empty = false;
    for x in 0..width {
        let empty = grid.is_column_empty(x);
        if seen_empty && !empty {
            return false;
        }
        seen_empty |= empty;
    }

    true
}
