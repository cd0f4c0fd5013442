//! Selection module - connected same-color groups
//!
//! A selection is either empty or one maximal 4-connected group of bubbles
//! sharing a color, with at least [`MIN_POP_SIZE`] members. Membership is a
//! pure predicate (reachability through same-colored neighbors), so the
//! traversal order never changes the resulting set.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Color, Pos, MIN_POP_SIZE};

/// The current highlighted group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    color: Option<Color>,
    /// Members in discovery order
    cells: Vec<Pos>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Color shared by all members, `None` when empty
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().copied()
    }

    /// Members sorted by row, then column
    pub fn sorted(&self) -> Vec<Pos> {
        let mut out = self.cells.clone();
        out.sort_by_key(|p| (p.y, p.x));
        out
    }

    /// Whether this selection can be popped
    pub fn is_poppable(&self) -> bool {
        self.cells.len() >= MIN_POP_SIZE
    }

    pub fn clear(&mut self) {
        self.color = None;
        self.cells.clear();
    }
}

/// Compute the group seeded at `seed` into `out`.
///
/// Empty or out-of-range seeds give an empty selection. A lone bubble is
/// found like any other group and then discarded, since it cannot be popped.
pub fn find_group(grid: &Grid, seed: Pos, out: &mut Selection) {
    out.clear();

    let color = match grid.color_at(seed) {
        Some(color) => color,
        None => return,
    };

    let width = grid.width();
    let flat = |p: Pos| (p.y as usize) * width + (p.x as usize);
    let mut visited = vec![false; width * grid.height()];
    let mut queue = VecDeque::new();

    visited[flat(seed)] = true;
    queue.push_back(seed);

    while let Some(current) = queue.pop_front() {
        out.cells.push(current);
        for next in matching_neighbors(grid, current, color) {
            let idx = flat(next);
            if !visited[idx] {
                visited[idx] = true;
                queue.push_back(next);
            }
        }
    }

    if out.cells.len() < MIN_POP_SIZE {
        out.cells.clear();
    } else {
        out.color = Some(color);
    }
}

/// In-grid neighbors of `pos` holding `color`
fn matching_neighbors(grid: &Grid, pos: Pos, color: Color) -> ArrayVec<Pos, 4> {
    pos.neighbors()
        .into_iter()
        .filter(|&n| grid.color_at(n) == Some(color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(rows: &[&str], x: i32, y: i32) -> Vec<Pos> {
        let grid = Grid::from_rows(rows).unwrap();
        let mut sel = Selection::new();
        find_group(&grid, Pos::new(x, y), &mut sel);
        sel.sorted()
    }

    #[test]
    fn test_group_follows_four_connectivity_only() {
        // The r at (2,2) only touches the group diagonally.
        let sel = group(&["rrb", "brb", "bbr"], 0, 0);
        assert_eq!(sel, vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(1, 1)]);
    }

    #[test]
    fn test_group_wraps_around_corners() {
        let sel = group(&["ggg", "gbg", "gbg"], 2, 2);
        assert_eq!(sel.len(), 7);
        assert!(!sel.contains(&Pos::new(1, 1)));
    }

    #[test]
    fn test_lone_bubble_gives_empty_selection() {
        assert!(group(&["rn", "nn"], 0, 0).is_empty());
        assert!(group(&["rb", "br"], 1, 1).is_empty());
    }

    #[test]
    fn test_empty_or_outside_seed_gives_empty_selection() {
        assert!(group(&["rn"], 1, 0).is_empty());
        assert!(group(&["rr"], -1, 0).is_empty());
        assert!(group(&["rr"], 0, 1).is_empty());
    }

    #[test]
    fn test_selection_records_color() {
        let grid = Grid::from_rows(&["yy"]).unwrap();
        let mut sel = Selection::new();
        find_group(&grid, Pos::new(1, 0), &mut sel);
        assert_eq!(sel.color(), Some(Color::Yellow));
        assert!(sel.is_poppable());

        find_group(&grid, Pos::new(5, 0), &mut sel);
        assert_eq!(sel.color(), None);
        assert!(!sel.is_poppable());
    }
}
