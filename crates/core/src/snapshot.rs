//! Read-only views of a session for renderers.
//!
//! Snapshots are plain data: renderers never touch the grid directly.
//! `snapshot_into` reuses the vectors of an existing snapshot so a frame loop
//! does not allocate once the board size is stable.

use crate::types::{Cell, Color};

/// Cell code for an empty slot; colors are `palette index + 1`
pub const EMPTY_CODE: u8 = 0;

pub fn cell_code(color: Option<Color>) -> u8 {
    color.map(|c| c.index() as u8 + 1).unwrap_or(EMPTY_CODE)
}

pub fn color_from_code(code: u8) -> Option<Color> {
    code.checked_sub(1).and_then(|i| Color::from_index(i as usize))
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major cell codes (see [`cell_code`])
    pub cells: Vec<u8>,
    /// Row-major `selected` flags
    pub selected: Vec<bool>,
    /// FNV-1a hash of `cells`
    pub board_hash: u64,
    /// Bubbles removed by the last pop, at their positions before settling
    pub popped: Vec<Cell>,
    pub selection_len: u32,
    pub selection_color: Option<Color>,
    /// Colors that still have a poppable group, in palette order
    pub poppable: Vec<Color>,
    pub score: u32,
    pub pops: u32,
    pub last_pop: u32,
    pub remaining: u32,
    pub game_over: bool,
    pub episode_id: u32,
    pub seed: u32,
}

impl BoardSnapshot {
    #[inline(always)]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn color_at(&self, x: u16, y: u16) -> Option<Color> {
        self.index(x, y).and_then(|i| color_from_code(self.cells[i]))
    }

    pub fn is_selected(&self, x: u16, y: u16) -> bool {
        self.index(x, y).map(|i| self.selected[i]).unwrap_or(false)
    }

    /// Hash of everything a renderer draws (board, selection, counters)
    pub fn fingerprint(&self) -> u64 {
        let selected = self.selected.iter().map(|&s| s as u8);
        let meta = [
            self.selection_len,
            self.score,
            self.pops,
            self.episode_id,
            self.game_over as u32,
            self.popped.len() as u32,
        ];
        let meta = meta.into_iter().flat_map(|v| v.to_le_bytes());
        let popped = self.popped.iter().flat_map(|c| {
            let mut bytes = [0u8; 9];
            bytes[..4].copy_from_slice(&c.pos.x.to_le_bytes());
            bytes[4..8].copy_from_slice(&c.pos.y.to_le_bytes());
            bytes[8] = cell_code(Some(c.color));
            bytes
        });
        fnv1a64(
            self.board_hash
                .to_le_bytes()
                .into_iter()
                .chain(selected)
                .chain(meta)
                .chain(popped),
        )
    }
}

/// FNV-1a 64-bit
pub fn fnv1a64(bytes: impl Iterator<Item = u8>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}
