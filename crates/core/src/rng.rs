//! RNG module - deterministic color generation
//!
//! Boards are filled from a [`ColorSource`]. The default source is a simple
//! LCG so that the same seed always produces the same board (handy for
//! reproducing a game and for tests).

use crate::types::{Color, PALETTE_SIZE};

/// Anything that can hand out bubble colors for a fresh board
pub trait ColorSource {
    fn next_color(&mut self) -> Color;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits: the low bits of a power-of-two LCG have tiny
    /// periods (the lowest two repeat every 4 draws).
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ColorSource for SimpleRng {
    fn next_color(&mut self) -> Color {
        let idx = self.next_range(PALETTE_SIZE as u32) as usize;
        Color::ALL[idx]
    }
}

/// Replays a fixed color sequence, cycling when it runs out
///
/// Used to build exact boards through the same fill path as random ones.
#[derive(Debug, Clone)]
pub struct CycleColors {
    colors: Vec<Color>,
    next: usize,
}

impl CycleColors {
    /// Returns `None` for an empty sequence
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        if colors.is_empty() {
            return None;
        }
        Some(Self { colors, next: 0 })
    }
}

impl ColorSource for CycleColors {
    fn next_color(&mut self) -> Color {
        let color = self.colors[self.next];
        self.next = (self.next + 1) % self.colors.len();
        color
    }
}
