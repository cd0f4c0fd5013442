//! Session module - one game from fresh board to game over
//!
//! Wraps a [`Board`] with the bits a frontend needs around the engine: a
//! seeded color source, the ready/over phase, and raw tallies of what was
//! popped. The score is simply the number of bubbles popped; any weighting
//! is up to the caller.

use crate::board::{poppable_colors, Board};
use crate::rng::SimpleRng;
use crate::snapshot::{cell_code, fnv1a64, BoardSnapshot};
use crate::types::{Cell, GameAction, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_SIDE};

/// Session lifecycle after initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Moves remain; selections and pops are accepted
    Ready,
    /// No two adjacent bubbles share a color; pops are refused
    Over,
}

/// Board size and seed for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
}

impl SessionConfig {
    /// Dimensions limited to `1..=MAX_BOARD_SIDE`
    pub fn clamped(self) -> Self {
        let side = |n: usize| n.clamp(1, MAX_BOARD_SIDE as usize);
        Self {
            width: side(self.width),
            height: side(self.height),
            ..self
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH as usize,
            height: BOARD_HEIGHT as usize,
            seed: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    rng: SimpleRng,
    phase: Phase,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Total bubbles popped this episode
    score: u32,
    /// Successful pops this episode
    pops: u32,
    last_pop: u32,
    /// Cells removed by the last pop, until a renderer takes them
    popped: Vec<Cell>,
}

impl GameSession {
    /// Create a session and fill its board.
    pub fn new(config: SessionConfig) -> Self {
        let config = config.clamped();
        let mut session = Self {
            config,
            board: Board::new(config.width, config.height),
            rng: SimpleRng::new(config.seed),
            phase: Phase::Ready,
            episode_id: 0,
            score: 0,
            pops: 0,
            last_pop: 0,
            popped: Vec::new(),
        };
        session.fill();
        session
    }

    /// Default-sized session with the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self::new(SessionConfig {
            seed,
            ..SessionConfig::default()
        })
    }

    /// Start from an existing board instead of a random fill (for tests and
    /// puzzles). Restarting later draws random boards of the same size.
    pub fn from_board(board: Board, seed: u32) -> Self {
        let config = SessionConfig {
            width: board.width(),
            height: board.height(),
            seed,
        };
        let phase = if board.has_more_moves() {
            Phase::Ready
        } else {
            Phase::Over
        };
        Self {
            config,
            board,
            rng: SimpleRng::new(seed),
            phase,
            episode_id: 0,
            score: 0,
            pops: 0,
            last_pop: 0,
            popped: Vec::new(),
        }
    }

    fn fill(&mut self) {
        let playable = self
            .board
            .initialize(self.config.width, self.config.height, &mut self.rng);
        self.phase = if playable { Phase::Ready } else { Phase::Over };
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pops(&self) -> u32 {
        self.pops
    }

    pub fn last_pop(&self) -> u32 {
        self.last_pop
    }

    /// Cells removed by the last pop (still held for renderers)
    pub fn popped(&self) -> &[Cell] {
        &self.popped
    }

    /// Hand the cells removed by the last pop to the caller
    pub fn take_popped(&mut self) -> Vec<Cell> {
        std::mem::take(&mut self.popped)
    }

    /// Apply an action. Returns true if it changed anything a renderer shows.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Select { x, y } => {
                let before = self.board.selection().len();
                self.board.update_selection(x, y);
                before != 0 || !self.board.selection().is_empty()
            }
            GameAction::ForceSelect { x, y } => {
                self.board.force_update_selection(x, y);
                true
            }
            GameAction::Pop => self.pop().is_some(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Pop the current selection. Returns the number of bubbles removed.
    ///
    /// Refused (returns `None`) once the session is over or when the
    /// selection is too small.
    pub fn pop(&mut self) -> Option<u32> {
        if self.phase == Phase::Over {
            return None;
        }

        let removed = self.board.pop()?;
        let count = removed.len() as u32;

        self.score = self.score.saturating_add(count);
        self.pops += 1;
        self.last_pop = count;
        self.popped = removed;

        if !self.board.has_more_moves() {
            self.phase = Phase::Over;
            self.board.clear_selection();
            tracing::debug!(
                episode = self.episode_id,
                score = self.score,
                pops = self.pops,
                remaining = self.board.grid().occupied_count(),
                "game over"
            );
        }

        Some(count)
    }

    /// New random board of the configured size; the RNG keeps running so
    /// each episode gets a different board.
    pub fn restart(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.score = 0;
        self.pops = 0;
        self.last_pop = 0;
        self.popped.clear();
        self.fill();
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        let grid = self.board.grid();

        // Sessions cap their sides at MAX_BOARD_SIDE, so these never saturate.
        out.width = u16::try_from(grid.width()).unwrap_or(u16::MAX);
        out.height = u16::try_from(grid.height()).unwrap_or(u16::MAX);
        out.cells.clear();
        out.selected.clear();
        for y in 0..grid.height() {
            for slot in grid.row(y) {
                out.cells.push(cell_code(slot.map(|b| b.color)));
                out.selected.push(slot.map(|b| b.selected).unwrap_or(false));
            }
        }
        out.board_hash = fnv1a64(out.cells.iter().copied());

        out.popped.clear();
        out.popped.extend_from_slice(&self.popped);

        let selection = self.board.selection();
        out.selection_len = selection.len() as u32;
        out.selection_color = selection.color();
        out.poppable = poppable_colors(grid);
        out.score = self.score;
        out.pops = self.pops;
        out.last_pop = self.last_pop;
        out.remaining = grid.occupied_count() as u32;
        out.game_over = self.is_game_over();
        out.episode_id = self.episode_id;
        out.seed = self.config.seed;
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::types::Color;

    fn session(rows: &[&str]) -> GameSession {
        GameSession::from_board(Board::from_grid(Grid::from_rows(rows).unwrap()), 7)
    }

    #[test]
    fn oversized_config_is_capped_to_u16_dimensions() {
        let s = GameSession::new(SessionConfig {
            width: 70_000,
            height: 0,
            seed: 3,
        });
        assert_eq!(s.config().width, MAX_BOARD_SIDE as usize);
        assert_eq!(s.config().height, 1);

        let snap = s.snapshot();
        assert_eq!(snap.width, MAX_BOARD_SIDE);
        assert_eq!(snap.cells.len(), snap.width as usize * snap.height as usize);
    }

    #[test]
    fn snapshot_lists_poppable_colors() {
        let snap = session(&["rrb", "gyb"]).snapshot();
        assert_eq!(snap.poppable, vec![Color::Red, Color::Blue]);
    }

    #[test]
    fn new_session_is_playable() {
        let s = GameSession::with_seed(12345);
        assert_eq!(s.phase(), Phase::Ready);
        assert!(s.board().has_more_moves());
        assert_eq!(s.board().grid().occupied_count(), 24 * 17);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn same_seed_same_board() {
        let a = GameSession::with_seed(99);
        let b = GameSession::with_seed(99);
        assert_eq!(a.board().grid(), b.board().grid());
    }

    #[test]
    fn pop_tallies_raw_count() {
        let mut s = session(&["rrb", "ggb"]);
        assert!(s.apply_action(GameAction::Select { x: 0, y: 0 }));
        assert_eq!(s.pop(), Some(2));
        assert_eq!(s.score(), 2);
        assert_eq!(s.pops(), 1);
        assert_eq!(s.last_pop(), 2);
        assert_eq!(s.popped().len(), 2);
        assert_eq!(s.take_popped().len(), 2);
        assert!(s.popped().is_empty());
    }

    #[test]
    fn session_ends_when_no_moves_remain() {
        let mut s = session(&["rrb"]);
        s.apply_action(GameAction::Select { x: 1, y: 0 });
        assert!(s.apply_action(GameAction::Pop));
        assert_eq!(s.phase(), Phase::Over);
        assert_eq!(s.board().grid().to_rows(), vec!["bnn"]);

        // Pops are refused while over.
        s.apply_action(GameAction::ForceSelect { x: 0, y: 0 });
        assert_eq!(s.pop(), None);
    }

    #[test]
    fn from_board_without_moves_starts_over() {
        let s = session(&["rb"]);
        assert!(s.is_game_over());
    }

    #[test]
    fn invalid_pop_changes_nothing() {
        let mut s = session(&["rbr", "bbr"]);
        s.apply_action(GameAction::Select { x: 0, y: 0 });
        assert!(!s.apply_action(GameAction::Pop));
        assert_eq!(s.score(), 0);
        assert_eq!(s.board().grid().to_rows(), vec!["rbr", "bbr"]);
    }

    #[test]
    fn restart_draws_new_board_and_resets_tally() {
        let mut s = session(&["rr", "bb"]);
        s.apply_action(GameAction::Select { x: 0, y: 0 });
        s.pop();
        assert!(s.score() > 0);

        assert!(s.apply_action(GameAction::Restart));
        assert_eq!(s.episode_id(), 1);
        assert_eq!(s.score(), 0);
        assert_eq!(s.pops(), 0);
        assert_eq!(s.phase(), Phase::Ready);
        assert_eq!(s.board().grid().occupied_count(), 4);
    }

    #[test]
    fn snapshot_mirrors_board_and_selection() {
        let mut s = session(&["rn", "rb"]);
        s.apply_action(GameAction::Select { x: 0, y: 1 });

        let snap = s.snapshot();
        assert_eq!((snap.width, snap.height), (2, 2));
        assert_eq!(snap.color_at(0, 0), Some(Color::Red));
        assert_eq!(snap.color_at(1, 0), None);
        assert!(snap.is_selected(0, 0));
        assert!(snap.is_selected(0, 1));
        assert!(!snap.is_selected(1, 1));
        assert_eq!(snap.selection_len, 2);
        assert_eq!(snap.selection_color, Some(Color::Red));
        assert_eq!(snap.remaining, 3);
        assert_eq!(snap.board_hash, fnv1a64(snap.cells.iter().copied()));
    }
}
