use bubble_pop::core::{Board, BoardSnapshot, GameSession, Grid, Phase, SessionConfig};
use bubble_pop::types::{GameAction, Pos};

fn small(seed: u32) -> GameSession {
    GameSession::new(SessionConfig {
        width: 8,
        height: 6,
        seed,
    })
}

/// First bubble (row-major) that has a same-colored right or bottom neighbor.
fn first_move(session: &GameSession) -> Option<Pos> {
    let grid = session.board().grid();
    grid.cells()
        .find(|c| {
            grid.color_at(c.pos.right()) == Some(c.color)
                || grid.color_at(c.pos.down()) == Some(c.color)
        })
        .map(|c| c.pos)
}

#[test]
fn seeded_game_plays_until_over() {
    let mut s = small(7);
    assert_eq!(s.phase(), Phase::Ready);

    let mut guard = 0;
    while let Some(pos) = first_move(&s) {
        assert!(s.apply_action(GameAction::ForceSelect { x: pos.x, y: pos.y }));
        assert!(s.pop().is_some());
        guard += 1;
        assert!(guard <= 48, "every pop removes at least two bubbles");
    }

    assert!(s.is_game_over());
    assert_eq!(s.pops(), guard);
    assert_eq!(
        s.score() as usize + s.board().grid().occupied_count(),
        8 * 6
    );

    // Over is terminal until restart.
    assert_eq!(s.pop(), None);
    assert!(!s.apply_action(GameAction::Pop));

    s.restart();
    assert_eq!(s.phase(), Phase::Ready);
    assert_eq!(s.episode_id(), 1);
    assert_eq!(s.board().grid().occupied_count(), 48);
}

#[test]
fn same_seed_same_episodes() {
    let mut a = GameSession::with_seed(99);
    let mut b = GameSession::with_seed(99);
    assert_eq!(a.board().grid(), b.board().grid());

    a.restart();
    b.restart();
    assert_eq!(a.board().grid(), b.board().grid());
}

#[test]
fn restart_continues_the_color_stream() {
    let mut s = GameSession::with_seed(3);
    let first = s.board().grid().clone();
    s.restart();
    assert_ne!(s.board().grid(), &first);
}

#[test]
fn board_with_no_possible_move_starts_over() {
    let s = GameSession::new(SessionConfig {
        width: 1,
        height: 1,
        seed: 5,
    });
    assert!(s.is_game_over());
    assert_eq!(s.board().grid().occupied_count(), 1);
}

#[test]
fn selecting_nothing_reports_no_change() {
    let mut s = GameSession::from_board(
        Board::from_grid(Grid::from_rows(&["rb", "bg"]).unwrap()),
        1,
    );
    assert!(s.is_game_over());
    assert!(!s.apply_action(GameAction::Select { x: 0, y: 0 }));
    assert!(!s.apply_action(GameAction::Select { x: -3, y: 9 }));
}

#[test]
fn snapshot_tracks_selection_without_touching_board_hash() {
    let mut s = GameSession::from_board(
        Board::from_grid(Grid::from_rows(&["rrb", "gbb"]).unwrap()),
        1,
    );
    let idle = s.snapshot();

    s.apply_action(GameAction::Select { x: 2, y: 1 });
    let hovered = s.snapshot();

    assert_eq!(idle.board_hash, hovered.board_hash);
    assert_ne!(idle.fingerprint(), hovered.fingerprint());
    assert_eq!(hovered.selection_len, 3);
    assert!(hovered.is_selected(2, 0));
    assert!(!hovered.is_selected(0, 0));

    let mut reused = BoardSnapshot::default();
    s.snapshot_into(&mut reused);
    s.snapshot_into(&mut reused);
    assert_eq!(reused, hovered);
}

#[test]
fn popped_cells_flash_once() {
    let mut s = GameSession::from_board(
        Board::from_grid(Grid::from_rows(&["rrb", "gbb"]).unwrap()),
        1,
    );
    s.apply_action(GameAction::Select { x: 0, y: 0 });
    assert_eq!(s.pop(), Some(2));

    let snap = s.snapshot();
    assert_eq!(snap.popped.len(), 2);
    assert_eq!(snap.last_pop, 2);
    assert_eq!(snap.remaining, 4);

    let flashed = s.take_popped();
    assert!(flashed.iter().all(|c| c.popped));
    assert!(s.snapshot().popped.is_empty());
}
