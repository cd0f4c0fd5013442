use bubble_pop::core::{Board, GameSession, Grid, SessionConfig};
use bubble_pop::term::{encode_diff_into, AnchorY, FrameBuffer, GameView, Viewport};
use bubble_pop::types::GameAction;

fn session(rows: &[&str]) -> GameSession {
    GameSession::from_board(Board::from_grid(Grid::from_rows(rows).unwrap()), 1)
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSession::with_seed(1).snapshot();
    let view = GameView::default();

    // 24 cells * 2 columns + border = 50 wide; 17 rows + border = 19 high.
    let fb = view.render(&snap, Viewport::new(50, 19));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(49, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 18).unwrap().ch, '└');
    assert_eq!(fb.get(49, 18).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_bubbles_two_chars_wide() {
    let snap = session(&["rn", "bb"]).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(6, 4));

    assert_eq!(fb.row_text(1), "│██··│");
    assert_eq!(fb.row_text(2), "│████│");
}

#[test]
fn term_view_marks_selected_group() {
    let mut s = session(&["rn", "bb"]);
    s.apply_action(GameAction::Select { x: 1, y: 1 });
    let fb = GameView::default().render(&s.snapshot(), Viewport::new(6, 4));

    assert_eq!(fb.row_text(1), "│██··│");
    assert_eq!(fb.row_text(2), "│▓▓▓▓│");
    assert!(fb.get(1, 2).unwrap().style.bold);
    assert!(!fb.get(1, 1).unwrap().style.bold);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut s = session(&["rrb", "gbb"]);
    s.apply_action(GameAction::Select { x: 0, y: 0 });
    s.pop();

    let fb = GameView::default().render(&s.snapshot(), Viewport::new(40, 30));
    let all = screen_text(&fb);
    assert!(all.contains("SCORE"));
    assert!(all.contains("LEFT"));
    assert!(all.contains("GROUP"));
}

#[test]
fn term_view_shows_game_over() {
    let s = session(&["rb", "br"]);
    assert!(s.is_game_over());

    let fb = GameView::default().render(&s.snapshot(), Viewport::new(30, 12));
    assert!(screen_text(&fb).contains("GAME OVER"));
}

#[test]
fn term_view_top_anchor_keeps_board_at_row_zero() {
    let snap = session(&["rr"]).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(6, 10));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(view.board_coord_at(&snap, Viewport::new(6, 10), 3, 1), (1, 0));
}

#[test]
fn pointer_coordinates_follow_centered_layout() {
    let snap = session(&["rrb", "gbb"]).snapshot();
    let view = GameView::default();
    // Frame is 8x4; centered in 20x10 it starts at (6, 3).
    let vp = Viewport::new(20, 10);

    assert_eq!(view.board_coord_at(&snap, vp, 7, 4), (0, 0));
    assert_eq!(view.board_coord_at(&snap, vp, 12, 5), (2, 1));
    assert_eq!(view.board_coord_at(&snap, vp, 0, 0), (-4, -4));
}

#[test]
fn diff_after_hover_only_touches_changed_cells() {
    let mut s = session(&["rrb", "gbb"]);
    let view = GameView::default();
    let vp = Viewport::new(8, 4);

    let before = view.render(&s.snapshot(), vp);
    s.apply_action(GameAction::Select { x: 0, y: 0 });
    let after = view.render(&s.snapshot(), vp);

    let mut diff = Vec::new();
    encode_diff_into(&before, &after, &mut diff).unwrap();
    let text = String::from_utf8_lossy(&diff);
    assert!(text.contains('▓'));
    assert!(!text.contains('┌'));
}

#[test]
fn huge_boards_and_wide_cells_render_clipped() {
    let snap = GameSession::with_seed(1).snapshot();
    let wide_cells = GameView::new(3000, 1).render(&snap, Viewport::new(120, 40));
    assert_eq!((wide_cells.width(), wide_cells.height()), (120, 40));

    let long = GameSession::new(SessionConfig {
        width: 40_000,
        height: 1,
        seed: 1,
    });
    let snap = long.snapshot();
    assert_eq!(snap.cells.len(), snap.width as usize);

    let fb = GameView::default().render(&snap, Viewport::new(80, 24));
    assert_eq!(fb.get(0, 11).map(|c| c.ch), Some('│'));
    assert_ne!(fb.get(1, 11).map(|c| c.ch), Some(' '));
}
