//! GameView: maps a `core::BoardSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested. It also owns the
//! inverse mapping, terminal cell to board coordinate, since only the view
//! knows where the board ends up on screen.

use crate::core::BoardSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Color;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame lands inside a viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 95);

/// A lightweight terminal renderer for the bubble board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn layout(&self, board_w: u16, board_h: u16, viewport: Viewport) -> Layout {
        let frame_w = board_w.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = board_h.saturating_mul(self.cell_h).saturating_add(2);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Convert a terminal cell to a board coordinate.
    ///
    /// Always returns a coordinate; cells on the border or outside the board
    /// map to coordinates outside `[0, width) x [0, height)`, which the engine
    /// treats as "no bubble here".
    pub fn board_coord_at(
        &self,
        snap: &BoardSnapshot,
        viewport: Viewport,
        column: u16,
        row: u16,
    ) -> (i32, i32) {
        let layout = self.layout(snap.width, snap.height, viewport);
        let rel_x = column as i32 - (layout.start_x as i32 + 1);
        let rel_y = row as i32 - (layout.start_y as i32 + 1);
        (
            rel_x.div_euclid(self.cell_w as i32),
            rel_y.div_euclid(self.cell_h as i32),
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &BoardSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_cursor(snap, None, viewport, fb);
    }

    /// Like [`GameView::render_into`], also highlighting the keyboard cursor.
    pub fn render_into_with_cursor(
        &self,
        snap: &BoardSnapshot,
        cursor: Option<(i32, i32)>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(snap.width, snap.height, viewport);
        let Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        } = layout;

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w.saturating_sub(2),
            frame_h.saturating_sub(2),
            ' ',
            bg,
        );
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for y in 0..snap.height {
            for x in 0..snap.width {
                let under_cursor = cursor == Some((x as i32, y as i32));
                match snap.color_at(x, y) {
                    Some(color) => {
                        let selected = snap.is_selected(x, y);
                        self.draw_bubble(fb, layout, x, y, color, selected, under_cursor);
                    }
                    None => self.draw_empty_cell(fb, layout, x, y, under_cursor),
                }
            }
        }

        // Bubbles from the last pop flash where nothing has fallen in yet.
        for cell in &snap.popped {
            let (x, y) = (cell.pos.x, cell.pos.y);
            if x < 0 || y < 0 || x >= snap.width as i32 || y >= snap.height as i32 {
                continue;
            }
            let (x, y) = (x as u16, y as u16);
            if snap.color_at(x, y).is_none() {
                let style = CellStyle {
                    dim: true,
                    ..CellStyle::new(color_rgb(cell.color), BOARD_BG)
                };
                self.fill_cell_rect(fb, layout, x, y, '░', style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.game_over {
            self.draw_overlay_text(fb, layout, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &BoardSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16, cursor: bool) {
        let style = CellStyle {
            dim: true,
            ..CellStyle::new(
                Rgb::new(90, 90, 100),
                if cursor { CURSOR_BG } else { BOARD_BG },
            )
        };
        self.fill_cell_rect(fb, layout, x, y, '·', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_bubble(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        x: u16,
        y: u16,
        color: Color,
        selected: bool,
        cursor: bool,
    ) {
        let fg = if selected {
            highlight(color_rgb(color))
        } else {
            color_rgb(color)
        };
        let style = CellStyle {
            bold: selected,
            ..CellStyle::new(fg, if cursor { CURSOR_BG } else { BOARD_BG })
        };
        let ch = if selected { '▓' } else { '█' };
        self.fill_cell_rect(fb, layout, x, y, ch, style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        // Boards larger than the viewport are clipped, not wrapped.
        let px = layout.start_x as u32 + 1 + cell_x as u32 * self.cell_w as u32;
        let py = layout.start_y as u32 + 1 + cell_y as u32 * self.cell_h as u32;
        if px >= fb.width() as u32 || py >= fb.height() as u32 {
            return;
        }
        fb.fill_rect(px as u16, py as u16, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &BoardSnapshot,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
        };
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let rows: [(&str, u32); 5] = [
            ("SCORE", snap.score),
            ("POPS", snap.pops),
            ("LAST", snap.last_pop),
            ("LEFT", snap.remaining),
            ("GROUP", snap.selection_len),
        ];

        let mut y = layout.start_y;
        for (name, n) in rows {
            if y.saturating_add(1) >= viewport.height {
                return;
            }
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, n, value);
            y = y.saturating_add(2);
        }

        if let Some(color) = snap.selection_color {
            let style = CellStyle {
                bold: true,
                ..CellStyle::new(color_rgb(color), Rgb::new(0, 0, 0))
            };
            fb.put_str(panel_x, y, color.as_str(), style);
        }
        y = y.saturating_add(2);

        // One swatch per color that can still be popped.
        if y.saturating_add(1) < viewport.height {
            fb.put_str(panel_x, y, "MOVES", label);
            y = y.saturating_add(1);
            let mut x = panel_x;
            for &color in &snap.poppable {
                fb.put_char(x, y, '●', CellStyle::new(color_rgb(color), Rgb::new(0, 0, 0)));
                x = x.saturating_add(2);
            }
            if snap.poppable.is_empty() {
                fb.put_char(x, y, '-', value);
            }
            y = y.saturating_add(2);
        }

        let dim = CellStyle { dim: true, ..value };
        for hint in ["space pop", "r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, hint, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: Layout, text: &str) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            bold: true,
            ..CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0))
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Red => Rgb::new(230, 70, 70),
        Color::Blue => Rgb::new(77, 128, 255),
        Color::Green => Rgb::new(90, 210, 100),
        Color::Yellow => Rgb::new(240, 220, 70),
    }
}

fn highlight(rgb: Rgb) -> Rgb {
    let lift = |c: u8| c.saturating_add((255 - c) / 2);
    Rgb::new(lift(rgb.r), lift(rgb.g), lift(rgb.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(width: u16, height: u16, cells: Vec<u8>) -> BoardSnapshot {
        let selected = vec![false; cells.len()];
        BoardSnapshot {
            width,
            height,
            cells,
            selected,
            ..Default::default()
        }
    }

    #[test]
    fn board_coord_roundtrips_through_layout() {
        let view = GameView::default();
        let s = snap(4, 3, vec![0; 12]);
        // frame 10x5 in a 10x5 viewport: board origin at (1,1), 2 columns per cell.
        let vp = Viewport::new(10, 5);
        assert_eq!(view.board_coord_at(&s, vp, 1, 1), (0, 0));
        assert_eq!(view.board_coord_at(&s, vp, 2, 1), (0, 0));
        assert_eq!(view.board_coord_at(&s, vp, 3, 1), (1, 0));
        assert_eq!(view.board_coord_at(&s, vp, 8, 3), (3, 2));
        // Border maps outside the board.
        assert_eq!(view.board_coord_at(&s, vp, 0, 0), (-1, -1));
        assert_eq!(view.board_coord_at(&s, vp, 9, 4), (4, 3));
    }

    #[test]
    fn oversized_layouts_clip_instead_of_overflowing() {
        // 1024 columns at 3000 terminal columns each cannot fit in u16.
        let s = BoardSnapshot {
            poppable: vec![Color::Red],
            ..snap(1024, 2, vec![1; 2048])
        };
        let fb = GameView::new(3000, 1).render(&s, Viewport::new(120, 40));
        assert_eq!((fb.width(), fb.height()), (120, 40));

        let wide = GameView::default().render(&s, Viewport::new(80, 24));
        assert_eq!(wide.get(1, 12).map(|c| c.ch), Some('█'));
    }

    #[test]
    fn side_panel_lists_poppable_colors() {
        let s = BoardSnapshot {
            poppable: vec![Color::Red, Color::Blue],
            ..snap(2, 2, vec![1, 1, 2, 2])
        };
        let fb = GameView::default().render(&s, Viewport::new(40, 40));
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("MOVES"));
        assert_eq!(text.matches('●').count(), 2);
    }

    #[test]
    fn popped_flash_only_on_empty_slots() {
        use crate::types::{Cell, Pos};

        let mut s = snap(2, 1, vec![1, 0]);
        for x in 0..2 {
            s.popped.push(Cell {
                pos: Pos::new(x, 0),
                color: Color::Blue,
                selected: false,
                popped: true,
            });
        }
        let fb = GameView::default().render(&s, Viewport::new(6, 3));
        assert_eq!(fb.row_text(1), "│██░░│");
    }
}
