//! GameView: draws a [`GameSnapshot`] onto a [`Surface`].
//!
//! Pure, no I/O. The board is framed and centred; score, level, lines, best
//! score and a preview of the next piece sit in a panel to the right.

use crate::core::{GameSnapshot, Shape};
use crate::surface::{Glyph, Rgb, Style, Surface};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const BLACK: Rgb = Rgb::new(0, 0, 0);
const GRID: Rgb = Rgb::new(0x33, 0x33, 0x33);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Width of the side panel including its left gap.
const PANEL_W: u16 = 14;

/// Piece colour by kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::T => Rgb::new(0xFF, 0x0D, 0x72),
        PieceKind::O => Rgb::new(0x0D, 0xC2, 0xFF),
        PieceKind::L => Rgb::new(0x0D, 0xFF, 0x72),
        PieceKind::J => Rgb::new(0xF5, 0x38, 0xFF),
        PieceKind::I => Rgb::new(0xFF, 0x8E, 0x0D),
        PieceKind::S => Rgb::new(0xFF, 0xE1, 0x38),
        PieceKind::Z => Rgb::new(0x38, 0x77, 0xFF),
    }
}

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

/// Where the board frame landed on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left corner of the frame.
    pub x: u16,
    pub y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

impl Layout {
    /// Surface column and row of board cell (bx, by)'s top-left glyph.
    pub fn cell_origin(&self, view: &GameView, bx: u16, by: u16) -> (u16, u16) {
        (
            self.x + 1 + bx * view.cell_w,
            self.y + 1 + by * view.cell_h,
        )
    }
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    show_grid: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares up typical terminal glyphs.
        Self {
            cell_w: 2,
            cell_h: 1,
            show_grid: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    /// Frame position for a viewport; the board plus panel is centred.
    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let total_w = frame_w + PANEL_W;
        Layout {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Render into an existing surface, resizing it to the viewport.
    ///
    /// Reusing one surface across frames keeps this allocation-free once sized.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, out: &mut Surface) {
        out.resize(viewport.width, viewport.height);
        out.fill(Glyph::default());

        let layout = self.layout(viewport);
        self.draw_frame(out, &layout);

        for by in 0..BOARD_HEIGHT as u16 {
            for bx in 0..BOARD_WIDTH as u16 {
                let value = snap.cell_with_active(bx as usize, by as usize);
                self.draw_cell(out, &layout, bx, by, value);
            }
        }

        self.draw_panel(out, snap, &layout);

        if !snap.started {
            self.draw_banner(out, &layout, &["BLOCKFALL", "", "ENTER to start"]);
        } else if snap.game_over {
            if snap.new_high_score {
                self.draw_banner(out, &layout, &["GAME OVER", "NEW HIGH SCORE", "R to restart"]);
            } else {
                self.draw_banner(out, &layout, &["GAME OVER", "", "R to restart"]);
            }
        } else if snap.paused {
            self.draw_banner(out, &layout, &["PAUSED"]);
        }
    }

    /// Convenience helper that allocates a new surface.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> Surface {
        let mut out = Surface::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut out);
        out
    }

    fn draw_frame(&self, out: &mut Surface, layout: &Layout) {
        let style = Style::new(TEXT, BLACK);
        let (x, y, w, h) = (layout.x, layout.y, layout.frame_w, layout.frame_h);

        out.put(x, y, '┌', style);
        out.put(x + w - 1, y, '┐', style);
        out.put(x, y + h - 1, '└', style);
        out.put(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            out.put(x + dx, y, '─', style);
            out.put(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            out.put(x, y + dy, '│', style);
            out.put(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_cell(&self, out: &mut Surface, layout: &Layout, bx: u16, by: u16, value: Cell) {
        let (px, py) = layout.cell_origin(self, bx, by);
        match PieceKind::from_id(value) {
            Some(kind) => {
                let style = Style::new(piece_color(kind), BLACK).bold();
                out.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
            }
            None => {
                let ch = if self.show_grid { '·' } else { ' ' };
                out.fill_rect(px, py, self.cell_w, self.cell_h, ' ', Style::new(GRID, BLACK));
                out.put(px, py, ch, Style::new(GRID, BLACK).dim());
            }
        }
    }

    fn draw_panel(&self, out: &mut Surface, snap: &GameSnapshot, layout: &Layout) {
        let x = layout.x + layout.frame_w + 2;
        let label = Style::new(TEXT, BLACK).bold();
        let value = Style::new(TEXT, BLACK);

        let mut y = layout.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("BEST", snap.high_score),
        ] {
            out.text(x, y, name, label);
            out.number(x, y + 1, n, value);
            y += 3;
        }

        out.text(x, y, "NEXT", label);
        if let Some(next) = &snap.next {
            self.draw_preview(out, next, x, y + 1);
        }
    }

    fn draw_preview(&self, out: &mut Surface, shape: &Shape, x: u16, y: u16) {
        let style = Style::new(piece_color(shape.kind()), BLACK).bold();
        for (dx, dy, _) in shape.filled() {
            let px = x + dx as u16 * self.cell_w;
            let py = y + dy as u16 * self.cell_h;
            out.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_banner(&self, out: &mut Surface, layout: &Layout, lines: &[&str]) {
        let style = Style::new(WHITE, BLACK).bold();
        let top = (layout.y + layout.frame_h / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let w = line.chars().count() as u16;
            let x = layout.x + layout.frame_w.saturating_sub(w) / 2;
            out.text(x, top + i as u16, line, style);
        }
    }
}
