//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O).

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const FIELD_BG: Rgb = Rgb::new(3, 16, 36);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Widest board cell, in terminal columns
pub const MAX_CELL_W: u16 = 4;

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

/// Board layout inside a viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Lays the playfield out centred in the viewport, one board cell per
/// `cell_w` terminal columns.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell roughly squares up terminal glyphs
        Self { cell_w: 2 }
    }
}

impl GameView {
    /// `cell_w` is clamped to `1..=MAX_CELL_W`
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_W),
        }
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let w = (BOARD_WIDTH as u16).saturating_mul(self.cell_w).saturating_add(2);
        let h = BOARD_HEIGHT as u16 + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        self.draw_border(&mut fb, frame);

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                match snap.cell_kind(x, y) {
                    Some(kind) => self.draw_block(&mut fb, frame, x as i32, y as i32, '█', kind_color(kind)),
                    None => self.draw_block(&mut fb, frame, x as i32, y as i32, '·', Rgb::new(40, 56, 80)),
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y {
                let dy = ghost_y - active.position.y;
                for (x, y) in active.cells() {
                    self.draw_block(&mut fb, frame, x, y + dy, '░', Rgb::new(120, 130, 150));
                }
            }
            for (x, y) in active.cells() {
                self.draw_block(&mut fb, frame, x, y, '█', kind_color(active.kind));
            }
        }

        self.draw_side_panel(&mut fb, snap, frame);

        if snap.game_over {
            self.draw_overlay(&mut fb, frame, "GAME OVER");
        } else if snap.paused {
            self.draw_overlay(&mut fb, frame, "PAUSED");
        } else if !snap.running {
            self.draw_overlay(&mut fb, frame, "PRESS ENTER");
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        let style = CellStyle::new(Rgb::new(126, 224, 255), PANEL_BG);
        let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(right, f.y, '┐', style);
        fb.put_char(f.x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for x in f.x + 1..right {
            fb.put_char(x, f.y, '─', style);
            fb.put_char(x, bottom, '─', style);
        }
        for y in f.y + 1..bottom {
            fb.put_char(f.x, y, '│', style);
            fb.put_char(right, y, '│', style);
        }
    }

    /// Draw one board cell; cells outside the field (e.g. above it) are skipped.
    fn draw_block(&self, fb: &mut FrameBuffer, f: Frame, x: i32, y: i32, ch: char, fg: Rgb) {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return;
        }
        let px = f.x + 1 + x as u16 * self.cell_w;
        let py = f.y + 1 + y as u16;
        fb.fill_rect(px, py, self.cell_w, 1, ch, CellStyle::new(fg, FIELD_BG));
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, f: Frame) {
        let x = f.x + f.w + 2;
        if x.saturating_add(8) > fb.width() {
            return;
        }

        let label = CellStyle::new(Rgb::new(191, 239, 255), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(245, 215, 110), PANEL_BG);

        let mut y = f.y + 1;
        for (name, v) in [("SCORE", snap.score), ("LINES", snap.lines), ("LEVEL", snap.level)] {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, &v.to_string(), value);
            y += 3;
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, f: Frame, text: &str) {
        let style = CellStyle::new(Rgb::new(191, 239, 255), PANEL_BG).bold();
        let text_w = text.chars().count() as u16;
        let x = f.x + f.w.saturating_sub(text_w) / 2;
        fb.put_str(x, f.y + f.h / 2, text, style);
    }
}

fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
