//! GameView: maps a board [`Frame`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{Frame, Status};
use crossterm::style::Color;

use crate::fb::{rgb, FrameBuffer, Glyph, Style};
use crate::types::{CellTag, PieceKind};

const PLAYFIELD_BG: Color = rgb(30, 30, 40);

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

/// Lays out the playfield, the side panel and overlays.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    /// Lines listed under CONTROLS in the side panel.
    help: Vec<String>,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up typical terminal glyphs.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            help: Vec::new(),
        }
    }

    pub fn with_help(mut self, help: Vec<String>) -> Self {
        self.help = help;
        self
    }

    /// Terminal size of the bordered playfield for a board.
    pub fn frame_size(&self, board_w: u16, board_h: u16) -> (u16, u16) {
        (board_w * self.cell_w + 2, board_h * self.cell_h + 2)
    }

    pub fn render(&self, frame: &Frame<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let (frame_w, frame_h) = self.frame_size(frame.width, frame.height);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = Style::new(rgb(200, 200, 200), rgb(0, 0, 0));
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..frame.height {
            for col in 0..frame.width {
                let (ch, style) = match frame.get(row, col) {
                    None => ('·', Style::new(rgb(90, 90, 100), PLAYFIELD_BG).dim()),
                    Some(CellTag::Obstacle) => {
                        ('▒', Style::new(rgb(150, 150, 150), PLAYFIELD_BG))
                    }
                    Some(CellTag::Piece(kind)) => {
                        ('█', Style::new(piece_color(kind), PLAYFIELD_BG).bold())
                    }
                };
                let px = start_x + 1 + col * self.cell_w;
                let py = start_y + 1 + row * self.cell_h;
                fb.fill(px, py, self.cell_w, self.cell_h, Glyph::new(ch, style));
            }
        }

        self.draw_side_panel(&mut fb, frame.status, viewport, start_x + frame_w + 2, start_y);

        let overlay = if frame.status.game_over {
            Some("GAME OVER")
        } else if frame.status.paused {
            Some("PAUSED")
        } else {
            None
        };
        if let Some(text) = overlay {
            let style = Style::new(rgb(255, 255, 255), rgb(0, 0, 0)).bold();
            let text_w = text.chars().count() as u16;
            let x = start_x + frame_w.saturating_sub(text_w) / 2;
            fb.text(x, start_y + frame_h / 2, text, style);
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put(x, y, Glyph::new('┌', style));
        fb.put(x + w - 1, y, Glyph::new('┐', style));
        fb.put(x, y + h - 1, Glyph::new('└', style));
        fb.put(x + w - 1, y + h - 1, Glyph::new('┘', style));

        for dx in 1..w - 1 {
            fb.put(x + dx, y, Glyph::new('─', style));
            fb.put(x + dx, y + h - 1, Glyph::new('─', style));
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, Glyph::new('│', style));
            fb.put(x + w - 1, y + dy, Glyph::new('│', style));
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        status: &Status,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = Style::default().bold();
        let value = Style::new(rgb(200, 200, 200), rgb(0, 0, 0));

        let mut y = start_y;
        let mut entry = |fb: &mut FrameBuffer, name: &str, text: &str, style: Style| {
            fb.text(panel_x, y, name, label);
            fb.text(panel_x, y + 1, text, style);
            y += 3;
        };

        match status.next {
            Some(kind) => entry(fb, "NEXT", kind.letter(), Style { fg: piece_color(kind), ..value }),
            None => entry(fb, "NEXT", "-", value),
        }
        entry(fb, "LINES", &status.cleared_rows.to_string(), value);
        entry(fb, "SPEED", &format!("{}ms", status.drop_interval_ms), value);

        if !self.help.is_empty() {
            fb.text(panel_x, y, "CONTROLS", label);
            for (i, line) in self.help.iter().enumerate() {
                fb.text(panel_x, y + 1 + i as u16, line, value.dim());
            }
        }
    }
}

fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => rgb(80, 220, 220),
        PieceKind::O => rgb(240, 220, 80),
        PieceKind::T => rgb(200, 120, 220),
        PieceKind::S => rgb(100, 220, 120),
        PieceKind::Z => rgb(220, 80, 80),
        PieceKind::J => rgb(80, 120, 220),
        PieceKind::L => rgb(255, 165, 0),
    }
}
