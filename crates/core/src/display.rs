//! Render hook types: what the board pushes to the outside world.

use crate::types::{Cell, PieceKind};

/// HUD values shown next to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    pub next: Option<PieceKind>,
    pub cleared_rows: u32,
    pub drop_interval_ms: u32,
    pub paused: bool,
    pub game_over: bool,
}

/// Borrowed view of the board handed to a [`Display`] on every render.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub width: u16,
    pub height: u16,
    /// Row-major cells, `height * width` long.
    pub cells: &'a [Cell],
    pub status: &'a Status,
}

impl Frame<'_> {
    /// Cell at (row, col), `None` when out of range.
    pub fn get(&self, row: u16, col: u16) -> Cell {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells[(row as usize) * (self.width as usize) + (col as usize)]
    }

    /// Cells of one row, left to right; empty when `row` is out of range.
    pub fn row(&self, row: u16) -> &[Cell] {
        if row >= self.height {
            return &[];
        }
        let w = self.width as usize;
        let start = (row as usize) * w;
        self.cells.get(start..start + w).unwrap_or(&[])
    }
}

/// External display collaborator.
///
/// `present` must reflect the frame before returning; it has no way to report
/// failure, so implementations deal with their own I/O errors.
pub trait Display {
    fn present(&mut self, frame: &Frame<'_>);
}

/// Display that discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn present(&mut self, _frame: &Frame<'_>) {}
}
