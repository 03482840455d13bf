//! Board module - owns the game grid
//!
//! The board is a `width x height` grid where each cell is empty or carries a
//! [`CellTag`]. Storage is a flat row-major `Vec` sized once at construction.
//! Coordinates are `(row, col)`: row 0 is the top, column 0 the left edge.
//!
//! Reads outside the grid follow one rule set so callers never need a separate
//! boundary check:
//! - above the top (inside the columns): empty
//! - left, right or below the bottom: [`CellTag::Obstacle`]

use std::fmt;

use arrayvec::ArrayVec;
use log::warn;

use crate::display::{Display, Frame, NullDisplay, Status};
use crate::pieces::get_shape;
use crate::types::{Cell, CellTag, PieceKind, Rotation};

/// Absolute board cells covered by one placement
pub type Placement = ArrayVec<(i16, i16), 4>;

/// Largest accepted width or height. Coordinates are `i16`, and a piece may
/// reach a few cells past either edge.
pub const MAX_SIDE: u16 = 1024;

/// The game board
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
    status: Status,
    display: Box<dyn Display>,
}

impl Board {
    /// Create an empty board with no display attached
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_display(width, height, Box::new(NullDisplay))
    }

    /// Create an empty board rendering into `display`
    ///
    /// Sides above [`MAX_SIDE`] are clamped to it.
    pub fn with_display(width: u16, height: u16, display: Box<dyn Display>) -> Self {
        if width > MAX_SIDE || height > MAX_SIDE {
            warn!(
                "board {}x{} exceeds {}, clamping",
                width, height, MAX_SIDE
            );
        }
        let width = width.min(MAX_SIDE);
        let height = height.min(MAX_SIDE);
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![None; len],
            status: Status::default(),
            display,
        }
    }

    #[inline(always)]
    fn index(&self, row: i16, col: i16) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.height as i16 || col >= self.width as i16 {
            return None;
        }
        Some((row as usize) * (self.width as usize) + (col as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Write a cell. Off-board writes are ignored and return false.
    pub fn set_block(&mut self, row: i16, col: i16, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Read a cell, treating the sides and bottom as solid
    pub fn block_at(&self, row: i16, col: i16) -> Cell {
        if col < 0 || col >= self.width as i16 || row >= self.height as i16 {
            return Some(CellTag::Obstacle);
        }
        if row < 0 {
            return None;
        }
        self.index(row, col).and_then(|idx| self.cells[idx])
    }

    /// Absolute cells of a placement, in shape order
    pub fn placement(&self, row: i16, col: i16, kind: PieceKind, rotation: Rotation) -> Placement {
        get_shape(kind, rotation)
            .iter()
            .map(|&(dx, dy)| (row + dy as i16, col + dx as i16))
            .collect()
    }

    /// Visit every absolute cell of a placement
    pub fn each_block(
        &self,
        row: i16,
        col: i16,
        kind: PieceKind,
        rotation: Rotation,
        mut visit: impl FnMut(i16, i16),
    ) {
        for (r, c) in self.placement(row, col, kind, rotation) {
            visit(r, c);
        }
    }

    /// Whether a placement collides with an occupied cell or the board edges
    pub fn is_occupied(&self, row: i16, col: i16, kind: PieceKind, rotation: Rotation) -> bool {
        self.placement(row, col, kind, rotation)
            .iter()
            .any(|&(r, c)| self.block_at(r, c).is_some())
    }

    /// Write `cell` under every in-bounds cell of a placement
    pub fn fill_placement(
        &mut self,
        row: i16,
        col: i16,
        kind: PieceKind,
        rotation: Rotation,
        cell: Cell,
    ) {
        for (r, c) in self.placement(row, col, kind, rotation) {
            self.set_block(r, c, cell);
        }
    }

    /// Whether every cell of a row is occupied by something other than an obstacle
    pub fn is_row_complete(&self, row: usize) -> bool {
        if row >= self.height as usize {
            return false;
        }
        let w = self.width as usize;
        let start = row * w;
        self.cells[start..start + w]
            .iter()
            .all(|cell| matches!(cell, Some(tag) if !tag.is_obstacle()))
    }

    /// Delete a row and shift every row above it down by one
    ///
    /// A fresh empty row appears at the top. Out-of-range rows are ignored.
    pub fn remove_row(&mut self, row: usize) {
        if row >= self.height as usize {
            return;
        }

        let width = self.width as usize;

        // copy_within handles the overlapping ranges
        for r in (1..=row).rev() {
            let src_start = (r - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, r * width);
        }

        self.cells[..width].fill(None);
    }

    /// Replace the HUD values carried by the next frames
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Push the current grid to the attached display
    pub fn render(&mut self) {
        let frame = Frame {
            width: self.width,
            height: self.height,
            cells: &self.cells,
            status: &self.status,
        };
        self.display.present(&frame);
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty the whole grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows (`.` empty, `#` obstacle, piece letters)
    ///
    /// Intended for tests and benchmarks. Unknown characters read as empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u16;
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u16;
        let mut board = Self::new(width, height);
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '#' => Some(CellTag::Obstacle),
                    other => PieceKind::from_str(&other.to_string()).map(CellTag::Piece),
                };
                board.set_block(r as i16, c as i16, cell);
            }
        }
        board
    }

    /// Text rows in the format accepted by [`Board::from_rows`]
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        None => '.',
                        Some(CellTag::Obstacle) => '#',
                        Some(CellTag::Piece(kind)) => {
                            kind.letter().chars().next().unwrap_or('?')
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rows", &self.to_rows())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
