//! Engine module - the falling-piece state machine
//!
//! The engine owns the active piece, the next-piece preview, gravity speed and
//! the cleared-row counter. The board owns the grid; the engine changes it only
//! through [`Board`] methods.
//!
//! Every change to the active piece follows remove → test → place: its cells
//! are lifted off the board, the candidate placement is checked with
//! [`Board::is_occupied`], and the cells are written back at the committed
//! (possibly unchanged) position. A piece therefore never collides with itself
//! and never appears in two places.

use log::{debug, info};

use crate::core::{spawn_col, Board, PiecePicker, Placement, Status, SPAWN_ROW};
use crate::speed::next_interval;
use crate::types::{CellTag, Command, PieceKind, Rotation, INITIAL_DROP_MS};

/// The falling, player-controlled piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub row: i16,
    pub col: i16,
    pub rotation: Rotation,
}

impl ActivePiece {
    /// Piece at the spawn position of a board `width` columns wide
    pub fn spawn(kind: PieceKind, width: u16) -> Self {
        Self {
            kind,
            row: SPAWN_ROW,
            col: spawn_col(width),
            rotation: Rotation::North,
        }
    }

    /// Absolute cells this piece covers on `board`
    pub fn cells(&self, board: &Board) -> Placement {
        board.placement(self.row, self.col, self.kind, self.rotation)
    }
}

/// Engine lifecycle
///
/// `Spawning → Falling → (Locking → RowClearing → Spawning) | GameOver`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    RowClearing,
    GameOver,
}

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or already over; nothing happened
    Idle,
    /// The active piece moved down one row
    Fell,
    /// The piece landed, rows were cleared and the next piece spawned
    Locked { cleared: u32 },
    /// The piece landed and the next piece could not spawn
    GameOver,
}

/// Game engine
#[derive(Debug)]
pub struct Engine {
    board: Board,
    picker: PiecePicker,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    drop_interval_ms: u32,
    cleared_rows: u32,
    paused: bool,
    phase: Phase,
    started: bool,
}

impl Engine {
    /// Create an engine over `board`; call [`Engine::start`] to spawn the first piece
    pub fn new(board: Board, picker: PiecePicker) -> Self {
        Self {
            board,
            picker,
            active: None,
            next: None,
            drop_interval_ms: INITIAL_DROP_MS,
            cleared_rows: 0,
            paused: false,
            phase: Phase::Spawning,
            started: false,
        }
    }

    /// Spawn the first piece. Does nothing once started.
    pub fn start(&mut self) -> bool {
        if self.started {
            return !self.is_game_over();
        }
        self.started = true;
        self.spawn()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Kind shown in the preview, promoted at the next spawn
    pub fn next(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn cleared_rows(&self) -> u32 {
        self.cleared_rows
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Whether gravity should keep running
    pub fn is_running(&self) -> bool {
        self.started && !self.paused && !self.is_game_over()
    }

    /// HUD values for the current state
    pub fn status(&self) -> Status {
        Status {
            next: self.next,
            cleared_rows: self.cleared_rows,
            drop_interval_ms: self.drop_interval_ms,
            paused: self.paused,
            game_over: self.is_game_over(),
        }
    }

    /// Push the board and HUD to the display
    pub fn render(&mut self) {
        let status = self.status();
        self.board.set_status(status);
        self.board.render();
    }

    /// Promote the next piece to the spawn position
    ///
    /// Draws a fresh preview piece. If the spawn placement is occupied the game
    /// ends and nothing is placed. Returns whether a piece is now falling.
    pub fn spawn(&mut self) -> bool {
        self.phase = Phase::Spawning;
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.picker.draw(),
        };
        self.next = Some(self.picker.draw());

        let piece = ActivePiece::spawn(kind, self.board.width());
        if self
            .board
            .is_occupied(piece.row, piece.col, piece.kind, piece.rotation)
        {
            self.active = None;
            self.phase = Phase::GameOver;
            info!(
                "game over: {:?} blocked at spawn after {} cleared rows",
                kind, self.cleared_rows
            );
            self.render();
            return false;
        }

        self.place(&piece);
        self.active = Some(piece);
        self.phase = Phase::Falling;
        debug!("spawned {:?}, next {:?}", kind, self.next);
        self.render();
        true
    }

    fn remove(&mut self, piece: &ActivePiece) {
        self.board
            .fill_placement(piece.row, piece.col, piece.kind, piece.rotation, None);
    }

    fn place(&mut self, piece: &ActivePiece) {
        self.board.fill_placement(
            piece.row,
            piece.col,
            piece.kind,
            piece.rotation,
            Some(CellTag::Piece(piece.kind)),
        );
    }

    /// Shift the active piece by (d_row, d_col) if the target is free
    pub fn move_by(&mut self, d_row: i16, d_col: i16) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };

        self.remove(&piece);
        let row = piece.row + d_row;
        let col = piece.col + d_col;
        let moved = !self.board.is_occupied(row, col, piece.kind, piece.rotation);
        if moved {
            piece.row = row;
            piece.col = col;
            self.active = Some(piece);
        }
        self.place(&piece);
        moved
    }

    /// Rotate the active piece one step clockwise in place (no kicks)
    pub fn rotate(&mut self) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };

        self.remove(&piece);
        let rotation = piece.rotation.rotate_cw();
        let rotated = !self.board.is_occupied(piece.row, piece.col, piece.kind, rotation);
        if rotated {
            piece.rotation = rotation;
            self.active = Some(piece);
        }
        self.place(&piece);
        rotated
    }

    /// Move the active piece down until blocked; returns rows travelled
    pub fn drop(&mut self) -> u32 {
        let mut rows = 0;
        while self.move_by(1, 0) {
            rows += 1;
        }
        rows
    }

    /// Remove every complete row, top to bottom
    ///
    /// After a removal the same row index is examined again, since the row above
    /// has shifted into it. The count is added to the cleared-row total and the
    /// drop interval is recomputed.
    ///
    /// Only runs between a lock and the next spawn: with a piece active this
    /// returns 0 and leaves the board alone, so the piece's cells stay in sync.
    pub fn clear_rows(&mut self) -> u32 {
        if self.active.is_some() {
            return 0;
        }
        let mut removed = 0;
        let mut row = 0;
        while row < self.board.height() as usize {
            if self.board.is_row_complete(row) {
                self.board.remove_row(row);
                removed += 1;
            } else {
                row += 1;
            }
        }

        if removed > 0 {
            self.cleared_rows += removed;
            self.drop_interval_ms = next_interval(self.drop_interval_ms, self.cleared_rows);
            debug!(
                "cleared {} rows (total {}), drop interval {}ms",
                removed, self.cleared_rows, self.drop_interval_ms
            );
        }
        removed
    }

    /// One gravity step
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        if self.move_by(1, 0) {
            self.render();
            return TickOutcome::Fell;
        }

        // Landed: the cells stay where they are.
        self.phase = Phase::Locking;
        if let Some(piece) = self.active.take() {
            debug!("locked {:?} at ({}, {})", piece.kind, piece.row, piece.col);
        }

        self.phase = Phase::RowClearing;
        let cleared = self.clear_rows();

        if self.spawn() {
            TickOutcome::Locked { cleared }
        } else {
            TickOutcome::GameOver
        }
    }

    /// Apply a player command and render
    ///
    /// Ignored while paused or after game over. Returns whether the piece changed.
    pub fn apply(&mut self, command: Command) -> bool {
        if !self.is_running() {
            return false;
        }

        let changed = match command {
            Command::Rotate => self.rotate(),
            Command::MoveLeft => self.move_by(0, -1),
            Command::MoveRight => self.move_by(0, 1),
            Command::SoftDrop => self.move_by(1, 0),
            Command::HardDrop => self.drop() > 0,
        };
        self.render();
        changed
    }

    /// Pause or resume gravity and input. No effect after game over.
    pub fn set_paused(&mut self, paused: bool) {
        if self.is_game_over() || self.paused == paused {
            return;
        }
        self.paused = paused;
        debug!("paused = {}", paused);
        self.render();
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Wipe the board and counters and start a new game
    pub fn restart(&mut self) -> bool {
        info!("restart after {} cleared rows", self.cleared_rows);
        self.board.clear();
        self.active = None;
        self.next = None;
        self.drop_interval_ms = INITIAL_DROP_MS;
        self.cleared_rows = 0;
        self.paused = false;
        self.started = true;
        self.spawn()
    }
}
