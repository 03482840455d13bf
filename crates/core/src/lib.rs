//! Core game data - pure, deterministic, and testable
//!
//! This crate holds the piece catalog and the board. It has no dependency on
//! terminals, timers or input devices, which keeps it usable from tests,
//! benchmarks and any front end.
//!
//! # Module Structure
//!
//! - [`pieces`]: tetromino shape catalog, 4 literal rotation states per kind
//! - [`board`]: fixed-size grid with occupancy queries and row removal
//! - [`display`]: the render hook the board pushes frames into
//! - [`rng`]: seeded uniform and 7-bag piece selection
//!
//! # Example
//!
//! ```
//! use blockfall_core::Board;
//! use blockfall_core::types::{PieceKind, Rotation};
//!
//! let board = Board::new(10, 20);
//! assert!(!board.is_occupied(0, 4, PieceKind::T, Rotation::North));
//! // The I piece standing upright cannot hang past the right edge.
//! assert!(board.is_occupied(0, 8, PieceKind::I, Rotation::East));
//! ```

pub mod board;
pub mod display;
pub mod pieces;
pub mod rng;

pub use blockfall_types as types;

pub use board::{Board, Placement, MAX_SIDE};
pub use display::{Display, Frame, NullDisplay, Status};
pub use pieces::{get_shape, shape_at, spawn_col, PieceShape, SPAWN_ROW};
pub use rng::{PiecePicker, PieceRule, SimpleRng};
