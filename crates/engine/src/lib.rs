//! Game engine: piece state machine, row clearing and gravity.
//!
//! - [`engine`]: spawn, move, rotate, drop, tick and row clearing
//! - [`speed`]: the drop-interval ratchet
//! - [`scheduler`]: gravity timer and the single-owner async loop
//!
//! # Example
//!
//! ```
//! use blockfall_engine::core::{Board, PiecePicker, PieceRule};
//! use blockfall_engine::{Engine, TickOutcome};
//! use blockfall_engine::types::Command;
//!
//! let mut engine = Engine::new(Board::new(10, 20), PiecePicker::new(7, PieceRule::Uniform));
//! assert!(engine.start());
//!
//! engine.apply(Command::MoveLeft);
//! assert_eq!(engine.tick(), TickOutcome::Fell);
//!
//! engine.apply(Command::HardDrop);
//! assert!(matches!(engine.tick(), TickOutcome::Locked { cleared: 0 }));
//! ```

pub mod engine;
pub mod scheduler;
pub mod speed;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use engine::{ActivePiece, Engine, Phase, TickOutcome};
pub use scheduler::{run, Control, GravityTimer, RunExit};
