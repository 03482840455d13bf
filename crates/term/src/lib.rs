//! Terminal rendering for the board.
//!
//! A small game-oriented layer: board frames are laid out into a framebuffer
//! of styled glyphs, and the framebuffer is flushed to the terminal with
//! crossterm, rewriting only what changed since the last frame.

pub mod display;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use display::TermDisplay;
pub use fb::{rgb, FrameBuffer, Glyph, Span, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
