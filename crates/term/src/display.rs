//! Terminal implementation of the board's [`Display`] hook.

use log::warn;

use crate::core::{Display, Frame};
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;

/// Draws every presented frame to the terminal.
///
/// The render hook cannot fail, so draw errors are logged and the next frame
/// is drawn in full.
pub struct TermDisplay {
    renderer: TerminalRenderer,
    view: GameView,
}

impl TermDisplay {
    pub fn new(view: GameView) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view,
        }
    }
}

impl Display for TermDisplay {
    fn present(&mut self, frame: &Frame<'_>) {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = self.view.render(frame, Viewport::new(w, h));
        if let Err(err) = self.renderer.draw(&fb) {
            warn!("terminal draw failed: {err:#}");
            self.renderer.invalidate();
        }
    }
}
