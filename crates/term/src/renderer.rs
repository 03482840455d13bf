//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a size change or [`TerminalRenderer::invalidate`])
//! is drawn in full; later frames only rewrite runs of glyphs that changed.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Span, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        match self.last.take() {
            Some(prev) => self.diff_redraw(fb, &prev)?,
            None => self.full_redraw(fb)?,
        }
        self.last = Some(fb.clone());
        Ok(())
    }

    fn full_redraw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        for y in 0..fb.height() {
            self.print_run(
                fb,
                Span {
                    x: 0,
                    y,
                    len: fb.width(),
                },
            )?;
        }
        self.finish()
    }

    fn diff_redraw(&mut self, next: &FrameBuffer, prev: &FrameBuffer) -> Result<()> {
        let resized = prev.width() != next.width() || prev.height() != next.height();
        if resized {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
        }
        for run in next.changed_runs(prev) {
            self.print_run(next, run)?;
        }
        self.finish()
    }

    fn print_run(&mut self, fb: &FrameBuffer, run: Span) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(run.x, run.y))?;
        let mut current: Option<Style> = None;
        let end = (run.x + run.len) as usize;
        for glyph in fb.row(run.y).get(run.x as usize..end).unwrap_or_default() {
            if current != Some(glyph.style) {
                self.apply_style(glyph.style)?;
                current = Some(glyph.style);
            }
            self.stdout.queue(Print(glyph.ch))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }

    fn apply_style(&mut self, style: Style) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(SetForegroundColor(style.fg))?;
        self.stdout.queue(SetBackgroundColor(style.bg))?;
        if style.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.stdout.queue(SetAttribute(Attribute::Dim))?;
        }
        Ok(())
    }
}
