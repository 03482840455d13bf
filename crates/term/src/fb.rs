//! Screen grid the game view paints into and the renderer flushes.
//!
//! Colors are crossterm colors, so a glyph goes to the terminal without any
//! conversion step.

use crossterm::style::Color;

/// 24-bit terminal color.
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

/// Colors and weight of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(rgb(220, 220, 220), rgb(0, 0, 0))
    }
}

/// One terminal column on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::new(' ', Style::default())
    }
}

/// Horizontal run of glyphs on one line, `len` columns from `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Fixed-size grid of glyphs, one per terminal column and line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    /// Blank buffer covering a `width x height` terminal
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.offset(x, y).map(|i| self.glyphs[i])
    }

    /// Glyphs of line `y`; empty past the last line.
    pub fn row(&self, y: u16) -> &[Glyph] {
        match self.offset(0, y) {
            Some(start) => &self.glyphs[start..start + self.width as usize],
            None => &[],
        }
    }

    /// Set one glyph; positions off the screen are dropped.
    pub fn put(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.offset(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    /// Write `text` left to right from `(x, y)`, clipped at the right edge.
    ///
    /// Returns the number of columns written.
    pub fn text(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        let mut written = 0;
        for (cx, ch) in (x..self.width).zip(text.chars()) {
            self.put(cx, y, Glyph::new(ch, style));
            written += 1;
        }
        written
    }

    /// Paint a `w x h` block with copies of `glyph`
    pub fn fill(&mut self, x: u16, y: u16, w: u16, h: u16, glyph: Glyph) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for cy in y..y_end {
            for cx in x..x_end {
                self.put(cx, cy, glyph);
            }
        }
    }

    /// Runs of glyphs that differ from `prev`, line by line
    ///
    /// Buffers of a different size differ everywhere: every line is one run.
    pub fn changed_runs(&self, prev: &FrameBuffer) -> Vec<Span> {
        if prev.width != self.width || prev.height != self.height {
            return (0..self.height)
                .map(|y| Span {
                    x: 0,
                    y,
                    len: self.width,
                })
                .collect();
        }

        let mut runs = Vec::new();
        for y in 0..self.height {
            let (old, new) = (prev.row(y), self.row(y));
            let mut x = 0;
            while x < new.len() {
                if old[x] == new[x] {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < new.len() && old[x] != new[x] {
                    x += 1;
                }
                runs.push(Span {
                    x: start as u16,
                    y,
                    len: (x - start) as u16,
                });
            }
        }
        runs
    }
}
