//! # Rasterizer
//!
//! Turns reconstructed [`FormattedLine`]s into a monochrome [`Canvas`].
//!
//! ## Layout
//!
//! Rendering is two passes. Layout decides, for every line, which strings
//! go where and how far the cursor advances; drawing then allocates a
//! canvas of exactly the laid-out height and stamps the glyphs.
//!
//! ```text
//! ┌──────────────────────────────── paper_width ─┐
//! │ top_padding                                  │
//! │ ┌ margin                                     │
//! │ Widget A                              12.50  │  Split
//! │ ──────────────────────────────────────────── │  rule, refitted
//! │               THANK YOU                      │  Center
//! │ bottom_padding                               │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Per line, first match wins:
//!
//! 1. `Split` with two parts: left part at the margin, right part flush right
//! 2. 20+ dashes: redrawn with as many dashes as fit the usable width
//! 3. Fits: positioned by alignment (`Other` draws as left)
//! 4. Too wide: word-wrapped, each piece positioned by alignment
//!
//! ## Modules
//!
//! - [`canvas`]: Pixel buffer and PNG / raster encodings
//! - [`font`]: Spleen-based monospace faces and glyph cache
//! - [`wrap`]: Word wrapping
//! - [`fallback`]: Last-resort plain text rendering
//! - [`text`]: Plain-text print jobs

pub mod canvas;
pub mod fallback;
pub mod font;
pub mod text;
pub mod wrap;

pub use canvas::{Canvas, RawRaster, encode_png};
pub use font::{FontFace, GlyphCache};

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::RasterError;
use crate::interpret::FormattedLine;
use crate::printer::RenderConfig;
use crate::protocol::text::Alignment;

/// Minimum run of dashes treated as a horizontal rule.
static RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-{20,}$").expect("valid rule pattern"));

/// Decimal with three or more fraction digits; group 1 keeps two.
static LONG_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d{2})\d+").expect("valid decimal pattern"));

/// One string placed on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub x: usize,
}

/// One laid-out row of the receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub runs: Vec<Run>,
    pub face: FontFace,
    /// Vertical distance to the next row
    pub advance: f32,
}

/// Lays out and draws formatted lines on a fixed paper width.
#[derive(Debug)]
pub struct Rasterizer {
    paper_width: usize,
    config: RenderConfig,
    glyphs: GlyphCache,
}

impl Rasterizer {
    pub fn new(paper_width: usize, config: &RenderConfig) -> Self {
        Self {
            paper_width,
            config: config.clone(),
            glyphs: GlyphCache::new(),
        }
    }

    pub fn paper_width(&self) -> usize {
        self.paper_width
    }

    /// Width available to a line between the two margins.
    pub fn usable_width(&self) -> usize {
        self.paper_width
            .saturating_sub(self.config.margin.saturating_mul(2))
    }

    /// Lay out every line without drawing.
    pub fn layout(&self, lines: &[FormattedLine]) -> Vec<Row> {
        lines.iter().flat_map(|line| self.layout_line(line)).collect()
    }

    /// Canvas height needed for `rows`, paddings included.
    pub fn height_for(&self, rows: &[Row]) -> usize {
        let content: f32 = rows.iter().map(|row| row.advance).sum();
        (self.config.top_padding as f32 + content + self.config.bottom_padding as f32).ceil() as usize
    }

    /// Lay out and draw `lines`.
    pub fn render(&mut self, lines: &[FormattedLine]) -> Result<Canvas, RasterError> {
        let rows = self.layout(lines);
        let height = self.height_for(&rows);
        if self.paper_width.saturating_mul(height) > self.config.max_canvas_dots {
            return Err(RasterError::CanvasTooLarge {
                width: self.paper_width,
                height,
            });
        }

        let mut canvas = Canvas::new(self.paper_width, height)?;
        let mut y = self.config.top_padding as f32;
        for row in &rows {
            let top = y.round() as usize;
            for run in &row.runs {
                canvas.draw_text(&mut self.glyphs, &row.face, &run.text, run.x, top)?;
            }
            y += row.advance;
        }

        debug!(
            width = self.paper_width,
            height,
            rows = rows.len(),
            "rasterized receipt"
        );
        Ok(canvas)
    }

    fn layout_line(&self, line: &FormattedLine) -> Vec<Row> {
        let face = FontFace::new(self.config.font_height(line.double_size), line.bold);
        let advance = face.height as f32 * self.config.line_spacing;
        let row = |runs: Vec<Run>| Row {
            runs,
            face,
            advance,
        };

        if line.is_blank() {
            return vec![Row {
                runs: Vec::new(),
                face,
                advance: self.config.base_font_height as f32 * self.config.blank_line_factor,
            }];
        }

        if let Some((left, right)) = line.split_parts() {
            let left = LONG_DECIMAL.replace_all(left.trim(), "$1").into_owned();
            let right = right.trim();
            let right_x = self
                .paper_width
                .saturating_sub(face.measure(right).saturating_add(self.config.margin))
                .max(self.config.margin);
            debug!(left = %left, right, "split row");
            return vec![row(vec![
                Run {
                    text: left,
                    x: self.config.margin,
                },
                Run {
                    text: right.to_string(),
                    x: right_x,
                },
            ])];
        }

        if RULE.is_match(line.text.trim()) {
            let dashes = "-".repeat(self.max_dashes(&face));
            let x = self.aligned_x(line.alignment, face.measure(&dashes));
            return vec![row(vec![Run { text: dashes, x }])];
        }

        let usable = self.usable_width();
        if face.measure(&line.text) <= usable {
            let x = self.aligned_x(line.alignment, face.measure(&line.text));
            return vec![row(vec![Run {
                text: line.text.clone(),
                x,
            }])];
        }

        debug!(text = %line.text, "wrapping");
        wrap::wrap_text(&line.text, &face, usable)
            .into_iter()
            .map(|piece| {
                let x = self.aligned_x(line.alignment, face.measure(&piece));
                row(vec![Run { text: piece, x }])
            })
            .collect()
    }

    /// Most dashes whose measured width fits the usable width.
    fn max_dashes(&self, face: &FontFace) -> usize {
        self.usable_width().saturating_sub(usize::from(face.bold)) / face.char_width()
    }

    /// Left edge for a run of `width` dots.
    fn aligned_x(&self, alignment: Alignment, width: usize) -> usize {
        let margin = self.config.margin;
        match alignment {
            Alignment::Center => (self.paper_width.saturating_sub(width) / 2).max(margin),
            Alignment::Right => self
                .paper_width
                .saturating_sub(width.saturating_add(margin))
                .max(margin),
            Alignment::Left | Alignment::Split | Alignment::Other(_) => margin,
        }
    }
}
