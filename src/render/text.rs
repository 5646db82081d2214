//! Plain-text print jobs.
//!
//! No ESC/POS involved: the text is split into paragraphs on `\n`, wrapped
//! to the paper and drawn left-aligned in a single face.

use tracing::debug;

use super::canvas::Canvas;
use super::font::{FontFace, GlyphCache};
use super::wrap::wrap_text;
use crate::error::RasterError;
use crate::printer::TextBitmapConfig;

/// Render `text` at `text_size` dots per line with the default spacing.
pub fn render_text_bitmap(
    text: &str,
    text_size: usize,
    paper_width: usize,
) -> Result<Canvas, RasterError> {
    render_text_bitmap_with(text, text_size, paper_width, &TextBitmapConfig::default())
}

/// Render `text` with explicit padding and spacing.
///
/// Height is `lines × (text_size + line_gap) + 2 × padding + bottom_feed`.
pub fn render_text_bitmap_with(
    text: &str,
    text_size: usize,
    paper_width: usize,
    config: &TextBitmapConfig,
) -> Result<Canvas, RasterError> {
    let face = FontFace::regular(text_size);
    let usable = paper_width.saturating_sub(config.padding.saturating_mul(2));

    let lines: Vec<String> = text
        .split('\n')
        .flat_map(|paragraph| {
            if paragraph.is_empty() {
                vec![String::new()]
            } else {
                wrap_text(paragraph, &face, usable)
            }
        })
        .collect();

    let line_height = face.height + config.line_gap;
    let height = lines.len() * line_height + 2 * config.padding + config.bottom_feed;
    let mut canvas = Canvas::new(paper_width, height)?;
    let mut glyphs = GlyphCache::new();

    for (index, line) in lines.iter().enumerate() {
        let y = config.padding + index * line_height + config.line_gap / 2;
        canvas.draw_text(&mut glyphs, &face, line, config.padding, y)?;
    }

    debug!(
        width = paper_width,
        height,
        lines = lines.len(),
        "rendered text bitmap"
    );
    Ok(canvas)
}
