//! Last-resort rendering used when the primary rasterizer fails.
//!
//! Ignores all formatting: printable ASCII is pulled straight out of the
//! byte stream and drawn left-aligned, at most a handful of lines.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::canvas::Canvas;
use super::font::{FontFace, GlyphCache};
use super::wrap::wrap_text;
use crate::error::RasterError;
use crate::printer::RenderConfig;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Printable ASCII from `bytes`, whitespace collapsed and periods removed.
///
/// ```
/// use rasterpos::render::fallback::extract_text;
///
/// assert_eq!(extract_text(b"\x1b@Total:\n\n  12.50\x1dV\x00"), "@Total: 1250V");
/// ```
pub fn extract_text(bytes: &[u8]) -> String {
    let printable: String = bytes
        .iter()
        .filter(|b| (0x20..=0x7E).contains(*b))
        .map(|&b| b as char)
        .collect();
    WHITESPACE
        .replace_all(&printable, " ")
        .replace('.', "")
        .trim()
        .to_string()
}

/// Render `bytes` as plain wrapped text on a small canvas.
pub fn render_fallback(
    bytes: &[u8],
    paper_width: usize,
    config: &RenderConfig,
) -> Result<Canvas, RasterError> {
    let face = FontFace::regular(config.base_font_height);
    let advance = face.height as f32 * config.line_spacing;

    let text = extract_text(bytes);
    let lines: Vec<String> = if text.is_empty() {
        vec![
            "No readable text found".to_string(),
            format!("Data length: {}", bytes.len()),
        ]
    } else {
        let usable = paper_width.saturating_sub(2 * config.margin);
        wrap_text(&text, &face, usable)
            .into_iter()
            .take(config.fallback_max_lines)
            .collect()
    };

    let needed = (config.fallback_top as f32 + lines.len() as f32 * advance).ceil() as usize;
    let height = needed.max(config.fallback_min_height);
    let mut canvas = Canvas::new(paper_width, height)?;
    let mut glyphs = GlyphCache::new();

    let mut y = config.fallback_top as f32;
    for line in &lines {
        canvas.draw_text(&mut glyphs, &face, line, config.margin, y.round() as usize)?;
        y += advance;
    }

    debug!(
        width = paper_width,
        height,
        lines = lines.len(),
        "rendered fallback bitmap"
    );
    Ok(canvas)
}
