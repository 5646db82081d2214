//! Monospace bitmap faces built on the Spleen font family.
//!
//! Every face is a fixed cell of `height × height/2` dots. Glyphs come from
//! the smallest Spleen face at least as tall as the cell and are scaled
//! nearest-neighbour to fit it.

use std::collections::HashMap;

use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

use crate::error::RasterError;

/// A native Spleen face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spleen {
    /// 6x12
    Small,
    /// 8x16
    Medium,
    /// 12x24
    Large,
}

impl Spleen {
    fn for_height(height: usize) -> Self {
        match height {
            0..=12 => Spleen::Small,
            13..=16 => Spleen::Medium,
            _ => Spleen::Large,
        }
    }

    fn width(self) -> usize {
        match self {
            Spleen::Small => 6,
            Spleen::Medium => 8,
            Spleen::Large => 12,
        }
    }

    fn height(self) -> usize {
        match self {
            Spleen::Small => 12,
            Spleen::Medium => 16,
            Spleen::Large => 24,
        }
    }

    fn font_data(self) -> &'static [u8] {
        match self {
            Spleen::Small => FONT_6X12,
            Spleen::Medium => FONT_8X16,
            Spleen::Large => FONT_12X24,
        }
    }
}

/// A monospace face at a given pixel height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontFace {
    pub height: usize,
    /// Glyphs are double-struck one dot to the right
    pub bold: bool,
}

impl FontFace {
    pub fn new(height: usize, bold: bool) -> Self {
        Self {
            height: height.max(1),
            bold,
        }
    }

    pub fn regular(height: usize) -> Self {
        Self::new(height, false)
    }

    /// Advance width of one character cell.
    pub fn char_width(&self) -> usize {
        (self.height / 2).max(1)
    }

    /// Rendered width of `text` in dots.
    ///
    /// Bold text is one dot wider than the cells it covers.
    pub fn measure(&self, text: &str) -> usize {
        let count = text.chars().count();
        if count == 0 {
            return 0;
        }
        count * self.char_width() + usize::from(self.bold)
    }
}

/// Glyph bitmap for `ch` in a `width × height` cell.
///
/// Returns one byte per dot, `1` for ink. Characters missing from the
/// font come back as a box outline.
pub fn generate_glyph(ch: char, width: usize, height: usize) -> Result<Vec<u8>, RasterError> {
    let mut glyph = vec![0u8; width * height];
    if width == 0 || height == 0 {
        return Ok(glyph);
    }

    let source = Spleen::for_height(height);
    let (src_w, src_h) = (source.width(), source.height());
    let mut spleen = PSF2Font::new(source.font_data())
        .map_err(|_| RasterError::Font(format!("cannot load Spleen {}x{}", src_w, src_h)))?;

    let utf8 = ch.to_string();
    match spleen.glyph_for_utf8(utf8.as_bytes()) {
        Some(spleen_glyph) => {
            let mut src = vec![0u8; src_w * src_h];
            for (row_y, row) in spleen_glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if row_y < src_h && col_x < src_w && on {
                        src[row_y * src_w + col_x] = 1;
                    }
                }
            }
            scale_bitmap(&src, src_w, src_h, &mut glyph, width, height);
        }
        None => draw_box(&mut glyph, width, height),
    }

    Ok(glyph)
}

/// Nearest-neighbour resize of a 0/1 bitmap.
fn scale_bitmap(src: &[u8], src_w: usize, src_h: usize, dst: &mut [u8], dst_w: usize, dst_h: usize) {
    for dy in 0..dst_h {
        let sy = dy * src_h / dst_h;
        for dx in 0..dst_w {
            let sx = dx * src_w / dst_w;
            dst[dy * dst_w + dx] = src[sy * src_w + sx];
        }
    }
}

fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}

/// Glyph bitmaps keyed by cell height and character.
#[derive(Debug, Default)]
pub struct GlyphCache {
    glyphs: HashMap<(usize, char), Vec<u8>>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bitmap for `ch` in `face`, generated on first use.
    pub fn glyph(&mut self, face: &FontFace, ch: char) -> Result<&[u8], RasterError> {
        let key = (face.height, ch);
        if !self.glyphs.contains_key(&key) {
            let glyph = generate_glyph(ch, face.char_width(), face.height)?;
            self.glyphs.insert(key, glyph);
        }
        Ok(self.glyphs.get(&key).map(Vec::as_slice).unwrap_or(&[]))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
