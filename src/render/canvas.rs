//! Monochrome canvas and its output encodings.

use image::{GrayImage, ImageEncoder, Luma};

use super::font::{FontFace, GlyphCache};
use crate::error::RasterError;

/// A 1-bit drawing surface, `1` = black dot.
///
/// Width is the paper width in dots. The pixel buffer is reserved
/// fallibly so an oversized receipt becomes an error instead of an abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocate a white canvas.
    pub fn new(width: usize, height: usize) -> Result<Self, RasterError> {
        let len = width
            .checked_mul(height)
            .ok_or(RasterError::CanvasTooLarge { width, height })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|e| RasterError::Allocation(format!("{}x{} canvas: {}", width, height, e)))?;
        pixels.resize(len, 0);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the dot at (x, y) is black. Out of bounds reads as white.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x] != 0
    }

    /// Blacken one dot. Out-of-bounds writes are clipped.
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = 1;
        }
    }

    /// Number of black dots.
    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == 0)
    }

    /// Leftmost and rightmost inked columns within rows `y0..y1`.
    pub fn ink_span(&self, y0: usize, y1: usize) -> Option<(usize, usize)> {
        let mut span: Option<(usize, usize)> = None;
        for y in y0..y1.min(self.height) {
            for x in 0..self.width {
                if self.pixels[y * self.width + x] != 0 {
                    span = Some(match span {
                        Some((lo, hi)) => (lo.min(x), hi.max(x)),
                        None => (x, x),
                    });
                }
            }
        }
        span
    }

    /// Draw `text` with its top-left corner at (x, y).
    ///
    /// Bold faces are struck twice, the second pass one dot to the right.
    pub fn draw_text(
        &mut self,
        glyphs: &mut GlyphCache,
        face: &FontFace,
        text: &str,
        x: usize,
        y: usize,
    ) -> Result<(), RasterError> {
        let cell_w = face.char_width();
        let cell_h = face.height;
        let strikes = if face.bold { 2 } else { 1 };

        let mut cursor_x = x;
        for ch in text.chars() {
            if cursor_x >= self.width {
                break;
            }
            let glyph = glyphs.glyph(face, ch)?;
            for gy in 0..cell_h {
                for gx in 0..cell_w {
                    if glyph.get(gy * cell_w + gx).copied().unwrap_or(0) == 0 {
                        continue;
                    }
                    for strike in 0..strikes {
                        self.set_pixel(cursor_x + gx + strike, y + gy);
                    }
                }
            }
            cursor_x += cell_w;
        }
        Ok(())
    }

    /// Black-on-white grayscale image.
    pub fn to_image(&self) -> GrayImage {
        let mut img = GrayImage::new(self.width as u32, self.height as u32);
        for (i, &p) in self.pixels.iter().enumerate() {
            let x = (i % self.width) as u32;
            let y = (i / self.width) as u32;
            img.put_pixel(x, y, Luma([if p != 0 { 0u8 } else { 255u8 }]));
        }
        img
    }

    /// Encode as an 8-bit grayscale PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, RasterError> {
        encode_png(&self.to_image())
    }

    /// Pack into 1-bit rows for a printer raster command.
    pub fn to_raster(&self) -> RawRaster {
        let width_bytes = self.width.div_ceil(8);
        let mut data = vec![0u8; width_bytes * self.height];

        for y in 0..self.height {
            for x in 0..self.width {
                if self.pixels[y * self.width + x] != 0 {
                    data[y * width_bytes + x / 8] |= 0x80 >> (x % 8);
                }
            }
        }

        RawRaster {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// Encode a grayscale image as PNG bytes.
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>, RasterError> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::L8,
        )
        .map_err(|e: image::ImageError| RasterError::Image(e.to_string()))?;
    Ok(png_bytes)
}

/// Packed monochrome raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRaster {
    /// Width in dots
    pub width: usize,
    /// Height in rows
    pub height: usize,
    /// 1 bit per dot, MSB first, 1 = black; rows padded to whole bytes
    pub data: Vec<u8>,
}

impl RawRaster {
    pub fn width_bytes(&self) -> usize {
        self.width.div_ceil(8)
    }
}
