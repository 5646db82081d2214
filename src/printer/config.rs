//! # Paper and Rendering Configuration
//!
//! Paper geometry for the supported receipt stocks and the tunable constants
//! used by the rasterizer.
//!
//! ## Supported Paper
//!
//! | Stock | Width (dots) | Resolution |
//! |-------|--------------|------------|
//! | 58mm  | 384 | 203 DPI |
//! | 80mm  | 576 | 203 DPI |
//!
//! ## Usage
//!
//! ```
//! use rasterpos::printer::PaperConfig;
//!
//! let paper = PaperConfig::MM58;
//! println!("Print width: {} dots", paper.width_dots);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RasterError;

/// Largest base font height a job may request.
pub const MAX_FONT_HEIGHT: usize = 200;

/// Upper bound for paddings and offsets a job may request.
pub const MAX_PADDING: usize = 10_000;

/// Smallest paper width a caller may request, in pixels.
pub const MIN_PAPER_WIDTH: usize = 1;

/// Largest paper width a caller may request, in pixels.
pub const MAX_PAPER_WIDTH: usize = 1000;

/// # Paper Configuration
///
/// ## Calculations
///
/// ```text
/// dots_per_mm = dpi / 25.4
/// width_mm = width_dots / dots_per_mm
///
/// For 58mm stock:
///   dots_per_mm = 203 / 25.4 ≈ 8
///   width_mm = 384 / 8 = 48mm printable
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaperConfig {
    /// Stock name
    pub name: &'static str,

    /// Printable width in dots (pixels)
    pub width_dots: usize,

    /// Resolution in dots per inch
    pub dpi: u16,
}

impl PaperConfig {
    /// 58mm receipt stock (48mm printable).
    pub const MM58: Self = Self {
        name: "58mm",
        width_dots: 384,
        dpi: 203,
    };

    /// 80mm receipt stock (72mm printable).
    pub const MM80: Self = Self {
        name: "80mm",
        width_dots: 576,
        dpi: 203,
    };

    /// Calculate dots per millimeter
    ///
    /// ```
    /// use rasterpos::printer::PaperConfig;
    ///
    /// assert!((PaperConfig::MM80.dots_per_mm() - 8.0).abs() < 0.1);
    /// ```
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate printable width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }

    /// Parse a paper name: `"58mm"`, `"80mm"`, or a pixel width.
    pub fn parse(s: &str) -> Result<Self, RasterError> {
        match s.trim().to_lowercase().as_str() {
            "58" | "58mm" => Ok(Self::MM58),
            "80" | "80mm" => Ok(Self::MM80),
            other => {
                let width: i64 = other.parse().map_err(|_| {
                    RasterError::InvalidInput(format!(
                        "Unknown paper '{}'. Use '58mm', '80mm' or a pixel width",
                        s
                    ))
                })?;
                Ok(Self {
                    name: "custom",
                    width_dots: validate_width(width)?,
                    dpi: 203,
                })
            }
        }
    }
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self::MM58
    }
}

/// Check a caller-supplied paper width against `[1, 1000]`.
pub fn validate_width(width: i64) -> Result<usize, RasterError> {
    if width < MIN_PAPER_WIDTH as i64 || width > MAX_PAPER_WIDTH as i64 {
        return Err(RasterError::InvalidInput(
            "Paper width must be between 1 and 1000 pixels".to_string(),
        ));
    }
    Ok(width as usize)
}

// ============================================================================
// RENDER CONFIGURATION
// ============================================================================

/// Tunable constants for the ESC/POS rasterizer.
///
/// Heights are in pixels; `line_spacing` and `blank_line_factor` multiply a
/// font height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Glyph cell height for normal text
    pub base_font_height: usize,
    /// Multiplier applied to double-height / double-width lines
    pub double_size_scale: f32,
    /// Left and right margin
    pub margin: usize,
    /// Advance per drawn line, as a multiple of the font height
    pub line_spacing: f32,
    /// Advance for an explicit empty line, as a multiple of the base height
    pub blank_line_factor: f32,
    /// Space above the first line
    pub top_padding: usize,
    /// Space below the last line
    pub bottom_padding: usize,
    /// Empty lines appended after the content for paper-feed clearance
    pub trailing_blank_lines: usize,
    /// Maximum lines drawn by the fallback renderer
    pub fallback_max_lines: usize,
    /// First line offset of the fallback renderer
    pub fallback_top: usize,
    /// Minimum fallback canvas height
    pub fallback_min_height: usize,
    /// Refuse canvases with more dots than this (width × height)
    pub max_canvas_dots: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            base_font_height: 24,
            double_size_scale: 1.5,
            margin: 4,
            line_spacing: 1.2,
            blank_line_factor: 0.6,
            top_padding: 10,
            bottom_padding: 80,
            trailing_blank_lines: 3,
            fallback_max_lines: 8,
            fallback_top: 20,
            fallback_min_height: 200,
            max_canvas_dots: 1 << 28,
        }
    }
}

impl RenderConfig {
    /// Check caller-supplied overrides against `paper_width`.
    ///
    /// Every value that reaches the rasterizer stays small enough that
    /// layout arithmetic and glyph allocation cannot overflow.
    pub fn validate(&self, paper_width: usize) -> Result<(), RasterError> {
        if !(1..=MAX_FONT_HEIGHT).contains(&self.base_font_height) {
            return Err(invalid("Base font height must be between 1 and 200"));
        }
        if !in_range(self.double_size_scale, 4.0) {
            return Err(invalid("Double size scale must be above 0 and at most 4"));
        }
        if !in_range(self.line_spacing, 10.0) {
            return Err(invalid("Line spacing must be above 0 and at most 10"));
        }
        if !self.blank_line_factor.is_finite() || !(0.0..=10.0).contains(&self.blank_line_factor) {
            return Err(invalid("Blank line factor must be between 0 and 10"));
        }
        if self.margin.saturating_mul(2) >= paper_width {
            return Err(invalid("Margin must be less than half the paper width"));
        }
        let offsets = [
            self.top_padding,
            self.bottom_padding,
            self.fallback_top,
            self.fallback_min_height,
        ];
        if offsets.iter().any(|&v| v > MAX_PADDING) {
            return Err(invalid("Paddings must be at most 10000 pixels"));
        }
        if self.trailing_blank_lines > 100 || self.fallback_max_lines > 100 {
            return Err(invalid("Line counts must be at most 100"));
        }
        Ok(())
    }

    /// Font height for a line, honoring the double-size multiplier.
    pub fn font_height(&self, double_size: bool) -> usize {
        if double_size {
            (self.base_font_height as f32 * self.double_size_scale).round() as usize
        } else {
            self.base_font_height
        }
    }
}

/// Constants for the plain-text bitmap path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextBitmapConfig {
    /// Padding on every side
    pub padding: usize,
    /// Extra space added to the text size to get the line height
    pub line_gap: usize,
    /// Blank space below the text for tearing off
    pub bottom_feed: usize,
}

impl TextBitmapConfig {
    /// Check caller-supplied overrides against `paper_width`.
    pub fn validate(&self, paper_width: usize) -> Result<(), RasterError> {
        if self.padding.saturating_mul(2) >= paper_width {
            return Err(invalid("Padding must be less than half the paper width"));
        }
        if self.line_gap > MAX_PADDING || self.bottom_feed > MAX_PADDING {
            return Err(invalid("Paddings must be at most 10000 pixels"));
        }
        Ok(())
    }
}

impl Default for TextBitmapConfig {
    fn default() -> Self {
        Self {
            padding: 8,
            line_gap: 8,
            bottom_feed: 100,
        }
    }
}

/// Finite, above zero and at most `max`.
fn in_range(value: f32, max: f32) -> bool {
    value.is_finite() && value > 0.0 && value <= max
}

fn invalid(message: &str) -> RasterError {
    RasterError::InvalidInput(message.to_string())
}

// ============================================================================
// TESTS
// ============================================================================
