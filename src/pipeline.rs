//! # ESC/POS → bitmap pipeline
//!
//! ```text
//! bytes ─► interpret::parse ─► reconstruct ─► Rasterizer ─► Canvas
//!                                               │ error
//!                                               ▼
//!                                      render_fallback ─► Canvas
//! ```
//!
//! The caller always learns which path produced the image. Only when the
//! fallback fails too is the result an error.

use tracing::{error, info, warn};

use crate::error::RasterError;
use crate::interpret::{self, FormattedLine};
use crate::printer::RenderConfig;
use crate::reconstruct;
use crate::render::{Canvas, Rasterizer, fallback};

/// Which renderer produced a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    /// Full interpretation with formatting
    Primary,
    /// Plain text after the primary renderer failed
    Fallback,
}

/// A rendered receipt and how it was produced.
#[derive(Debug)]
pub struct RenderOutcome {
    pub canvas: Canvas,
    pub path: RenderPath,
}

/// Parse and reconstruct without drawing.
pub fn lines_for(bytes: &[u8], config: &RenderConfig) -> Vec<FormattedLine> {
    reconstruct::reconstruct(interpret::parse(bytes), bytes.len(), config)
}

/// Render an ESC/POS byte stream onto paper `paper_width` dots wide.
///
/// ```
/// use rasterpos::pipeline::{render_escpos, RenderPath};
/// use rasterpos::printer::RenderConfig;
///
/// let outcome = render_escpos(b"\x1b@\x1ba\x01Hello\n", 384, &RenderConfig::default()).unwrap();
/// assert_eq!(outcome.path, RenderPath::Primary);
/// assert_eq!(outcome.canvas.width(), 384);
/// ```
pub fn render_escpos(
    bytes: &[u8],
    paper_width: usize,
    config: &RenderConfig,
) -> Result<RenderOutcome, RasterError> {
    let lines = lines_for(bytes, config);
    info!(
        bytes = bytes.len(),
        lines = lines.len(),
        paper_width,
        "rendering ESC/POS data"
    );

    let primary = Rasterizer::new(paper_width, config).render(&lines);
    let primary_err = match primary {
        Ok(canvas) => {
            return Ok(RenderOutcome {
                canvas,
                path: RenderPath::Primary,
            });
        }
        Err(e) => e,
    };

    warn!(error = %primary_err, "primary rasterizer failed, using fallback");
    match fallback::render_fallback(bytes, paper_width, config) {
        Ok(canvas) => Ok(RenderOutcome {
            canvas,
            path: RenderPath::Fallback,
        }),
        Err(fallback_err) => {
            error!(error = %fallback_err, "fallback renderer failed");
            Err(RasterError::Unrenderable(format!(
                "{}; fallback: {}",
                primary_err, fallback_err
            )))
        }
    }
}
