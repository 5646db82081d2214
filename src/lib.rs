//! # Rasterpos - ESC/POS Receipt Rasterizer
//!
//! Rasterpos turns the ESC/POS byte stream a point-of-sale system would
//! send to a thermal printer into a monochrome bitmap, for printers (or
//! previews) that only accept images. It provides:
//!
//! - **Interpretation**: ESC/POS commands reduced to formatted text lines
//! - **Reconstruction**: Item / amount tables put back into two-column rows
//! - **Rasterization**: Bitmap-font layout with alignment, wrapping and rules
//! - **Fallback**: Plain-text rendering when the full path fails
//! - **Jobs**: Validated print requests submitted to a bitmap sink
//!
//! ## Quick Start
//!
//! ```
//! use rasterpos::{
//!     pipeline::{render_escpos, RenderPath},
//!     printer::{PaperConfig, RenderConfig},
//!     receipt,
//! };
//!
//! let bytes = receipt::invoice();
//! let paper = PaperConfig::MM58;
//!
//! let outcome = render_escpos(&bytes, paper.width_dots, &RenderConfig::default())?;
//! assert_eq!(outcome.path, RenderPath::Primary);
//!
//! let png = outcome.canvas.to_png()?;
//! assert!(!png.is_empty());
//! # Ok::<(), rasterpos::RasterError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`interpret`] | Byte scanner and format-state tracking |
//! | [`reconstruct`] | Header merge and item/amount pairing |
//! | [`render`] | Canvas, fonts, wrapping, rasterizer, fallback |
//! | [`pipeline`] | Bytes to canvas with automatic fallback |
//! | [`job`] | Print request validation and execution |
//! | [`transport`] | Bitmap sinks |
//! | [`protocol`] | ESC/POS command builders |
//! | [`printer`] | Paper sizes and render constants |
//! | [`receipt`] | Sample receipts |
//! | [`error`] | Error types |

pub mod error;
pub mod interpret;
pub mod job;
pub mod pipeline;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod reconstruct;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use error::RasterError;
pub use interpret::FormattedLine;
pub use pipeline::{RenderOutcome, RenderPath, render_escpos};
pub use printer::{PaperConfig, RenderConfig};
pub use protocol::text::Alignment;
