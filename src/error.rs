//! # Error Types
//!
//! This module defines error types used throughout the rasterpos library.

use thiserror::Error;

/// Main error type for rasterpos operations
#[derive(Debug, Error)]
pub enum RasterError {
    /// Caller-supplied job failed validation (byte range, width, text size)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Canvas buffer could not be allocated
    #[error("Allocation failed: {0}")]
    Allocation(String),

    /// Computed canvas exceeds the configured limit
    #[error("Canvas too large: {width}x{height}")]
    CanvasTooLarge { width: usize, height: usize },

    /// Bitmap font could not be loaded
    #[error("Font error: {0}")]
    Font(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Both the primary and the fallback renderer failed
    #[error("Unable to produce an image: {0}")]
    Unrenderable(String),

    /// JSON job parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
