//! # Bitmap Transport Layer
//!
//! Rendered receipts leave the crate through a [`BitmapSink`]. A sink takes
//! one black-on-white image and reports a [`PrintOutcome`]; it never sees
//! ESC/POS bytes.
//!
//! ## Available Sinks
//!
//! - [`png`]: Writes each bitmap to a PNG file
//! - [`MemorySink`]: Keeps bitmaps in memory, for tests and previews

pub mod png;

pub use png::PngFileSink;

use std::fmt;

use image::GrayImage;
use serde::Serialize;

/// Machine-readable failure codes reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCode {
    /// The job failed validation
    InvalidInput,
    /// Plain text could not be rendered
    TextRenderError,
    /// ESC/POS data could not be rendered on any path
    RenderError,
    /// The sink rejected the bitmap
    PrintFailed,
}

impl FailureCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCode::InvalidInput => "INVALID_INPUT",
            FailureCode::TextRenderError => "TEXT_RENDER_ERROR",
            FailureCode::RenderError => "RENDER_ERROR",
            FailureCode::PrintFailed => "PRINT_FAILED",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of handing a bitmap to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PrintOutcome {
    Success { message: String },
    Failure { code: FailureCode, message: String },
}

impl PrintOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        PrintOutcome::Success {
            message: message.into(),
        }
    }

    pub fn failure(code: FailureCode, message: impl Into<String>) -> Self {
        PrintOutcome::Failure {
            code,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PrintOutcome::Success { .. })
    }

    pub fn code(&self) -> Option<FailureCode> {
        match self {
            PrintOutcome::Success { .. } => None,
            PrintOutcome::Failure { code, .. } => Some(*code),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PrintOutcome::Success { message } | PrintOutcome::Failure { message, .. } => message,
        }
    }
}

impl fmt::Display for PrintOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintOutcome::Success { message } => write!(f, "ok: {}", message),
            PrintOutcome::Failure { code, message } => write!(f, "{}: {}", code, message),
        }
    }
}

/// Destination for rendered bitmaps.
pub trait BitmapSink {
    /// Print (or store) one bitmap.
    fn submit(&mut self, image: &GrayImage) -> PrintOutcome;
}

/// Sink that keeps every submitted bitmap.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub images: Vec<GrayImage>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BitmapSink for MemorySink {
    fn submit(&mut self, image: &GrayImage) -> PrintOutcome {
        self.images.push(image.clone());
        PrintOutcome::success(format!(
            "stored {}x{} bitmap",
            image.width(),
            image.height()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_code_strings() {
        assert_eq!(FailureCode::InvalidInput.as_str(), "INVALID_INPUT");
        assert_eq!(FailureCode::TextRenderError.to_string(), "TEXT_RENDER_ERROR");
        assert_eq!(FailureCode::RenderError.as_str(), "RENDER_ERROR");
        assert_eq!(FailureCode::PrintFailed.as_str(), "PRINT_FAILED");
    }

    #[test]
    fn test_outcome_json() {
        let outcome = PrintOutcome::failure(FailureCode::PrintFailed, "paper out");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["code"], "PRINT_FAILED");
        assert_eq!(json["message"], "paper out");

        let ok = serde_json::to_value(PrintOutcome::success("done")).unwrap();
        assert_eq!(ok["status"], "success");
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        let outcome = sink.submit(&GrayImage::new(4, 2));
        assert!(outcome.is_success());
        assert_eq!(outcome.message(), "stored 4x2 bitmap");
        assert_eq!(sink.images.len(), 1);
    }
}
