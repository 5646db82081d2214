//! # Print Jobs
//!
//! The boundary between callers and the renderer. A [`PrintRequest`] is
//! what arrives over the wire (JSON, camelCase, tagged by `method`):
//!
//! ```json
//! { "method": "printRawBytes", "bytes": [27, 64, 72, 105, 10], "paperWidth": 576 }
//! { "method": "printText", "text": "Hello", "textSize": 24 }
//! ```
//!
//! Both methods accept an optional `render` object overriding the layout
//! constants; overrides are range-checked against the paper width.
//!
//! [`PrintRequest::validate`] checks every field and yields a [`ValidJob`]
//! with concrete types; [`execute`] renders it and hands the bitmap to a
//! [`BitmapSink`].

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::RasterError;
use crate::pipeline::{self, RenderPath};
use crate::printer::{RenderConfig, TextBitmapConfig};
use crate::printer::config::validate_width;
use crate::render::text::render_text_bitmap_with;
use crate::transport::{BitmapSink, FailureCode, PrintOutcome};

pub const DEFAULT_PAPER_WIDTH: i64 = 384;
pub const DEFAULT_TEXT_SIZE: i64 = 24;
pub const MIN_TEXT_SIZE: i64 = 1;
pub const MAX_TEXT_SIZE: i64 = 100;

fn default_paper_width() -> i64 {
    DEFAULT_PAPER_WIDTH
}

fn default_text_size() -> i64 {
    DEFAULT_TEXT_SIZE
}

/// A print request as received from a caller, before validation.
///
/// Numbers are kept wide so out-of-range values reach validation instead
/// of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum PrintRequest {
    /// Render an ESC/POS byte stream.
    #[serde(rename_all = "camelCase")]
    PrintRawBytes {
        #[serde(default)]
        bytes: Option<Vec<i64>>,
        #[serde(default = "default_paper_width")]
        paper_width: i64,
        /// Accepted for compatibility; the interpreter picks its own sizes.
        #[serde(default)]
        text_size: i64,
        /// Overrides for the rasterizer constants
        #[serde(default, skip_serializing_if = "Option::is_none")]
        render: Option<RenderConfig>,
    },
    /// Render plain text.
    #[serde(rename_all = "camelCase")]
    PrintText {
        #[serde(default)]
        text: Option<String>,
        #[serde(default = "default_text_size")]
        text_size: i64,
        #[serde(default = "default_paper_width")]
        paper_width: i64,
        /// Overrides for padding and line spacing
        #[serde(default, skip_serializing_if = "Option::is_none")]
        render: Option<TextBitmapConfig>,
    },
}

/// A request whose fields passed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidJob {
    RawBytes {
        bytes: Vec<u8>,
        paper_width: usize,
        config: RenderConfig,
    },
    Text {
        text: String,
        text_size: usize,
        paper_width: usize,
        config: TextBitmapConfig,
    },
}

impl PrintRequest {
    pub fn from_json(json: &str) -> Result<Self, RasterError> {
        Ok(serde_json::from_str(json)?)
    }

    /// ESC/POS request with default width.
    pub fn raw_bytes(bytes: &[u8]) -> Self {
        PrintRequest::PrintRawBytes {
            bytes: Some(bytes.iter().map(|&b| i64::from(b)).collect()),
            paper_width: DEFAULT_PAPER_WIDTH,
            text_size: 0,
            render: None,
        }
    }

    /// Plain-text request with default size and width.
    pub fn text(text: impl Into<String>) -> Self {
        PrintRequest::PrintText {
            text: Some(text.into()),
            text_size: DEFAULT_TEXT_SIZE,
            paper_width: DEFAULT_PAPER_WIDTH,
            render: None,
        }
    }

    /// Check every field, converting to concrete types.
    pub fn validate(&self) -> Result<ValidJob, RasterError> {
        match self {
            PrintRequest::PrintRawBytes {
                bytes,
                paper_width,
                render,
                ..
            } => {
                let values = match bytes {
                    Some(values) if !values.is_empty() => values,
                    _ => return Err(invalid("Bytes array is required")),
                };
                let paper_width = validate_width(*paper_width)?;
                let bytes = values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| {
                        u8::try_from(v).map_err(|_| {
                            invalid(format!(
                                "Invalid byte value at index {}: {}. Bytes must be 0-255.",
                                i, v
                            ))
                        })
                    })
                    .collect::<Result<Vec<u8>, _>>()?;
                let config = render.clone().unwrap_or_default();
                config.validate(paper_width)?;

                Ok(ValidJob::RawBytes {
                    bytes,
                    paper_width,
                    config,
                })
            }
            PrintRequest::PrintText {
                text,
                text_size,
                paper_width,
                render,
            } => {
                let text = match text {
                    Some(text) if !text.is_empty() => text.clone(),
                    _ => return Err(invalid("Text is required")),
                };
                if !(MIN_TEXT_SIZE..=MAX_TEXT_SIZE).contains(text_size) {
                    return Err(invalid("Text size must be between 1 and 100"));
                }
                let paper_width = validate_width(*paper_width)?;
                let config = render.clone().unwrap_or_default();
                config.validate(paper_width)?;

                Ok(ValidJob::Text {
                    text,
                    text_size: *text_size as usize,
                    paper_width,
                    config,
                })
            }
        }
    }
}

fn invalid(message: impl Into<String>) -> RasterError {
    RasterError::InvalidInput(message.into())
}

/// Render a validated job and submit the bitmap to `sink`.
pub fn execute(job: &ValidJob, sink: &mut dyn BitmapSink) -> PrintOutcome {
    match job {
        ValidJob::RawBytes {
            bytes,
            paper_width,
            config,
        } => match pipeline::render_escpos(bytes, *paper_width, config) {
            Ok(outcome) => {
                if outcome.path == RenderPath::Fallback {
                    warn!("submitting fallback bitmap");
                }
                info!(
                    width = outcome.canvas.width(),
                    height = outcome.canvas.height(),
                    "submitting ESC/POS bitmap"
                );
                sink.submit(&outcome.canvas.to_image())
            }
            Err(e) => PrintOutcome::failure(
                FailureCode::RenderError,
                format!("Failed to create bitmap from ESC/POS data: {}", e),
            ),
        },
        ValidJob::Text {
            text,
            text_size,
            paper_width,
            config,
        } => match render_text_bitmap_with(text, *text_size, *paper_width, config) {
            Ok(canvas) => {
                info!(
                    width = canvas.width(),
                    height = canvas.height(),
                    "submitting text bitmap"
                );
                sink.submit(&canvas.to_image())
            }
            Err(e) => PrintOutcome::failure(
                FailureCode::TextRenderError,
                format!("Failed to create bitmap from text: {}", e),
            ),
        },
    }
}

/// Validate then execute, reporting validation errors as `INVALID_INPUT`.
pub fn run(request: &PrintRequest, sink: &mut dyn BitmapSink) -> PrintOutcome {
    match request.validate() {
        Ok(job) => execute(&job, sink),
        Err(RasterError::InvalidInput(message)) => {
            warn!(message = %message, "rejected print request");
            PrintOutcome::failure(FailureCode::InvalidInput, message)
        }
        Err(e) => PrintOutcome::failure(FailureCode::InvalidInput, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemorySink;
    use pretty_assertions::assert_eq;

    fn message(err: RasterError) -> String {
        match err {
            RasterError::InvalidInput(m) => m,
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_parse_raw_bytes_defaults() {
        let req = PrintRequest::from_json(r#"{"method":"printRawBytes","bytes":[72,105]}"#).unwrap();
        assert_eq!(
            req,
            PrintRequest::PrintRawBytes {
                bytes: Some(vec![72, 105]),
                paper_width: 384,
                text_size: 0,
                render: None,
            }
        );
    }

    #[test]
    fn test_parse_text_defaults() {
        let req = PrintRequest::from_json(r#"{"method":"printText","text":"Hi","paperWidth":576}"#).unwrap();
        assert_eq!(
            req,
            PrintRequest::PrintText {
                text: Some("Hi".to_string()),
                text_size: 24,
                paper_width: 576,
                render: None,
            }
        );
    }

    #[test]
    fn test_parse_render_overrides() {
        let req = PrintRequest::from_json(
            r#"{"method":"printRawBytes","bytes":[65],"render":{"margin":10}}"#,
        )
        .unwrap();
        let ValidJob::RawBytes { config, .. } = req.validate().unwrap() else {
            panic!("expected raw bytes job");
        };
        assert_eq!(config.margin, 10);
        assert_eq!(config.base_font_height, 24);
    }

    #[test]
    fn test_render_overrides_range_checked() {
        let req = PrintRequest::from_json(
            r#"{"method":"printRawBytes","bytes":[72,105,10],"render":{"margin":18446744073709551615}}"#,
        )
        .unwrap();
        assert_eq!(
            message(req.validate().unwrap_err()),
            "Margin must be less than half the paper width"
        );

        let req = PrintRequest::from_json(
            r#"{"method":"printRawBytes","bytes":[65],"render":{"baseFontHeight":100000}}"#,
        )
        .unwrap();
        assert_eq!(
            message(req.validate().unwrap_err()),
            "Base font height must be between 1 and 200"
        );

        let mut sink = MemorySink::new();
        let outcome = run(&req, &mut sink);
        assert_eq!(outcome.code(), Some(FailureCode::InvalidInput));
        assert!(sink.images.is_empty());
    }

    #[test]
    fn test_text_render_overrides() {
        let req = PrintRequest::from_json(
            r#"{"method":"printText","text":"Hi","render":{"bottomFeed":0}}"#,
        )
        .unwrap();
        let mut sink = MemorySink::new();
        assert!(run(&req, &mut sink).is_success());
        // 1 line × 32 + 16
        assert_eq!(sink.images[0].height(), 48);

        let wide = PrintRequest::from_json(
            r#"{"method":"printText","text":"Hi","render":{"padding":500}}"#,
        )
        .unwrap();
        assert_eq!(
            message(wide.validate().unwrap_err()),
            "Padding must be less than half the paper width"
        );
    }

    #[test]
    fn test_unknown_method_rejected() {
        assert!(PrintRequest::from_json(r#"{"method":"printPdf"}"#).is_err());
    }

    #[test]
    fn test_bytes_required() {
        let missing = PrintRequest::PrintRawBytes {
            bytes: None,
            paper_width: 384,
            text_size: 0,
            render: None,
        };
        assert_eq!(message(missing.validate().unwrap_err()), "Bytes array is required");

        let empty = PrintRequest::raw_bytes(&[]);
        assert_eq!(message(empty.validate().unwrap_err()), "Bytes array is required");
    }

    #[test]
    fn test_byte_range_checked() {
        let req = PrintRequest::PrintRawBytes {
            bytes: Some(vec![65, 300]),
            paper_width: 384,
            text_size: 0,
            render: None,
        };
        assert_eq!(
            message(req.validate().unwrap_err()),
            "Invalid byte value at index 1: 300. Bytes must be 0-255."
        );

        let negative = PrintRequest::PrintRawBytes {
            bytes: Some(vec![-1]),
            paper_width: 384,
            text_size: 0,
            render: None,
        };
        assert_eq!(
            message(negative.validate().unwrap_err()),
            "Invalid byte value at index 0: -1. Bytes must be 0-255."
        );
    }

    #[test]
    fn test_paper_width_checked() {
        for width in [0, 1001, -5] {
            let req = PrintRequest::PrintText {
                text: Some("x".into()),
                text_size: 24,
                paper_width: width,
                render: None,
            };
            assert_eq!(
                message(req.validate().unwrap_err()),
                "Paper width must be between 1 and 1000 pixels"
            );
        }
    }

    #[test]
    fn test_text_checks() {
        let empty = PrintRequest::text("");
        assert_eq!(message(empty.validate().unwrap_err()), "Text is required");

        for size in [0, 101] {
            let req = PrintRequest::PrintText {
                text: Some("x".into()),
                text_size: size,
                paper_width: 384,
                render: None,
            };
            assert_eq!(
                message(req.validate().unwrap_err()),
                "Text size must be between 1 and 100"
            );
        }
    }

    #[test]
    fn test_run_raw_bytes() {
        let mut sink = MemorySink::new();
        let outcome = run(&PrintRequest::raw_bytes(b"\x1b@Hello\n"), &mut sink);
        assert!(outcome.is_success());
        assert_eq!(sink.images.len(), 1);
        assert_eq!(sink.images[0].width(), 384);
    }

    #[test]
    fn test_run_text() {
        let mut sink = MemorySink::new();
        let outcome = run(&PrintRequest::text("Hello\nWorld"), &mut sink);
        assert!(outcome.is_success());
        // 2 lines × 32 + 16 + 100
        assert_eq!(sink.images[0].height(), 180);
    }

    #[test]
    fn test_run_reports_invalid_input() {
        let mut sink = MemorySink::new();
        let outcome = run(&PrintRequest::text(""), &mut sink);
        assert_eq!(outcome.code(), Some(FailureCode::InvalidInput));
        assert_eq!(outcome.message(), "Text is required");
        assert!(sink.images.is_empty());
    }

    struct RejectingSink;

    impl BitmapSink for RejectingSink {
        fn submit(&mut self, _image: &image::GrayImage) -> PrintOutcome {
            PrintOutcome::failure(FailureCode::PrintFailed, "printer offline")
        }
    }

    #[test]
    fn test_sink_failure_passes_through() {
        let outcome = run(&PrintRequest::text("x"), &mut RejectingSink);
        assert_eq!(outcome.code(), Some(FailureCode::PrintFailed));
    }
}
