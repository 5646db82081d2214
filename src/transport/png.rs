//! PNG file sink.
//!
//! The first bitmap goes to the configured path; later ones get a numeric
//! suffix (`receipt.png`, `receipt-2.png`, ...).

use std::path::{Path, PathBuf};

use image::GrayImage;
use tracing::{info, warn};

use super::{BitmapSink, FailureCode, PrintOutcome};
use crate::error::RasterError;
use crate::render::encode_png;

/// Writes submitted bitmaps as PNG files.
#[derive(Debug, Clone)]
pub struct PngFileSink {
    path: PathBuf,
    written: Vec<PathBuf>,
}

impl PngFileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            written: Vec::new(),
        }
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn next_path(&self) -> PathBuf {
        let n = self.written.len() + 1;
        if n == 1 {
            return self.path.clone();
        }
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "receipt".to_string());
        let name = match self.path.extension() {
            Some(ext) => format!("{}-{}.{}", stem, n, ext.to_string_lossy()),
            None => format!("{}-{}", stem, n),
        };
        self.path.with_file_name(name)
    }

    fn write(&mut self, image: &GrayImage) -> Result<PathBuf, RasterError> {
        let path = self.next_path();
        let png = encode_png(image)?;
        std::fs::write(&path, png)?;
        self.written.push(path.clone());
        Ok(path)
    }
}

impl BitmapSink for PngFileSink {
    fn submit(&mut self, image: &GrayImage) -> PrintOutcome {
        match self.write(image) {
            Ok(path) => {
                info!(path = %path.display(), "saved bitmap");
                PrintOutcome::success(format!("Saved to {}", path.display()))
            }
            Err(e) => {
                warn!(error = %e, "could not save bitmap");
                PrintOutcome::failure(FailureCode::PrintFailed, e.to_string())
            }
        }
    }
}
