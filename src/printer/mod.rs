//! # Printer Module
//!
//! Paper geometry and rendering constants.
//!
//! ## Modules
//!
//! - [`config`]: Paper stocks, width validation, render tuning

pub mod config;

pub use config::{PaperConfig, RenderConfig, TextBitmapConfig};
