//! # ESC/POS Protocol
//!
//! Byte constants and command builders for the subset of ESC/POS the
//! interpreter understands.
//!
//! ## Module Structure
//!
//! - [`commands`]: Prefix bytes, control characters, init / feed / cut / margins
//! - [`text`]: Alignment, bold, underline, print mode and character size
//!
//! ## Usage Example
//!
//! ```
//! use rasterpos::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align_center());
//! data.extend(text::bold_on());
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold_off());
//! data.extend(text::align_left());
//! data.extend(commands::cut(false));
//! ```

pub mod commands;
pub mod text;
