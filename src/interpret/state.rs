//! Format-state tracking for the byte scanner.

use crate::protocol::text::{
    Alignment, MODE_BOLD, MODE_DOUBLE_HEIGHT, MODE_DOUBLE_WIDTH, MODE_UNDERLINE,
};

/// Text formatting in effect at the scanner cursor.
///
/// Lives for one parse call. `underline` is tracked so `ESC -` and the
/// underline bit of `ESC !` have somewhere to land, but nothing renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatState {
    pub alignment: Alignment,
    pub bold: bool,
    pub double_height: bool,
    pub double_width: bool,
    pub underline: bool,
}

impl FormatState {
    /// Back to power-on defaults (ESC @).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Double height and double width collapse into one sizing flag.
    pub fn double_size(&self) -> bool {
        self.double_height || self.double_width
    }

    /// Apply an `ESC ! n` print-mode byte. Every flag is overwritten.
    pub fn apply_print_mode(&mut self, n: u8) {
        self.bold = n & MODE_BOLD != 0;
        self.double_height = n & MODE_DOUBLE_HEIGHT != 0;
        self.double_width = n & MODE_DOUBLE_WIDTH != 0;
        self.underline = n & MODE_UNDERLINE != 0;
    }

    /// Apply a `GS ! n` character-size byte: low nibble width, high nibble height.
    pub fn apply_char_size(&mut self, n: u8) {
        self.double_width = n & 0x0F != 0;
        self.double_height = n & 0xF0 != 0;
    }
}
