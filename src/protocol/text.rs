//! # ESC/POS Text Styling Commands
//!
//! Alignment, emphasis, underline and character-size commands, plus the
//! [`Alignment`] type shared by the interpreter and the rasterizer.
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E n / ESC F / GS B n | Emphasized text |
//! | Underline | ESC - n | Underlined text (tracked, not rendered) |
//! | Combined | ESC ! n | Bold / double height / double width / underline bits |
//! | Size | GS ! n | Width multiplier (low nibble), height multiplier (high nibble) |
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! Split                     |PRODUCT          12.50
//! ```

use std::fmt;

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Horizontal placement of a rendered line.
///
/// `Split` never appears on the wire: the structural reconstructor produces
/// it for rows drawn as a flush-left part and a flush-right part. `Other`
/// keeps an unrecognized `ESC a` parameter verbatim; it is drawn as `Left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Split,
    Other(u8),
}

impl Alignment {
    /// Map an `ESC a` parameter to an alignment.
    ///
    /// Accepts both the binary codes (0, 1, 2) and the ASCII digits some
    /// drivers send instead ('0', '1', '2').
    ///
    /// ```
    /// use rasterpos::protocol::text::Alignment;
    ///
    /// assert_eq!(Alignment::from_param(1), Alignment::Center);
    /// assert_eq!(Alignment::from_param(b'2'), Alignment::Right);
    /// assert_eq!(Alignment::from_param(5), Alignment::Other(5));
    /// ```
    pub fn from_param(n: u8) -> Self {
        match n {
            0 | b'0' => Alignment::Left,
            1 | b'1' => Alignment::Center,
            2 | b'2' => Alignment::Right,
            other => Alignment::Other(other),
        }
    }

    /// The wire parameter for this alignment, if it has one.
    pub fn param(self) -> Option<u8> {
        match self {
            Alignment::Left => Some(0),
            Alignment::Center => Some(1),
            Alignment::Right => Some(2),
            Alignment::Split => None,
            Alignment::Other(n) => Some(n),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Left => write!(f, "left"),
            Alignment::Center => write!(f, "center"),
            Alignment::Right => write!(f, "right"),
            Alignment::Split => write!(f, "split"),
            Alignment::Other(n) => write!(f, "other({})", n),
        }
    }
}

/// # Set Text Alignment (ESC a n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
///
/// - `n = 0` / `'0'`: Left (default)
/// - `n = 1` / `'1'`: Center
/// - `n = 2` / `'2'`: Right
///
/// ```
/// use rasterpos::protocol::text::align;
///
/// assert_eq!(align(1), vec![0x1B, 0x61, 0x01]);
/// ```
#[inline]
pub fn align(n: u8) -> Vec<u8> {
    vec![ESC, b'a', n]
}

/// Convenience function for left alignment
#[inline]
pub fn align_left() -> Vec<u8> {
    align(0)
}

/// Convenience function for center alignment
#[inline]
pub fn align_center() -> Vec<u8> {
    align(1)
}

/// Convenience function for right alignment
#[inline]
pub fn align_right() -> Vec<u8> {
    align(2)
}

// ============================================================================
// EMPHASIS (BOLD)
// ============================================================================

/// Bold on/off with a parameter (ESC E n).
#[inline]
pub fn bold(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', u8::from(enabled)]
}

/// Bold on (ESC E 1).
#[inline]
pub fn bold_on() -> Vec<u8> {
    bold(true)
}

/// Bold off, parameterless form (ESC F).
#[inline]
pub fn bold_off() -> Vec<u8> {
    vec![ESC, b'F']
}

/// Bold on/off, GS variant (GS B n).
#[inline]
pub fn gs_bold(enabled: bool) -> Vec<u8> {
    vec![GS, b'B', u8::from(enabled)]
}

// ============================================================================
// UNDERLINE
// ============================================================================

/// Underline on/off (ESC - n).
#[inline]
pub fn underline(enabled: bool) -> Vec<u8> {
    vec![ESC, b'-', u8::from(enabled)]
}

// ============================================================================
// COMBINED PRINT MODE (ESC !)
// ============================================================================

/// ESC ! bit: emphasized
pub const MODE_BOLD: u8 = 0x08;
/// ESC ! bit: double height
pub const MODE_DOUBLE_HEIGHT: u8 = 0x10;
/// ESC ! bit: double width
pub const MODE_DOUBLE_WIDTH: u8 = 0x20;
/// ESC ! bit: underline
pub const MODE_UNDERLINE: u8 = 0x80;

/// # Select Print Mode (ESC ! n)
///
/// `n` is a bit set of the `MODE_*` flags.
///
/// ```
/// use rasterpos::protocol::text::{print_mode, MODE_BOLD, MODE_DOUBLE_HEIGHT};
///
/// assert_eq!(print_mode(MODE_BOLD | MODE_DOUBLE_HEIGHT), vec![0x1B, 0x21, 0x18]);
/// ```
#[inline]
pub fn print_mode(n: u8) -> Vec<u8> {
    vec![ESC, b'!', n]
}

// ============================================================================
// CHARACTER SIZE (GS !)
// ============================================================================

/// # Select Character Size (GS ! n)
///
/// `width` and `height` are multipliers 1..=8; the high nibble carries the
/// height, the low nibble the width.
#[inline]
pub fn char_size(width: u8, height: u8) -> Vec<u8> {
    let w = width.clamp(1, 8) - 1;
    let h = height.clamp(1, 8) - 1;
    vec![GS, b'!', (h << 4) | w]
}
