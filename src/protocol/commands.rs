//! # ESC/POS Control Bytes and Printer Commands
//!
//! Byte constants for the command prefixes and control characters the
//! interpreter recognizes, plus builders for the non-text printer commands
//! (initialize, feed, cut, margins).
//!
//! ## Escape Sequence Structure
//!
//! - Single byte: `LF`, `CR`, `HT`, `FF`
//! - Two bytes: `ESC @`, `ESC F`, `ESC 2`
//! - With parameters: `ESC d n`, `GS V m`, `GS L nL nH`
//!
//! Multi-byte integers use **little-endian** encoding.

// ============================================================================
// PREFIX AND CONTROL CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, cutter and print area commands.
pub const GS: u8 = 0x1D;

/// FS (File Separator) - Kanji / NV command prefix
///
/// Recognized so its sub-command byte is skipped, never interpreted.
pub const FS: u8 = 0x1C;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// CR (Carriage Return) - Treated like LF by the interpreter
pub const CR: u8 = 0x0D;

/// HT (Horizontal Tab)
pub const HT: u8 = 0x09;

/// FF (Form Feed) - Print and eject; preserved as a blank line
pub const FF: u8 = 0x0C;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets text formatting (alignment, bold, size, underline) to defaults.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ```
/// use rasterpos::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// LINE SPACING AND FEED
// ============================================================================

/// Select default line spacing (ESC 2).
#[inline]
pub fn line_spacing_default() -> Vec<u8> {
    vec![ESC, b'2']
}

/// Set line spacing to `n` dots (ESC 3 n).
#[inline]
pub fn line_spacing(n: u8) -> Vec<u8> {
    vec![ESC, b'3', n]
}

/// # Print and Feed n Lines (ESC d n)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC d n  |
/// | Hex     | 1B 64 n  |
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

// ============================================================================
// CUTTER
// ============================================================================

/// # Cut Paper (GS V m)
///
/// `m = 0` full cut, `m = 1` partial cut.
///
/// ```
/// use rasterpos::protocol::commands;
///
/// assert_eq!(commands::cut(false), vec![0x1D, 0x56, 0x00]);
/// assert_eq!(commands::cut(true), vec![0x1D, 0x56, 0x01]);
/// ```
#[inline]
pub fn cut(partial: bool) -> Vec<u8> {
    vec![GS, b'V', u8::from(partial)]
}

// ============================================================================
// PRINT AREA
// ============================================================================

/// Set left margin in dots (GS L nL nH).
#[inline]
pub fn left_margin(dots: u16) -> Vec<u8> {
    let [lo, hi] = u16_le(dots);
    vec![GS, b'L', lo, hi]
}

/// Set print area width in dots (GS W nL nH).
#[inline]
pub fn print_area_width(dots: u16) -> Vec<u8> {
    let [lo, hi] = u16_le(dots);
    vec![GS, b'W', lo, hi]
}

/// Encode a u16 as little-endian bytes.
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}
