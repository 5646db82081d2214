//! # ESC/POS Interpreter
//!
//! Walks a raw ESC/POS byte stream once and turns it into a list of
//! [`FormattedLine`]s.
//!
//! ## Architecture
//!
//! ```text
//! bytes → Scanner ──► FormatState (alignment, bold, size, underline)
//!            │
//!            └──────► LineEmitter ──► Vec<FormattedLine>
//! ```
//!
//! The scanner never fails: unknown commands and truncated parameters are
//! skipped, and every branch consumes at least one byte, so a stream of
//! `n` bytes is processed in `O(n)`.
//!
//! ## Example
//!
//! ```
//! use rasterpos::interpret::parse;
//! use rasterpos::protocol::text::Alignment;
//!
//! let lines = parse(b"\x1b\x61\x01RECEIPT\n");
//! assert_eq!(lines[0].text, "RECEIPT");
//! assert_eq!(lines[0].alignment, Alignment::Center);
//! ```

pub mod line;
pub mod state;

pub use line::{FormattedLine, LineEmitter, SPLIT_SEPARATOR};
pub use state::FormatState;

use tracing::{debug, trace};

use crate::protocol::commands::{CR, ESC, FF, FS, GS, HT, LF};
use crate::protocol::text::Alignment;

/// Extended bytes dropped instead of being decoded as Latin-1.
///
/// Euro (Windows-1252), the pound-like 0x9C, cent, pound, generic currency
/// and yen.
const CURRENCY_BYTES: &[u8] = &[0x80, 0x9C, 0xA2, 0xA3, 0xA4, 0xA5];

/// Parse an ESC/POS byte stream into formatted lines.
pub fn parse(bytes: &[u8]) -> Vec<FormattedLine> {
    debug!(len = bytes.len(), "parsing ESC/POS stream");
    let mut scanner = Scanner::new(bytes);
    scanner.run();
    let lines = scanner.emitter.finish(&scanner.state);
    debug!(lines = lines.len(), "parsing complete");
    lines
}

/// Single-pass cursor over the byte stream.
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    state: FormatState,
    emitter: LineEmitter,
}

impl<'a> Scanner<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            state: FormatState::default(),
            emitter: LineEmitter::new(),
        }
    }

    /// Byte at `offset` from the cursor, if the stream is long enough.
    fn arg(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn flush(&mut self) {
        self.emitter.flush(&self.state);
    }

    fn run(&mut self) {
        while self.pos < self.bytes.len() {
            let byte = self.bytes[self.pos];
            match byte {
                ESC => self.esc(),
                GS => self.gs(),
                FS => {
                    if let Some(cmd) = self.arg(1) {
                        trace!("FS command 0x{:02X} skipped", cmd);
                        self.pos += 2;
                    } else {
                        self.pos += 1;
                    }
                }
                LF | CR => {
                    self.flush();
                    self.pos += 1;
                }
                HT => {
                    self.emitter.push_str("    ");
                    self.pos += 1;
                }
                FF => {
                    self.flush();
                    self.emitter.push_blank(self.state.alignment);
                    self.pos += 1;
                }
                0x20..=0x7E => {
                    self.emitter.push_char(char::from(byte));
                    self.pos += 1;
                }
                0x80..=0xFF => {
                    if !CURRENCY_BYTES.contains(&byte) {
                        self.emitter.push_char(char::from(byte));
                    }
                    self.pos += 1;
                }
                _ => {
                    if byte != 0 {
                        trace!("control byte 0x{:02X} skipped", byte);
                    }
                    self.pos += 1;
                }
            }
        }
    }

    /// `ESC` commands (0x1B).
    fn esc(&mut self) {
        let Some(cmd) = self.arg(1) else {
            self.pos += 1;
            return;
        };

        match cmd {
            // ESC @ - initialize
            0x40 => {
                self.flush();
                self.state.reset();
                debug!("ESC @ initialize");
                self.pos += 2;
            }
            // ESC a n - alignment
            0x61 => match self.arg(2) {
                Some(n) => {
                    self.flush();
                    self.state.alignment = Alignment::from_param(n);
                    debug!(raw = n, alignment = %self.state.alignment, "ESC a alignment");
                    self.pos += 3;
                }
                None => self.pos += 2,
            },
            // ESC E n - bold; bare ESC E turns bold on
            0x45 => match self.arg(2) {
                Some(n) => {
                    self.state.bold = n != 0;
                    debug!(bold = self.state.bold, "ESC E bold");
                    self.pos += 3;
                }
                None => {
                    self.state.bold = true;
                    self.pos += 2;
                }
            },
            // ESC F - bold off
            0x46 => {
                self.state.bold = false;
                debug!("ESC F bold off");
                self.pos += 2;
            }
            // ESC - n - underline
            0x2D => match self.arg(2) {
                Some(n) => {
                    self.state.underline = n != 0;
                    self.pos += 3;
                }
                None => self.pos += 2,
            },
            // ESC ! n - print mode
            0x21 => match self.arg(2) {
                Some(n) => {
                    self.state.apply_print_mode(n);
                    debug!(
                        bold = self.state.bold,
                        double_height = self.state.double_height,
                        double_width = self.state.double_width,
                        "ESC ! print mode"
                    );
                    self.pos += 3;
                }
                None => self.pos += 2,
            },
            // ESC 2 - default line spacing
            0x32 => self.pos += 2,
            // ESC 3 n - line spacing
            0x33 => self.pos += if self.arg(2).is_some() { 3 } else { 2 },
            // ESC d n - print and feed; blank lines come from the stream, not from here
            0x64 => match self.arg(2) {
                Some(_) => {
                    self.flush();
                    self.pos += 3;
                }
                None => self.pos += 2,
            },
            other => {
                debug!("unknown ESC command 0x{:02X}", other);
                self.pos += 2;
            }
        }
    }

    /// `GS` commands (0x1D).
    fn gs(&mut self) {
        let Some(cmd) = self.arg(1) else {
            self.pos += 1;
            return;
        };

        match cmd {
            // GS ! n - character size
            0x21 => match self.arg(2) {
                Some(n) => {
                    self.state.apply_char_size(n);
                    debug!("GS ! size 0x{:02X}", n);
                    self.pos += 3;
                }
                None => self.pos += 2,
            },
            // GS B n - bold
            0x42 => match self.arg(2) {
                Some(n) => {
                    self.state.bold = n != 0;
                    self.pos += 3;
                }
                None => self.pos += 2,
            },
            // GS V m - cut
            0x56 => {
                self.flush();
                debug!("GS V cut");
                self.pos += if self.arg(2).is_some() { 3 } else { 2 };
            }
            // GS L nL nH - left margin, GS W nL nH - print area width
            0x4C | 0x57 => {
                self.pos += if self.arg(3).is_some() { 4 } else { 2 };
            }
            other => {
                debug!("unknown GS command 0x{:02X}", other);
                self.pos += 2;
            }
        }
    }
}
