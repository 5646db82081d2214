//! # Receipt Builders
//!
//! Sample ESC/POS streams shaped like what point-of-sale software sends:
//! a centered shop header, a two-column item table printed as alternating
//! left / right-aligned lines, totals and a footer.
//!
//! Used by the `demo` CLI command and as fixtures in tests.

use crate::protocol::commands;
use crate::protocol::text::{self, Alignment, MODE_BOLD, MODE_DOUBLE_HEIGHT, MODE_DOUBLE_WIDTH};

/// Width of the dashed rules, in characters.
const RULE_WIDTH: usize = 32;

/// Fluent builder for ESC/POS byte streams.
///
/// ```
/// use rasterpos::receipt::EscPosBuilder;
///
/// let bytes = EscPosBuilder::new().bold(true).line("Hi").build();
/// assert_eq!(bytes, vec![0x1B, 0x40, 0x1B, 0x45, 0x01, b'H', b'i', 0x0A]);
/// ```
#[derive(Debug, Clone)]
pub struct EscPosBuilder {
    bytes: Vec<u8>,
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EscPosBuilder {
    /// Start a stream with `ESC @`.
    pub fn new() -> Self {
        Self {
            bytes: commands::init(),
        }
    }

    pub fn raw(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.bytes.extend_from_slice(bytes.as_ref());
        self
    }

    /// Text followed by a line feed.
    pub fn line(mut self, text: &str) -> Self {
        self.bytes.extend_from_slice(text.as_bytes());
        self.bytes.push(commands::LF);
        self
    }

    /// `Split` has no wire form and is ignored.
    pub fn align(self, alignment: Alignment) -> Self {
        match alignment.param() {
            Some(n) => self.raw(text::align(n)),
            None => self,
        }
    }

    pub fn bold(self, enabled: bool) -> Self {
        self.raw(text::bold(enabled))
    }

    /// `ESC !` with bold and double size, or back to normal.
    pub fn headline(self, enabled: bool) -> Self {
        let mode = if enabled {
            MODE_BOLD | MODE_DOUBLE_HEIGHT | MODE_DOUBLE_WIDTH
        } else {
            0
        };
        self.raw(text::print_mode(mode))
    }

    pub fn rule(self) -> Self {
        self.line(&"-".repeat(RULE_WIDTH))
    }

    /// Item on the left, amount on its own right-aligned line.
    pub fn item(self, description: &str, amount: &str) -> Self {
        self.align(Alignment::Left)
            .line(description)
            .align(Alignment::Right)
            .line(amount)
            .align(Alignment::Left)
    }

    pub fn feed(self, lines: u8) -> Self {
        self.raw(commands::feed_lines(lines))
    }

    pub fn cut(self) -> Self {
        self.raw(commands::cut(true))
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

// ============================================================================
// RECEIPT TEMPLATES
// ============================================================================

/// A café invoice with an item table, totals and footer.
pub fn invoice() -> Vec<u8> {
    EscPosBuilder::new()
        .align(Alignment::Center)
        .headline(true)
        .line("CORNER CAFE")
        .headline(false)
        .line("12 Market Street")
        .line("Phone: 555-0142")
        .align(Alignment::Left)
        .line("Bill No: 1042")
        .line("12-05-2026 09:41")
        .rule()
        .bold(true)
        .line("Particular")
        .align(Alignment::Right)
        .line("Amount")
        .bold(false)
        .item("Flat White", "4.50")
        .line("Almond Croissant")
        .item("2 x 3.25", "6.50")
        .item("Sparkling Water", "2.00")
        .rule()
        .line("Sub Total: 13.00")
        .line("Discount: 0.00")
        .bold(true)
        .line("Total: 13.00")
        .bold(false)
        .align(Alignment::Right)
        .line("0.00")
        .align(Alignment::Left)
        .line("Payment Mode: Cash")
        .align(Alignment::Center)
        .line("Thank you for visiting!")
        .feed(3)
        .cut()
        .build()
}

/// A short centered notice.
pub fn notice() -> Vec<u8> {
    EscPosBuilder::new()
        .align(Alignment::Center)
        .bold(true)
        .line("NOTICE")
        .bold(false)
        .line("Kitchen closes at 22:00")
        .align(Alignment::Right)
        .line("- management")
        .cut()
        .build()
}

/// Long lines that need wrapping, plus a full-width rule.
pub fn wrapping() -> Vec<u8> {
    EscPosBuilder::new()
        .line("This line is far too long to fit on a fifty-eight millimetre roll and must wrap")
        .raw(text::char_size(2, 2))
        .line("Double size text also wraps when it runs out of room")
        .raw(text::char_size(1, 1))
        .line(&"-".repeat(64))
        .align(Alignment::Center)
        .line("Centered text that is long enough to wrap onto a second line")
        .build()
}

/// Names accepted by [`by_name`].
pub fn list_receipts() -> &'static [&'static str] {
    &["invoice", "notice", "wrapping"]
}

/// Look up a template by name.
pub fn by_name(name: &str) -> Option<Vec<u8>> {
    match name {
        "invoice" => Some(invoice()),
        "notice" => Some(notice()),
        "wrapping" => Some(wrapping()),
        _ => None,
    }
}
