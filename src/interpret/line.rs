//! Formatted lines and the emitter that builds them from scanner output.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::state::FormatState;
use crate::protocol::text::Alignment;

/// Token joining the left and right halves of a `Split` line.
pub const SPLIT_SEPARATOR: &str = "|||";

/// Characters dropped from every flushed line.
const STRIPPED_CHARS: &[char] = &[
    '€', '£', '¥', '¢', '₹', '\u{0080}', '\u{0000}', '\u{FFFD}',
];

/// A unit-code `D` glued to a number, e.g. `88.49D` or `100D`.
static UNIT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)D").expect("valid unit suffix pattern"));

/// One line of parsed receipt text with the formatting it was printed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedLine {
    /// Line content; empty means an explicit blank line
    pub text: String,
    pub alignment: Alignment,
    pub bold: bool,
    /// Double height or double width was active
    pub double_size: bool,
}

impl FormattedLine {
    pub fn new(text: impl Into<String>, alignment: Alignment, bold: bool, double_size: bool) -> Self {
        Self {
            text: text.into(),
            alignment,
            bold,
            double_size,
        }
    }

    /// Plain left-aligned text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Alignment::Left, false, false)
    }

    /// An explicit blank line.
    pub fn blank() -> Self {
        Self::default()
    }

    /// A left/right row joined by [`SPLIT_SEPARATOR`].
    pub fn split(left: &str, right: &str, bold: bool, double_size: bool) -> Self {
        Self::new(
            format!("{}{}{}", left, SPLIT_SEPARATOR, right),
            Alignment::Split,
            bold,
            double_size,
        )
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// Left and right halves of a `Split` line.
    ///
    /// Returns `None` unless the alignment is `Split` and the separator
    /// divides the text into exactly two parts.
    pub fn split_parts(&self) -> Option<(&str, &str)> {
        if self.alignment != Alignment::Split {
            return None;
        }
        let (left, right) = self.text.split_once(SPLIT_SEPARATOR)?;
        if right.contains(SPLIT_SEPARATOR) {
            return None;
        }
        Some((left, right))
    }
}

impl fmt::Display for FormattedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} (align={}", self.text, self.alignment)?;
        if self.bold {
            write!(f, ", bold")?;
        }
        if self.double_size {
            write!(f, ", double")?;
        }
        write!(f, ")")
    }
}

/// Strip currency symbols, NULs and replacement characters, and drop unit
/// suffixes glued to numbers.
///
/// ```
/// use rasterpos::interpret::line::sanitize;
///
/// assert_eq!(sanitize("Tea £2.50"), "Tea 2.50");
/// assert_eq!(sanitize("88.49D"), "88.49");
/// ```
pub fn sanitize(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();
    UNIT_SUFFIX.replace_all(&stripped, "$1").into_owned()
}

/// Accumulates printable characters and emits [`FormattedLine`]s at line
/// boundaries.
#[derive(Debug, Default)]
pub struct LineEmitter {
    buffer: String,
    lines: Vec<FormattedLine>,
}

impl LineEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_char(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    pub fn push_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Turn the pending buffer into a line formatted with `state`.
    ///
    /// An empty buffer, or one that sanitizes to nothing, emits no line.
    pub fn flush(&mut self, state: &FormatState) {
        if self.buffer.is_empty() {
            return;
        }
        let text = sanitize(&self.buffer);
        self.buffer.clear();
        if text.is_empty() {
            return;
        }
        let line = FormattedLine::new(text, state.alignment, state.bold, state.double_size());
        debug!(line = %line, "flushed");
        self.lines.push(line);
    }

    /// Append an explicit blank line (form feed).
    pub fn push_blank(&mut self, alignment: Alignment) {
        self.lines.push(FormattedLine::new("", alignment, false, false));
    }

    /// Flush what remains and hand back the lines.
    pub fn finish(mut self, state: &FormatState) -> Vec<FormattedLine> {
        self.flush(state);
        self.lines
    }
}
