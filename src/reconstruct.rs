//! # Structural Reconstruction
//!
//! ESC/POS can only express a table row as consecutive lines with their own
//! formatting, so a two-column receipt arrives as
//!
//! ```text
//! Widget A          ← product column
//! 12.50             ← amount column, right aligned
//! ```
//!
//! This pass runs over the flat [`FormattedLine`] list and puts such rows
//! back together:
//!
//! 1. **Header merge**: `Particular` followed by `Amount` becomes one header line.
//! 2. **Product/amount pairing**: product text followed (within four lines)
//!    by a bare amount becomes a `Split` line drawn flush-left / flush-right.
//! 3. Everything else passes through untouched.
//!
//! Afterwards standalone `0.00` rows are dropped, an empty result gets a
//! placeholder line, and blank lines are appended for paper-feed clearance.
//!
//! The heuristics only look at line text, never at bytes, so they can be
//! tuned without touching the interpreter.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::interpret::FormattedLine;
use crate::printer::RenderConfig;
use crate::protocol::text::Alignment;

/// Product column header label.
pub const HEADER_LABEL: &str = "Particular";

/// Header label as it arrives from some drivers, with a stray digit glued on.
const HEADER_LABEL_CORRUPTED: &str = "Particular8";

/// Amount column header label.
pub const HEADER_AMOUNT: &str = "Amount";

/// Replacement for a `Particular` / `Amount` header pair.
pub const MERGED_HEADER: &str = "Particular              Amount";

/// How many lines after a product candidate may hold its amount.
const AMOUNT_LOOKAHEAD: usize = 4;

/// Text marking a line that is never a product description.
const NON_PRODUCT_MARKERS: &[&str] = &[
    "---",
    "Total",
    "VAT",
    "Discount",
    "Change",
    "Service",
    "Taxable",
    "Non-Taxable",
    "Thank you",
    "Good Bye",
    "visit",
    "Invoice",
    "Bill No",
    "Customer",
    "Mode",
    "PAN",
    "Phone",
];

/// A bare amount: `12.50`, `(12.50)` or any decimal.
static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+\.\d{2}|\(\d+\.\d{2}\)|\d+\.\d+)$").expect("valid amount pattern")
});

/// A line starting with a `dd-dd-dddd` date.
static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}").expect("valid date pattern"));

/// A unit-code letter glued to a decimal, e.g. `88.49A`.
static DECIMAL_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+)[A-Z]").expect("valid decimal unit pattern"));

/// Run the full reconstruction pass.
///
/// `byte_len` is the size of the original stream; it only shows up in the
/// placeholder line printed when nothing else survives.
///
/// ```
/// use rasterpos::interpret::FormattedLine;
/// use rasterpos::printer::RenderConfig;
/// use rasterpos::protocol::text::Alignment;
/// use rasterpos::reconstruct::reconstruct;
///
/// let lines = vec![FormattedLine::plain("Widget A"), FormattedLine::plain("12.50")];
/// let out = reconstruct(lines, 20, &RenderConfig::default());
/// assert_eq!(out[0].alignment, Alignment::Split);
/// assert_eq!(out[0].split_parts(), Some(("Widget A", "12.50")));
/// ```
pub fn reconstruct(
    lines: Vec<FormattedLine>,
    byte_len: usize,
    config: &RenderConfig,
) -> Vec<FormattedLine> {
    let mut out = drop_zero_rows(merge_rows(&lines));

    if out.is_empty() {
        warn!(byte_len, "no content extracted, using placeholder line");
        out.push(placeholder(byte_len));
    }

    out.extend(std::iter::repeat_n(
        FormattedLine::blank(),
        config.trailing_blank_lines,
    ));
    out
}

/// The line printed when a stream yields no content at all.
pub fn placeholder(byte_len: usize) -> FormattedLine {
    FormattedLine::new(
        format!("ESC/POS Data ({} bytes)", byte_len),
        Alignment::Center,
        false,
        false,
    )
}

/// Apply the header-merge and product/amount rules.
pub fn merge_rows(lines: &[FormattedLine]) -> Vec<FormattedLine> {
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let current = &lines[i];
        let text = current.text.trim();

        if is_header_label(text)
            && lines
                .get(i + 1)
                .is_some_and(|next| next.text.trim() == HEADER_AMOUNT)
        {
            debug!("merged table header");
            out.push(FormattedLine::new(
                MERGED_HEADER,
                Alignment::Left,
                current.bold,
                current.double_size,
            ));
            i += 2;
            continue;
        }

        if is_product_candidate(text) {
            if let Some(amount_idx) = find_amount(lines, i) {
                let products: Vec<&str> = lines[i..amount_idx]
                    .iter()
                    .map(|line| line.text.trim())
                    .filter(|t| !t.is_empty() && !t.contains("---"))
                    .collect();

                if let Some((last, details)) = products.split_last() {
                    for detail in details {
                        debug!(detail, "product detail");
                        out.push(FormattedLine::new(
                            *detail,
                            Alignment::Left,
                            current.bold,
                            current.double_size,
                        ));
                    }

                    let product = strip_decimal_unit(last);
                    let amount = lines[amount_idx].text.trim();
                    debug!(product = %product, amount, "paired product row");
                    out.push(FormattedLine::split(
                        &product,
                        amount,
                        current.bold,
                        current.double_size,
                    ));
                    i = amount_idx + 1;
                    continue;
                }
            }
        }

        out.push(current.clone());
        i += 1;
    }

    out
}

/// Drop standalone `0.00` rows left behind by empty subtotals.
pub fn drop_zero_rows(lines: Vec<FormattedLine>) -> Vec<FormattedLine> {
    lines
        .into_iter()
        .filter(|line| {
            let keep = line.text.trim() != "0.00";
            if !keep {
                debug!("dropping standalone 0.00 row");
            }
            keep
        })
        .collect()
}

fn is_header_label(text: &str) -> bool {
    text == HEADER_LABEL || text == HEADER_LABEL_CORRUPTED
}

/// Whether a trimmed line may start a product row.
pub fn is_product_candidate(text: &str) -> bool {
    !text.is_empty()
        && text != HEADER_AMOUNT
        && !is_header_label(text)
        && !NON_PRODUCT_MARKERS.iter().any(|marker| text.contains(marker))
        && !DATE_PREFIX.is_match(text)
}

/// Whether a trimmed line is nothing but an amount.
pub fn is_amount(text: &str) -> bool {
    AMOUNT.is_match(text)
}

/// Index of the first amount line within the lookahead window after `start`.
fn find_amount(lines: &[FormattedLine], start: usize) -> Option<usize> {
    let last = (start + AMOUNT_LOOKAHEAD).min(lines.len().saturating_sub(1));
    (start + 1..=last).find(|&j| is_amount(lines[j].text.trim()))
}

fn strip_decimal_unit(text: &str) -> String {
    DECIMAL_UNIT.replace_all(text, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(texts: &[&str]) -> Vec<FormattedLine> {
        texts.iter().map(|t| FormattedLine::plain(*t)).collect()
    }

    #[test]
    fn test_header_merge() {
        let out = merge_rows(&plain(&["Particular", "Amount"]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, MERGED_HEADER);
        assert_eq!(out[0].alignment, Alignment::Left);
        assert!(out[0].text.contains("Particular"));
        assert!(out[0].text.contains("Amount"));
        assert!(out[0].text.contains("  "));
    }

    #[test]
    fn test_header_merge_corrupted_label() {
        let out = merge_rows(&plain(&["  Particular8 ", "Amount"]));
        assert_eq!(out, vec![FormattedLine::plain(MERGED_HEADER)]);
    }

    #[test]
    fn test_header_label_without_amount_passes_through() {
        let out = merge_rows(&plain(&["Particular", "Qty"]));
        assert_eq!(out, plain(&["Particular", "Qty"]));
    }

    #[test]
    fn test_header_keeps_formatting() {
        let lines = vec![
            FormattedLine::new("Particular", Alignment::Center, true, false),
            FormattedLine::new("Amount", Alignment::Right, true, false),
        ];
        let out = merge_rows(&lines);
        assert_eq!(out, vec![FormattedLine::new(MERGED_HEADER, Alignment::Left, true, false)]);
    }

    #[test]
    fn test_product_amount_pairing() {
        let out = merge_rows(&plain(&["Widget A", "12.50"]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].alignment, Alignment::Split);
        assert_eq!(out[0].split_parts(), Some(("Widget A", "12.50")));
    }

    #[test]
    fn test_multi_line_product() {
        let out = merge_rows(&plain(&["Espresso Beans", "1kg bag", "2 x 9.00", "18.00"]));
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], FormattedLine::plain("Espresso Beans"));
        assert_eq!(out[1], FormattedLine::plain("1kg bag"));
        assert_eq!(out[2].split_parts(), Some(("2 x 9.00", "18.00")));
    }

    #[test]
    fn test_separator_not_a_product_line() {
        let out = merge_rows(&plain(&["Widget", "------", "5.00"]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].split_parts(), Some(("Widget", "5.00")));
    }

    #[test]
    fn test_amount_outside_lookahead() {
        let lines = plain(&["Widget", "a", "b", "c", "d", "9.99"]);
        let out = merge_rows(&lines);
        // "Widget" cannot reach 9.99, but "a" can.
        assert_eq!(out[0], FormattedLine::plain("Widget"));
        assert_eq!(out.last().and_then(|l| l.split_parts()), Some(("d", "9.99")));
    }

    #[test]
    fn test_parenthesized_amount() {
        let out = merge_rows(&plain(&["Refund", "(3.50)"]));
        assert_eq!(out[0].split_parts(), Some(("Refund", "(3.50)")));
    }

    #[test]
    fn test_non_product_lines_pass_through() {
        for text in [
            "Sub Total",
            "VAT 13%",
            "Discount",
            "Change",
            "Service Charge",
            "Taxable Amount",
            "Thank you for shopping",
            "Please visit again",
            "12-05-2024 10:30",
            "Invoice #1",
            "Bill No: 42",
            "Customer: Walk-in",
            "Payment Mode: Cash",
            "PAN: 123456",
            "Phone: 555",
            "----------",
        ] {
            let lines = vec![FormattedLine::plain(text), FormattedLine::plain("100.00")];
            let out = merge_rows(&lines);
            assert_eq!(out[0], FormattedLine::plain(text), "{}", text);
        }
    }

    #[test]
    fn test_decimal_unit_letter_removed() {
        let out = merge_rows(&plain(&["Rice 2 x 44.25A", "88.50"]));
        assert_eq!(out[0].split_parts(), Some(("Rice 2 x 44.25", "88.50")));
    }

    #[test]
    fn test_pairing_keeps_candidate_formatting() {
        let lines = vec![
            FormattedLine::new("Widget", Alignment::Left, true, true),
            FormattedLine::new("12.50", Alignment::Right, false, false),
        ];
        let out = merge_rows(&lines);
        assert!(out[0].bold);
        assert!(out[0].double_size);
    }

    #[test]
    fn test_zero_rows_dropped() {
        let out = drop_zero_rows(plain(&["a", " 0.00 ", "10.00"]));
        assert_eq!(out, plain(&["a", "10.00"]));
    }

    #[test]
    fn test_reconstruct_appends_trailing_blank_lines() {
        let config = RenderConfig::default();
        let out = reconstruct(plain(&["Hello"]), 6, &config);
        assert_eq!(out.len(), 1 + config.trailing_blank_lines);
        assert!(out[1..].iter().all(FormattedLine::is_blank));
    }

    #[test]
    fn test_reconstruct_placeholder_when_empty() {
        let config = RenderConfig::default();
        let out = reconstruct(plain(&["0.00"]), 42, &config);
        assert_eq!(out[0].text, "ESC/POS Data (42 bytes)");
        assert_eq!(out[0].alignment, Alignment::Center);
    }

    #[test]
    fn test_blank_lines_pass_through() {
        let lines = vec![FormattedLine::blank(), FormattedLine::plain("x")];
        assert_eq!(merge_rows(&lines), lines);
    }
}
