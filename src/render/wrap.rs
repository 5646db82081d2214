//! Word wrapping against measured text width.

use super::font::FontFace;

/// Break `text` into lines no wider than `max_width` dots.
///
/// Breaks at spaces; a word that is too wide on its own is broken between
/// characters. Never returns an empty list. The only line that may exceed
/// `max_width` is a single character that is wider than it.
///
/// ```
/// use rasterpos::render::font::FontFace;
/// use rasterpos::render::wrap::wrap_text;
///
/// let face = FontFace::regular(24); // 12 dots per character
/// assert_eq!(wrap_text("hello big world", &face, 120), vec!["hello big", "world"]);
/// assert_eq!(wrap_text("", &face, 120), vec![""]);
/// ```
pub fn wrap_text(text: &str, face: &FontFace, max_width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    if !text.contains(' ') && face.measure(text) > max_width {
        return break_chars(text, face, max_width);
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if face.measure(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if face.measure(word) > max_width {
            let mut pieces = break_chars(word, face, max_width);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        } else {
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Break between characters, greedily filling each line.
fn break_chars(text: &str, face: &FontFace, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if face.measure(&current) <= max_width {
            continue;
        }
        current.pop();
        if current.is_empty() {
            // Wider than the line on its own.
            lines.push(ch.to_string());
        } else {
            lines.push(std::mem::replace(&mut current, ch.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn face() -> FontFace {
        FontFace::regular(24)
    }

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(wrap_text("Tea 2.50", &face(), 384), vec!["Tea 2.50"]);
    }

    #[test]
    fn test_breaks_at_spaces() {
        // 10 characters per line
        let lines = wrap_text("the quick brown fox jumps", &face(), 120);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_long_word_broken_by_character() {
        let lines = wrap_text("ab 0123456789012345 cd", &face(), 120);
        assert_eq!(lines, vec!["ab", "0123456789", "012345 cd"]);
    }

    #[test]
    fn test_no_spaces_goes_to_character_breaking() {
        let lines = wrap_text("abcdefghijklmnopqrstuvwxyz", &face(), 120);
        assert_eq!(lines, vec!["abcdefghij", "klmnopqrst", "uvwxyz"]);
    }

    #[test]
    fn test_every_line_fits() {
        let text = "Grilled chicken sandwich with extra cheese and a side of fries";
        for max_width in [60, 100, 200, 376] {
            let lines = wrap_text(text, &face(), max_width);
            assert!(!lines.is_empty());
            for line in &lines {
                assert!(face().measure(line) <= max_width, "{:?} at {}", line, max_width);
            }
        }
    }

    #[test]
    fn test_character_wider_than_line() {
        let lines = wrap_text("abc", &face(), 5);
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_bold_width_counts() {
        // 10 regular characters fit in 120, but bold adds a dot.
        let bold = FontFace::new(24, true);
        let lines = wrap_text("abcdefghij", &bold, 120);
        assert_eq!(lines, vec!["abcdefghi", "j"]);
    }

    #[test]
    fn test_only_spaces() {
        assert_eq!(wrap_text("   ", &face(), 120), vec![""]);
    }
}
