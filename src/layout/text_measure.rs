//! Text Measurement
//!
//! Utilities for measuring and wrapping text in terminal cells.
//!
//! Terminal text width depends on Unicode character widths:
//! - ASCII characters: 1 cell
//! - CJK characters: 2 cells (fullwidth)
//! - Emoji: 2 cells (most)
//! - Zero-width characters: 0 cells
//!
//! On top of the Unicode width, [`WrapMetrics`] adds letter spacing after
//! every visible grapheme and expands tabs to a fixed cell count. Every
//! function here takes the metrics so that the visible pass and the shadow
//! pass wrap identically when given the same metrics.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::types::{TextWrap, WrapMetrics};

use super::types::LineMetrics;

/// Display width of a single Unicode codepoint in terminal cells.
///
/// - `0` for control characters, combining marks, zero-width characters
/// - `1` for normal-width characters (ASCII, Latin, Cyrillic, etc.)
/// - `2` for wide characters (CJK ideographs, fullwidth forms, emoji)
#[inline]
pub fn char_width(c: char) -> usize {
    if c.is_control() {
        return 0;
    }
    match c as u32 {
        0x2600..=0x27BF => 2,
        0x1F300..=0x1F5FF => 2,
        0x1F600..=0x1F64F => 2,
        0x1F680..=0x1F6FF => 2,
        0x1F900..=0x1F9FF => 2,
        0x1FA70..=0x1FAFF => 2,
        _ => c.width().unwrap_or(0),
    }
}

/// Display width of a grapheme cluster in terminal cells.
///
/// Emoji sequences (ZWJ, VS16, skin tones, keycaps) and flag pairs are 2
/// cells; a base character with combining marks takes the base width.
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    if grapheme.len() == first.len_utf8() {
        return char_width(first);
    }

    if (0x1F1E6..=0x1F1FF).contains(&(first as u32)) {
        return 2;
    }

    for c in chars {
        match c as u32 {
            0x200D | 0xFE0F | 0x20E3 => return 2,
            0x1F3FB..=0x1F3FF => return 2,
            _ => {}
        }
    }

    char_width(first)
}

/// Cells a grapheme occupies once tab expansion and letter spacing apply.
#[inline]
pub fn grapheme_cells(grapheme: &str, metrics: &WrapMetrics) -> usize {
    if grapheme == "\t" {
        return metrics.tab_width as usize;
    }
    match grapheme_width(grapheme) {
        0 => 0,
        w => w + metrics.letter_spacing as usize,
    }
}

/// Display width of a string in terminal cells.
pub fn string_width(s: &str, metrics: &WrapMetrics) -> usize {
    s.graphemes(true).map(|g| grapheme_cells(g, metrics)).sum()
}

// =============================================================================
// Wrapping
// =============================================================================

/// Wrap text to `max_width` cells using the wrap mode in `metrics`.
///
/// Each explicit newline produces a hard break. Returns an empty `Vec` for
/// empty input. A `max_width` of 0 disables soft wrapping.
pub fn wrap_text(text: &str, max_width: usize, metrics: &WrapMetrics) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        match metrics.wrap {
            _ if max_width == 0 => lines.push(raw_line.to_string()),
            TextWrap::NoWrap => lines.push(raw_line.to_string()),
            TextWrap::Char => wrap_line_char(raw_line, max_width, metrics, &mut lines),
            TextWrap::Word => wrap_line_word(raw_line, max_width, metrics, &mut lines),
        }
    }
    lines
}

/// Wrap text and measure every resulting line.
pub fn measure_lines(text: &str, max_width: usize, metrics: &WrapMetrics) -> Vec<LineMetrics> {
    wrap_text(text, max_width, metrics)
        .into_iter()
        .map(|line| {
            let width = string_width(&line, metrics);
            LineMetrics::new(line, width as u16)
        })
        .collect()
}

fn wrap_line_char(line: &str, max_width: usize, metrics: &WrapMetrics, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0usize;
    push_graphemes(line, max_width, metrics, lines, &mut current, &mut current_width);
    lines.push(current);
}

fn wrap_line_word(line: &str, max_width: usize, metrics: &WrapMetrics, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0usize;

    for segment in line.split_word_bounds() {
        let seg_width = string_width(segment, metrics);

        if current_width + seg_width > max_width {
            if current_width > 0 {
                lines.push(current.trim_end().to_string());
                current = String::new();
                current_width = 0;
            }

            if seg_width > max_width {
                push_graphemes(segment, max_width, metrics, lines, &mut current, &mut current_width);
                continue;
            }

            // No leading whitespace on a soft-wrapped line.
            if is_whitespace(segment) {
                continue;
            }
        }

        current.push_str(segment);
        current_width += seg_width;
    }

    lines.push(current);
}

fn push_graphemes(
    segment: &str,
    max_width: usize,
    metrics: &WrapMetrics,
    lines: &mut Vec<String>,
    current: &mut String,
    current_width: &mut usize,
) {
    for grapheme in segment.graphemes(true) {
        let gw = grapheme_cells(grapheme, metrics);

        if *current_width + gw > max_width && !current.is_empty() {
            lines.push(std::mem::take(current));
            *current_width = 0;
        }

        current.push_str(grapheme);
        *current_width += gw;
    }
}

fn is_whitespace(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

// =============================================================================
// Ellipsis
// =============================================================================

/// Cut a line so that it ends with an ellipsis and fits in `width` cells.
///
/// Used for the last visible line of truncated text.
pub fn ellipsize(line: &str, width: usize, metrics: &WrapMetrics) -> String {
    if width == 0 {
        return String::new();
    }

    let target = width.saturating_sub(grapheme_cells("…", metrics));
    let mut result = String::new();
    let mut current = 0usize;

    for grapheme in line.trim_end().graphemes(true) {
        let gw = grapheme_cells(grapheme, metrics);
        if current + gw > target {
            break;
        }
        result.push_str(grapheme);
        current += gw;
    }

    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word() -> WrapMetrics {
        WrapMetrics::default()
    }

    fn chars() -> WrapMetrics {
        WrapMetrics {
            wrap: TextWrap::Char,
            ..WrapMetrics::default()
        }
    }

    #[test]
    fn test_string_width_ascii() {
        assert_eq!(string_width("hello", &word()), 5);
        assert_eq!(string_width("", &word()), 0);
        assert_eq!(string_width("a b c", &word()), 5);
    }

    #[test]
    fn test_string_width_wide_and_combining() {
        assert_eq!(string_width("日本", &word()), 4);
        assert_eq!(string_width("e\u{301}", &word()), 1);
    }

    #[test]
    fn test_string_width_tabs_and_spacing() {
        let metrics = WrapMetrics {
            letter_spacing: 1,
            tab_width: 2,
            ..WrapMetrics::default()
        };
        // a(1+1) tab(2) b(1+1)
        assert_eq!(string_width("a\tb", &metrics), 6);
    }

    #[test]
    fn test_wrap_char() {
        let lines = wrap_text("hello world", 5, &chars());
        assert_eq!(lines, vec!["hello", " worl", "d"]);
    }

    #[test]
    fn test_wrap_word() {
        let lines = wrap_text("hello world", 5, &word());
        assert_eq!(lines, vec!["hello", "world"]);
    }

    #[test]
    fn test_wrap_word_breaks_long_words() {
        let lines = wrap_text("abcdefgh", 3, &word());
        assert_eq!(lines, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_newlines() {
        assert_eq!(wrap_text("a\nb", 10, &word()), vec!["a", "b"]);
        assert_eq!(wrap_text("a\n\nb", 10, &word()), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_nowrap_keeps_long_lines() {
        let metrics = WrapMetrics {
            wrap: TextWrap::NoWrap,
            ..WrapMetrics::default()
        };
        assert_eq!(wrap_text("hello world\nx", 3, &metrics), vec!["hello world", "x"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_text("", 10, &word()).is_empty());
        assert!(measure_lines("", 10, &word()).is_empty());
    }

    #[test]
    fn test_wrap_is_stable_at_widest_line() {
        // Rewrapping at the widest produced line gives identical breaks.
        let text = "the quick brown fox jumps over the lazy dog";
        let lines = measure_lines(text, 13, &word());
        let widest = lines.iter().map(|l| l.width).max().unwrap_or(0) as usize;
        let again = measure_lines(text, widest, &word());
        assert_eq!(lines, again);
    }

    #[test]
    fn test_measure_lines_widths() {
        let lines = measure_lines("hello world", 5, &word());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].width, 5);
        assert_eq!(lines[1].text, "world");
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("hello world", 6, &word()), "hello…");
        assert_eq!(ellipsize("hello ", 6, &word()), "hello…");
        assert_eq!(ellipsize("hello", 0, &word()), "");
        assert_eq!(string_width(&ellipsize("abcdef", 4, &word()), &word()), 4);
    }
}
