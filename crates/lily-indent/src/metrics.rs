//! Virtual column computation.
//!
//! Maps character positions to on-screen columns: character widths follow
//! UAX #11, and a tab advances to the next multiple of the tab width.

use unicode_width::UnicodeWidthChar;

/// Default tab width (in cells) used when a caller does not specify one.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Virtual (on-screen) column of the character at `column` (a char index).
///
/// Positions past the end of `text` continue with width-1 cells, matching the
/// virtual-space behavior of editor hosts.
pub fn virtual_column(text: &str, column: usize, tab_width: usize) -> usize {
    let mut x = 0;
    let mut chars = text.chars();
    for _ in 0..column {
        match chars.next() {
            Some('\t') => x = next_tab_stop(x, tab_width),
            Some(ch) => x += ch.width().unwrap_or(0),
            None => x += 1,
        }
    }
    x
}

/// Width of the leading whitespace run of `text`, with tabs expanded.
pub fn leading_whitespace_width(text: &str, tab_width: usize) -> usize {
    let mut x = 0;
    for ch in text.chars() {
        match ch {
            '\t' => x = next_tab_stop(x, tab_width),
            ch if ch.is_whitespace() => x += ch.width().unwrap_or(1),
            _ => break,
        }
    }
    x
}

fn next_tab_stop(x: usize, tab_width: usize) -> usize {
    if tab_width == 0 {
        x + 1
    } else {
        (x / tab_width + 1) * tab_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_columns() {
        assert_eq!(virtual_column("abc", 0, 8), 0);
        assert_eq!(virtual_column("abc", 2, 8), 2);
        assert_eq!(virtual_column("abc", 3, 8), 3);
    }

    #[test]
    fn test_tab_advances_to_next_stop() {
        // "a\tb": the tab lands on column 1 and jumps to 8.
        assert_eq!(virtual_column("a\tb", 1, 8), 1);
        assert_eq!(virtual_column("a\tb", 2, 8), 8);
        assert_eq!(virtual_column("a\tb", 3, 8), 9);
        // Narrow tab stops.
        assert_eq!(virtual_column("\t\tx", 2, 4), 8);
    }

    #[test]
    fn test_wide_characters() {
        // CJK characters occupy two cells.
        assert_eq!(virtual_column("你好x", 2, 8), 4);
        assert_eq!(virtual_column("你好x", 3, 8), 5);
    }

    #[test]
    fn test_past_end_is_virtual_space() {
        assert_eq!(virtual_column("ab", 5, 8), 5);
    }

    #[test]
    fn test_leading_whitespace() {
        assert_eq!(leading_whitespace_width("    x", 8), 4);
        assert_eq!(leading_whitespace_width("\t x", 8), 9);
        assert_eq!(leading_whitespace_width("x", 8), 0);
        assert_eq!(leading_whitespace_width("   ", 8), 3);
        assert_eq!(leading_whitespace_width("", 8), 0);
    }
}
