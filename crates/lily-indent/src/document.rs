//! The document surface the indent engine reads through.
//!
//! [`Document`] is a thin wrapper over what editor hosts already provide:
//! line text lookup, character classification, virtual column computation and
//! a backward bracket search. Hosts with their own buffer and highlighter
//! implement the trait directly; everyone else can load text into the
//! built-in [`TextDocument`] snapshot.

use crate::metrics::{self, DEFAULT_TAB_WIDTH};
use crate::syntax::{CharClass, LineScan, ScanState};
use ropey::Rope;

/// A line/column position in a document (0-based, columns in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number.
    pub line: usize,
    /// Character index within the line.
    pub column: usize,
}

impl Position {
    /// Create a position.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Read access to a LilyPond document, as the indent engine needs it.
pub trait Document {
    /// Number of lines in the document.
    fn line_count(&self) -> usize;

    /// Text of `line` without its line ending.
    fn line(&self, line: usize) -> Option<String>;

    /// Length of `line` in characters; 0 when out of range.
    fn line_length(&self, line: usize) -> usize;

    /// The character at `(line, column)`.
    fn char_at(&self, line: usize, column: usize) -> Option<char>;

    /// Whether the character at `(line, column)` is part of a string literal.
    fn is_string(&self, line: usize, column: usize) -> bool;

    /// Whether the character at `(line, column)` is part of a comment.
    fn is_comment(&self, line: usize, column: usize) -> bool;

    /// Virtual column of the first non-whitespace character of `line`.
    fn first_virtual_column(&self, line: usize) -> usize;

    /// Virtual column of the character at `(line, column)`.
    fn to_virtual_column(&self, line: usize, column: usize) -> usize;

    /// Whether the `)` at `(line, column)` is the final closing parenthesis
    /// of an embedded Scheme expression.
    fn ends_scheme_expression(&self, line: usize, column: usize) -> bool;

    /// Position of the closest unmatched `open` delimiter before
    /// `(line, column)`.
    ///
    /// Scans backwards over code characters only; characters classified as
    /// string or comment never match and never count. Returns `None` when no
    /// unmatched opener exists or `open` has no single-character closer.
    fn anchor(&self, line: usize, column: usize, open: char) -> Option<Position> {
        let close = match open {
            '(' => ')',
            '{' => '}',
            '[' => ']',
            '<' => '>',
            _ => return None,
        };
        let mut nesting = 0usize;
        let mut l = line;
        let mut upper = Some(column);
        loop {
            let chars: Vec<char> = self.line(l)?.chars().collect();
            let end = upper.map_or(chars.len(), |c| c.min(chars.len()));
            for i in (0..end).rev() {
                if self.is_string(l, i) || self.is_comment(l, i) {
                    continue;
                }
                if chars[i] == close {
                    nesting += 1;
                } else if chars[i] == open {
                    if nesting == 0 {
                        return Some(Position::new(l, i));
                    }
                    nesting -= 1;
                }
            }
            if l == 0 {
                return None;
            }
            l -= 1;
            upper = None;
        }
    }
}

/// An immutable, rope-backed document snapshot.
///
/// The whole text is classified once on construction; lookups afterwards are
/// cheap. The tab width only affects virtual column computation.
#[derive(Debug, Clone)]
pub struct TextDocument {
    rope: Rope,
    scans: Vec<LineScan>,
    tab_width: usize,
}

impl TextDocument {
    /// Load `text` with the default tab width.
    pub fn new(text: &str) -> Self {
        Self::with_tab_width(text, DEFAULT_TAB_WIDTH)
    }

    /// Load `text`, computing virtual columns with the given tab width.
    pub fn with_tab_width(text: &str, tab_width: usize) -> Self {
        let rope = Rope::from_str(text);
        let mut scans = Vec::with_capacity(rope.len_lines());
        let mut state = ScanState::default();
        for slice in rope.lines() {
            let mut line = slice.to_string();
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            let (scan, next) = state.scan_line(&line);
            scans.push(scan);
            state = next;
        }
        Self {
            rope,
            scans,
            tab_width,
        }
    }

    /// The tab width used for virtual columns.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    fn scan(&self, line: usize) -> Option<&LineScan> {
        self.scans.get(line)
    }
}

impl Document for TextDocument {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line(&self, line: usize) -> Option<String> {
        let mut text = self.rope.get_line(line)?.to_string();
        if text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        Some(text)
    }

    fn line_length(&self, line: usize) -> usize {
        self.scan(line).map_or(0, LineScan::len)
    }

    fn char_at(&self, line: usize, column: usize) -> Option<char> {
        if column >= self.line_length(line) {
            return None;
        }
        self.rope.get_line(line)?.get_char(column)
    }

    fn is_string(&self, line: usize, column: usize) -> bool {
        self.scan(line)
            .is_some_and(|scan| scan.class_at(column) == CharClass::String)
    }

    fn is_comment(&self, line: usize, column: usize) -> bool {
        self.scan(line)
            .is_some_and(|scan| scan.class_at(column) == CharClass::Comment)
    }

    fn first_virtual_column(&self, line: usize) -> usize {
        self.line(line)
            .map_or(0, |text| metrics::leading_whitespace_width(&text, self.tab_width))
    }

    fn to_virtual_column(&self, line: usize, column: usize) -> usize {
        self.line(line)
            .map_or(column, |text| metrics::virtual_column(&text, column, self.tab_width))
    }

    fn ends_scheme_expression(&self, line: usize, column: usize) -> bool {
        self.scan(line)
            .is_some_and(|scan| scan.ends_scheme_expression(column))
    }
}
