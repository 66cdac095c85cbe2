#![warn(missing_docs)]
//! `lily-indent-lang` - data-driven language configuration for `lily-indent`.
//!
//! This crate intentionally stays lightweight and does **not** depend on the
//! engine or any parsing systems. It provides the small structs hosts use to
//! configure indentation in a language-aware way: the paired delimiters of
//! LilyPond input, the comment tokens of its two scanning modes, the shape of
//! rendered indentation, and the characters that should re-run indentation
//! when typed.

/// A paired delimiter of LilyPond input that changes the nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `{` / `}` - music, markup and variable blocks.
    Brace,
    /// `<<` / `>>` - simultaneous music.
    DoubleAngle,
    /// `#{` / `#}` - LilyPond embedded in a Scheme expression.
    SchemeBrace,
    /// `%{` / `%}` - block comments.
    CommentBlock,
    /// `(` / `)` - Scheme expressions.
    Paren,
}

impl Delimiter {
    /// The literal opening token.
    pub const fn opener(self) -> &'static str {
        match self {
            Self::Brace => "{",
            Self::DoubleAngle => "<<",
            Self::SchemeBrace => "#{",
            Self::CommentBlock => "%{",
            Self::Paren => "(",
        }
    }

    /// The literal closing token.
    pub const fn closer(self) -> &'static str {
        match self {
            Self::Brace => "}",
            Self::DoubleAngle => ">>",
            Self::SchemeBrace => "#}",
            Self::CommentBlock => "%}",
            Self::Paren => ")",
        }
    }

    /// Returns `true` if the tokens are two characters wide.
    pub const fn is_wide(self) -> bool {
        matches!(self, Self::DoubleAngle | Self::SchemeBrace | Self::CommentBlock)
    }

    /// The delimiter whose opener starts at `one`, with `two` the following
    /// character (if any). Two-character tokens win over `{`.
    pub fn match_opener(one: char, two: Option<char>) -> Option<Self> {
        match (one, two) {
            ('%', Some('{')) => Some(Self::CommentBlock),
            ('#', Some('{')) => Some(Self::SchemeBrace),
            ('<', Some('<')) => Some(Self::DoubleAngle),
            ('{', _) => Some(Self::Brace),
            ('(', _) => Some(Self::Paren),
            _ => None,
        }
    }

    /// The delimiter whose closer starts at `one`, with `two` the following
    /// character (if any). Two-character tokens win over `}`.
    pub fn match_closer(one: char, two: Option<char>) -> Option<Self> {
        match (one, two) {
            ('%', Some('}')) => Some(Self::CommentBlock),
            ('#', Some('}')) => Some(Self::SchemeBrace),
            ('>', Some('>')) => Some(Self::DoubleAngle),
            ('}', _) => Some(Self::Brace),
            (')', _) => Some(Self::Paren),
            _ => None,
        }
    }
}

/// Comment tokens for one scanning mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentTokens {
    /// Character that starts a comment running to the end of the line.
    pub line: char,
    /// Token that opens a block comment.
    pub block_start: &'static str,
    /// Token that closes a block comment.
    pub block_end: &'static str,
}

/// Comment tokens of LilyPond mode.
pub const LILYPOND_COMMENTS: CommentTokens = CommentTokens {
    line: '%',
    block_start: "%{",
    block_end: "%}",
};

/// Comment tokens of Scheme mode.
pub const SCHEME_COMMENTS: CommentTokens = CommentTokens {
    line: ';',
    block_start: "#!",
    block_end: "!#",
};

/// How rendered indentation should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentStyle {
    /// Cells added per nesting step.
    pub indent_width: usize,
    /// Cells per tab stop.
    pub tab_width: usize,
    /// Use tab characters for the whole tab stops of an indent prefix.
    pub use_tabs: bool,
}

impl IndentStyle {
    /// LilyPond house style: two-cell steps, eight-cell tabs, spaces only.
    pub const fn new() -> Self {
        Self {
            indent_width: 2,
            tab_width: 8,
            use_tabs: false,
        }
    }

    /// Render an indent prefix of `cells` cells.
    ///
    /// With `use_tabs`, whole tab stops become tab characters and the
    /// remainder becomes spaces; the result never exceeds `cells` cells.
    pub fn indent_string(&self, cells: usize) -> String {
        if self.use_tabs && self.tab_width > 0 {
            let tabs = cells / self.tab_width;
            let spaces = cells % self.tab_width;
            let mut out = String::with_capacity(tabs + spaces);
            out.extend(std::iter::repeat_n('\t', tabs));
            out.extend(std::iter::repeat_n(' ', spaces));
            out
        } else {
            " ".repeat(cells)
        }
    }
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self::new()
    }
}

/// The characters that should re-run indentation when typed.
///
/// LilyPond re-indents on the closers `}` and `>` (the second character of
/// `>>`) and on the comment starters `%` and `;`, because any of them can
/// turn the current line into a leading-closer or gutter-comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triggers {
    chars: String,
}

impl Triggers {
    /// The trigger set of the LilyPond indenter.
    pub fn lilypond() -> Self {
        Self::new("}>%;")
    }

    /// Create a custom trigger set.
    pub fn new(chars: impl Into<String>) -> Self {
        Self {
            chars: chars.into(),
        }
    }

    /// Returns `true` if typing `ch` should re-run indentation.
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(ch)
    }
}

impl Default for Triggers {
    fn default() -> Self {
        Self::lilypond()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiters_pair_up() {
        for d in [
            Delimiter::Brace,
            Delimiter::DoubleAngle,
            Delimiter::SchemeBrace,
            Delimiter::CommentBlock,
            Delimiter::Paren,
        ] {
            assert_eq!(d.opener().chars().count() == 2, d.is_wide());
            assert_eq!(d.opener().len(), d.closer().len());

            let mut chars = d.opener().chars();
            let one = chars.next().unwrap();
            assert_eq!(Delimiter::match_opener(one, chars.next()), Some(d));

            let mut chars = d.closer().chars();
            let one = chars.next().unwrap();
            assert_eq!(Delimiter::match_closer(one, chars.next()), Some(d));
        }
        assert_eq!(Delimiter::match_opener('<', Some('c')), None);
        assert_eq!(Delimiter::match_closer('a', None), None);
    }

    #[test]
    fn indent_string_spaces() {
        let style = IndentStyle::new();
        assert_eq!(style.indent_string(0), "");
        assert_eq!(style.indent_string(4), "    ");
    }

    #[test]
    fn indent_string_tabs() {
        let style = IndentStyle {
            use_tabs: true,
            ..IndentStyle::new()
        };
        assert_eq!(style.indent_string(7), "       ");
        assert_eq!(style.indent_string(8), "\t");
        assert_eq!(style.indent_string(19), "\t\t   ");
    }

    #[test]
    fn default_triggers() {
        let triggers = Triggers::default();
        for ch in ['}', '>', '%', ';'] {
            assert!(triggers.contains(ch));
        }
        assert!(!triggers.contains('{'));
        assert!(!triggers.contains('\n'));
    }
}
