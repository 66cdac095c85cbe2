//! Line indentation for LilyPond source.
//!
//! [`Indenter`] derives the indent of a line from the delimiter nesting of
//! the nearest preceding line of real content: every unbalanced opener on
//! that line pushes the new line one step to the right, every unbalanced
//! closer pulls it back, and Scheme parentheses hang continuation lines
//! under their opening parenthesis.

use crate::document::Document;
use lily_indent_lang::{Delimiter, LILYPOND_COMMENTS, SCHEME_COMMENTS, Triggers};
use log::trace;
use regex::Regex;

/// What caused an indentation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The user pressed Enter and the fresh line is being indented.
    Newline,
    /// A character was just typed at the end of the line.
    Char(char),
    /// An explicit re-indent (align action, paste).
    Manual,
}

/// The outcome of an indentation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentHint {
    /// Leave the line as it is.
    Keep,
    /// Indent the line to this virtual column.
    Column(usize),
}

/// Computes the indentation of one line from the nesting of preceding lines.
///
/// Stateless per invocation: every request re-reads the document, so the
/// engine can be shared freely between buffers.
#[derive(Debug, Clone)]
pub struct Indenter {
    triggers: Triggers,
    leading_closers: Regex,
    closer: Regex,
    skip_line: Regex,
    comment_line: Regex,
}

impl Indenter {
    /// Create an indenter with the default LilyPond trigger set.
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_triggers(Triggers::lilypond())
    }

    /// Create an indenter with a custom trigger set.
    pub fn with_triggers(triggers: Triggers) -> Result<Self, regex::Error> {
        Ok(Self {
            triggers,
            // A run of closers (with optional `%`/`#` prefixes) at the start
            // of a line.
            leading_closers: Regex::new(r"^(\s*([%#]?\}|>>))+")?,
            closer: Regex::new(r"\}|>>")?,
            // Lines skipped when looking for the reference line: blank, or a
            // gutter comment starting at column 0.
            skip_line: Regex::new(r"^\s*$|^;;;|^%%%")?,
            comment_line: Regex::new(r"^\s*(;;;|%%%)")?,
        })
    }

    /// The characters that should re-run indentation when typed.
    pub fn triggers(&self) -> &Triggers {
        &self.triggers
    }

    /// Compute the indent for `line`.
    ///
    /// Returns [`IndentHint::Keep`] when there is nothing to decide: the
    /// typed character is not a trigger, the line is the first of the
    /// document, or the line does not exist.
    pub fn indent(
        &self,
        doc: &dyn Document,
        line: usize,
        indent_width: usize,
        trigger: Trigger,
    ) -> IndentHint {
        if let Trigger::Char(ch) = trigger
            && !self.triggers.contains(ch)
        {
            return IndentHint::Keep;
        }
        if line == 0 {
            return IndentHint::Keep;
        }
        let Some(current) = doc.line(line) else {
            return IndentHint::Keep;
        };

        // Gutter comments stay in the gutter.
        if self.comment_line.is_match(&current) {
            return IndentHint::Column(0);
        }

        // The reference line is the nearest preceding line of real content.
        let mut prev = line;
        while prev > 0 {
            prev -= 1;
            match doc.line(prev) {
                Some(text) if !self.skip_line.is_match(&text) => {
                    return IndentHint::Column(
                        self.derive(doc, prev, &text, &current, indent_width),
                    );
                }
                _ => {}
            }
        }
        IndentHint::Column(0)
    }

    /// Walk the reference line `prev` and derive the indent of `current`.
    fn derive(
        &self,
        doc: &dyn Document,
        prev: usize,
        prev_text: &str,
        current: &str,
        indent_width: usize,
    ) -> usize {
        let mut base = doc.first_virtual_column(prev);

        // Closers at the start of the reference line bound to the enclosing
        // level when that line was indented; skip them.
        let mut pos = self
            .leading_closers
            .find(prev_text)
            .map_or(0, |m| prev_text[..m.end()].chars().count());
        let end = doc.line_length(prev);

        // Unbalanced opener/closer count of the reference line.
        let mut delta: i64 = 0;
        // Scheme parenthesis level, and the column of the first opening
        // parenthesis seen at each level.
        let mut level: i64 = 0;
        let mut parens: Vec<Option<usize>> = Vec::new();

        while pos < end {
            let Some(one) = doc.char_at(prev, pos) else {
                break;
            };
            let two = if pos + 1 < end {
                doc.char_at(prev, pos + 1)
            } else {
                None
            };

            // Block comment delimiters count even inside strings.
            if Delimiter::match_opener(one, two) == Some(Delimiter::CommentBlock) {
                delta += 1;
                pos += 1;
            } else if Delimiter::match_closer(one, two) == Some(Delimiter::CommentBlock) {
                delta -= 1;
                pos += 1;
            } else if !doc.is_string(prev, pos) {
                if one == LILYPOND_COMMENTS.line || one == SCHEME_COMMENTS.line {
                    // Rest of the line is comment.
                    break;
                }
                if let Some(d) = Delimiter::match_opener(one, two) {
                    delta += 1;
                    match d {
                        Delimiter::Paren => {
                            trace!("opening paren at column {pos}, level {level}");
                            if let Ok(slot) = usize::try_from(level) {
                                if parens.len() <= slot {
                                    parens.resize(slot + 1, None);
                                }
                                if parens[slot].is_none() {
                                    parens[slot] = Some(pos);
                                }
                            }
                            level += 1;
                        }
                        _ if d.is_wide() => pos += 1,
                        _ => {}
                    }
                } else if let Some(d) = Delimiter::match_closer(one, two) {
                    delta -= 1;
                    match d {
                        Delimiter::Paren => {
                            level -= 1;
                            let opened_here = usize::try_from(level)
                                .ok()
                                .and_then(|slot| parens.get(slot).copied().flatten());
                            if let Some(open_pos) = opened_here {
                                // The expression opened on this line; hang the
                                // next line under its opening paren.
                                delta = 0;
                                base = doc.to_virtual_column(prev, open_pos);
                            } else if let Some(cur) = doc.anchor(prev, 0, '(') {
                                delta = 0;
                                base = if doc.ends_scheme_expression(prev, pos) {
                                    doc.first_virtual_column(cur.line)
                                } else {
                                    doc.to_virtual_column(cur.line, cur.column)
                                };
                            }
                        }
                        _ if d.is_wide() => pos += 1,
                        _ => {}
                    }
                }
            }
            pos += 1;
        }

        // Closers at the start of the current line bind to the enclosing
        // level as well.
        if let Some(m) = self.leading_closers.find(current) {
            delta -= self.closer.find_iter(m.as_str()).count() as i64;
        }

        let target = base as i64 + delta * indent_width as i64;
        usize::try_from(target).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;

    fn indent_of(text: &str, line: usize) -> IndentHint {
        let doc = TextDocument::new(text);
        let indenter = Indenter::new().unwrap();
        indenter.indent(&doc, line, 2, Trigger::Newline)
    }

    #[test]
    fn test_first_line_keeps() {
        assert_eq!(indent_of("\\score {\n", 0), IndentHint::Keep);
    }

    #[test]
    fn test_missing_line_keeps() {
        assert_eq!(indent_of("{\n", 5), IndentHint::Keep);
    }

    #[test]
    fn test_non_trigger_char_keeps() {
        let doc = TextDocument::new("{\nc\n");
        let indenter = Indenter::new().unwrap();
        assert_eq!(
            indenter.indent(&doc, 1, 2, Trigger::Char('c')),
            IndentHint::Keep
        );
        assert_eq!(
            indenter.indent(&doc, 1, 2, Trigger::Char('}')),
            IndentHint::Column(2)
        );
    }

    #[test]
    fn test_opener_indents_one_step() {
        assert_eq!(indent_of("\\score {\n", 1), IndentHint::Column(2));
        assert_eq!(indent_of("<<\n", 1), IndentHint::Column(2));
    }

    #[test]
    fn test_closer_line_dedents() {
        assert_eq!(indent_of("{\n  c4\n}\n", 2), IndentHint::Column(0));
    }

    #[test]
    fn test_gutter_comment_goes_to_zero() {
        assert_eq!(indent_of("{\n  %%% note\n", 1), IndentHint::Column(0));
        assert_eq!(indent_of("{\n;;; note\n", 1), IndentHint::Column(0));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(indent_of("{\n\n\nc\n", 3), IndentHint::Column(2));
    }

    #[test]
    fn test_no_content_above_goes_to_zero() {
        assert_eq!(indent_of("\n\nc\n", 2), IndentHint::Column(0));
    }

    #[test]
    fn test_never_negative() {
        assert_eq!(indent_of("}\n}\n", 1), IndentHint::Column(0));
    }
}
