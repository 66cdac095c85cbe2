//! Character classification for LilyPond source.
//!
//! A stateful scanner walks the document line by line and classifies every
//! character as code, string or comment. The scan state carries across line
//! boundaries, so unterminated strings, `%{ … %}` block comments and open
//! Scheme expressions keep their classification on following lines.
//!
//! Scheme sub-expressions are tracked with a parenthesis depth so that the
//! closing parenthesis that ends an embedded expression (`#(… )`) can be
//! reported to the indent engine, which aligns differently on it.

/// Classification of one character of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Plain code, including delimiters.
    Code,
    /// Part of a string literal, quotes included.
    String,
    /// Part of a line or block comment, introducers included.
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Inside a `"…"` string (LilyPond or Scheme; both use `\` escapes).
    Str,
    /// Inside a `%{ … %}` block comment.
    BlockComment,
    /// Inside a `#! … !#` Scheme block comment.
    SchemeBlockComment,
    /// Inside a Scheme expression introduced by `#`.
    ///
    /// `depth` is the open parenthesis count; while it is zero the expression
    /// is still a single atom, and `seen_atom` records whether any of it has
    /// been consumed yet.
    Scheme { depth: usize, seen_atom: bool },
    /// Inside LilyPond embedded in Scheme (`#{ … #}`).
    SchemeLily,
}

/// Scanner state at a line boundary.
///
/// The default state is plain LilyPond code at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanState {
    modes: Vec<Mode>,
}

/// Per-character classification of one scanned line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScan {
    classes: Vec<CharClass>,
    scheme_ends: Vec<usize>,
}

impl LineScan {
    /// Classification of the character at `column`; `Code` past the end.
    pub fn class_at(&self, column: usize) -> CharClass {
        self.classes.get(column).copied().unwrap_or(CharClass::Code)
    }

    /// Length of the scanned line in characters.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if the scanned line was empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Whether the `)` at `column` is the final closing parenthesis of an
    /// embedded Scheme expression.
    pub fn ends_scheme_expression(&self, column: usize) -> bool {
        self.scheme_ends.contains(&column)
    }
}

impl ScanState {
    /// Scan one line (without its line ending).
    ///
    /// Returns the classification of every character and the state at the
    /// start of the next line.
    pub fn scan_line(&self, text: &str) -> (LineScan, ScanState) {
        let chars: Vec<char> = text.chars().collect();
        let mut classes = vec![CharClass::Code; chars.len()];
        let mut scheme_ends = Vec::new();
        let mut modes = self.modes.clone();

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();
            match modes.last().copied() {
                Some(Mode::Str) => {
                    classes[i] = CharClass::String;
                    if c == '\\' {
                        if i + 1 < chars.len() {
                            classes[i + 1] = CharClass::String;
                            i += 1;
                        }
                    } else if c == '"' {
                        modes.pop();
                        // A string is a complete Scheme atom.
                        finish_scheme_atom(&mut modes);
                    }
                }
                Some(Mode::BlockComment) => {
                    classes[i] = CharClass::Comment;
                    if c == '%' && next == Some('}') {
                        classes[i + 1] = CharClass::Comment;
                        i += 1;
                        modes.pop();
                    }
                }
                Some(Mode::SchemeBlockComment) => {
                    classes[i] = CharClass::Comment;
                    if c == '!' && next == Some('#') {
                        classes[i + 1] = CharClass::Comment;
                        i += 1;
                        modes.pop();
                    }
                }
                Some(Mode::Scheme { depth: 0, seen_atom }) => match c {
                    '(' => {
                        set_scheme(&mut modes, 1, true);
                    }
                    '"' => {
                        classes[i] = CharClass::String;
                        modes.push(Mode::Str);
                    }
                    ';' => {
                        // A comment ends the pending atom along with the line.
                        comment_to_eol(&mut classes, i);
                        modes.pop();
                        break;
                    }
                    '#' if next == Some('{') => {
                        set_scheme(&mut modes, 0, true);
                        modes.push(Mode::SchemeLily);
                        i += 1;
                    }
                    '#' if next == Some('!') => {
                        classes[i] = CharClass::Comment;
                        classes[i + 1] = CharClass::Comment;
                        modes.push(Mode::SchemeBlockComment);
                        i += 1;
                    }
                    ')' => {
                        // Stray closer: fall back to the enclosing mode.
                        modes.pop();
                        continue;
                    }
                    c if c.is_whitespace() => {
                        if seen_atom {
                            modes.pop();
                            continue;
                        }
                    }
                    _ => {
                        set_scheme(&mut modes, 0, true);
                    }
                },
                Some(Mode::Scheme { depth, .. }) => match c {
                    '(' => {
                        set_scheme(&mut modes, depth + 1, true);
                    }
                    ')' => {
                        if depth == 1 {
                            scheme_ends.push(i);
                            modes.pop();
                        } else {
                            set_scheme(&mut modes, depth - 1, true);
                        }
                    }
                    '"' => {
                        classes[i] = CharClass::String;
                        modes.push(Mode::Str);
                    }
                    ';' => {
                        comment_to_eol(&mut classes, i);
                        break;
                    }
                    '#' if next == Some('{') => {
                        modes.push(Mode::SchemeLily);
                        i += 1;
                    }
                    '#' if next == Some('!') => {
                        classes[i] = CharClass::Comment;
                        classes[i + 1] = CharClass::Comment;
                        modes.push(Mode::SchemeBlockComment);
                        i += 1;
                    }
                    _ => {}
                },
                mode => {
                    // Plain LilyPond, either top-level or embedded in Scheme.
                    match c {
                        '%' if next == Some('{') => {
                            classes[i] = CharClass::Comment;
                            classes[i + 1] = CharClass::Comment;
                            modes.push(Mode::BlockComment);
                            i += 1;
                        }
                        '%' => {
                            comment_to_eol(&mut classes, i);
                            break;
                        }
                        '"' => {
                            classes[i] = CharClass::String;
                            modes.push(Mode::Str);
                        }
                        '#' if mode == Some(Mode::SchemeLily) && next == Some('}') => {
                            modes.pop();
                            i += 1;
                        }
                        '#' => {
                            modes.push(Mode::Scheme {
                                depth: 0,
                                seen_atom: false,
                            });
                        }
                        _ => {}
                    }
                }
            }
            i += 1;
        }

        // The end of the line ends a pending parenthesis-free atom.
        if let Some(Mode::Scheme {
            depth: 0,
            seen_atom: true,
        }) = modes.last()
        {
            modes.pop();
        }

        (
            LineScan {
                classes,
                scheme_ends,
            },
            ScanState { modes },
        )
    }
}

fn set_scheme(modes: &mut [Mode], depth: usize, seen_atom: bool) {
    if let Some(top) = modes.last_mut() {
        *top = Mode::Scheme { depth, seen_atom };
    }
}

/// Pop a Scheme mode whose expression just completed (still at depth zero).
fn finish_scheme_atom(modes: &mut Vec<Mode>) {
    if let Some(Mode::Scheme { depth: 0, .. }) = modes.last() {
        modes.pop();
    }
}

fn comment_to_eol(classes: &mut [CharClass], from: usize) {
    for class in classes.iter_mut().skip(from) {
        *class = CharClass::Comment;
    }
}
