//! Whole-document reindentation.
//!
//! Rewrites the indent of every line of a LilyPond text in one pass. Unlike
//! the line engine in [`crate::indent`], which answers "where should this
//! line go" for an editor host, the reindenter tokenizes the complete text
//! with one pattern per parsing mode and tracks an explicit indent stack, so
//! it also vertically aligns Scheme subexpressions and keeps the internal
//! shape of multi-line block comments.

use crate::metrics;
use lily_indent_lang::IndentStyle;
use regex::{Captures, Regex};

const LILY_PATTERN: &str = concat!(
    r"(?P<indent>\{|<<)",
    r"|(?P<dedent>>>|\})",
    r#"|(?P<string>"(?:\\[\\"]|[^"])*")"#,
    r"|(?P<newline>\n[^\S\n]*)",
    r"|(?P<space>[^\S\n]+)",
    r"|(?P<scheme>#)",
    r"|(?P<blockcomment>%\{(?s:.*?)%\})",
    r"|(?P<longcomment>%%%[^\n]*)",
    r"|(?P<comment>%[^\n]*)",
);

const SCHEME_PATTERN: &str = concat!(
    r"(?P<indent>\()",
    r"|(?P<dedent>\))",
    r#"|(?P<string>"(?:\\[\\"]|[^"])*")"#,
    r"|(?P<newline>\n[^\S\n]*)",
    r"|(?P<space>[^\S\n]+)",
    r"|(?P<lilypond>#\{)",
    r"|(?P<longcomment>;;;[^\n]*)",
    r"|(?P<blockcomment>#!(?s:.*?)!#)",
    r"|(?P<comment>;[^\n]*)",
);

/// Every named group across the mode patterns, in match-priority order.
const GROUPS: [&str; 11] = [
    "backtoscheme",
    "indent",
    "dedent",
    "string",
    "newline",
    "space",
    "scheme",
    "lilypond",
    "blockcomment",
    "longcomment",
    "comment",
];

/// Options for [`Reindenter::reindent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReindentOptions {
    /// Fixed indent (in cells) for the first line; `None` keeps the indent
    /// found there.
    pub start: Option<usize>,
    /// Indent width and tab width.
    pub style: IndentStyle,
    /// Tabs in the emitted indent: `Some(true)` always, `Some(false)` never,
    /// `None` auto-detects from the text.
    pub use_tabs: Option<bool>,
    /// Begin parsing in Scheme mode.
    pub start_scheme: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Lily,
    SchemeLily,
    Scheme { depth: usize },
}

/// Reindents complete LilyPond texts.
#[derive(Debug, Clone)]
pub struct Reindenter {
    lily: Regex,
    scheme: Regex,
    schemelily: Regex,
    leading_space: Regex,
    inner_indent: Regex,
}

impl Reindenter {
    /// Compile the mode patterns.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            lily: Regex::new(LILY_PATTERN)?,
            scheme: Regex::new(SCHEME_PATTERN)?,
            schemelily: Regex::new(&format!(r"(?P<backtoscheme>#\}})|{LILY_PATTERN}"))?,
            leading_space: Regex::new(r"^[^\S\n]*")?,
            inner_indent: Regex::new(r"\n([^\S\n]*)")?,
        })
    }

    /// Rewrite the indent of every line of `text`.
    pub fn reindent(&self, text: &str, options: &ReindentOptions) -> String {
        let tab_width = options.style.tab_width;
        let space = self.leading_space.find(text).map_or("", |m| m.as_str());
        let start = options
            .start
            .unwrap_or_else(|| metrics::leading_whitespace_width(space, tab_width));
        let use_tabs = options
            .use_tabs
            .unwrap_or_else(|| space.contains('\t') || text.contains("\n\t"));
        let style = IndentStyle {
            use_tabs,
            ..options.style
        };

        let mut modes = vec![Mode::Lily];
        if options.start_scheme {
            modes.push(Mode::Scheme { depth: 0 });
        }
        // Indent history; the top is the indent of the line being built.
        let mut indents: Vec<usize> = vec![start];
        let mut output: Vec<(usize, String)> = Vec::new();
        let mut line = String::new();
        // Indent of the line being built; decided by its first token.
        let mut cur: Option<usize> = None;
        let mut pos = space.len();

        while let Some(caps) = self.pattern(&modes).captures_at(text, pos) {
            let Some(m) = caps.get(0) else { break };
            let more = pos < m.start();
            if more {
                line.push_str(&text[pos..m.start()]);
            }
            let group = GROUPS
                .into_iter()
                .find(|g| caps.name(g).is_some())
                .unwrap_or("");

            if cur.is_none() {
                if group == "longcomment" {
                    // Gutter comments stay in the gutter.
                    cur = Some(0);
                } else if more || !matches!(group, "dedent" | "space" | "backtoscheme") {
                    cur = Some(top(&indents));
                }
            }

            let mut token = m.as_str().to_string();

            if group == "blockcomment" && token.contains('\n') {
                // Shift the inner lines of the comment as a group: the
                // shallowest one lines up with the current indent.
                let current = cur.unwrap_or_else(|| top(&indents));
                if let Some(shortest) = self
                    .inner_indent
                    .captures_iter(&token)
                    .filter_map(|c| c.get(1))
                    .map(|m| metrics::leading_whitespace_width(m.as_str(), tab_width))
                    .min()
                {
                    token = self
                        .inner_indent
                        .replace_all(&token, |c: &Captures| {
                            let w = c.get(1).map_or(0, |m| {
                                metrics::leading_whitespace_width(m.as_str(), tab_width)
                            });
                            let cells = (current + w).saturating_sub(shortest);
                            format!("\n{}", style.indent_string(cells))
                        })
                        .into_owned();
                }
            } else {
                match modes.last().copied().unwrap_or(Mode::Lily) {
                    Mode::Lily | Mode::SchemeLily => match group {
                        "indent" => {
                            let t = top(&indents);
                            indents.push(t + style.indent_width);
                        }
                        "dedent" => {
                            if indents.len() > 1 {
                                indents.pop();
                            }
                        }
                        "scheme" => modes.push(Mode::Scheme { depth: 0 }),
                        "backtoscheme" => {
                            if indents.len() > 1 {
                                indents.pop();
                            }
                            modes.pop();
                        }
                        _ => {}
                    },
                    Mode::Scheme { depth } => match group {
                        "indent" => {
                            set_depth(&mut modes, depth + 1);
                            // Align under a parenthesis opening within the
                            // next 10 characters, if any.
                            let mut w = style.indent_width;
                            for (col, ch) in text[m.end()..].chars().take(10).enumerate() {
                                if ch == '(' {
                                    w = col + 1;
                                    break;
                                }
                                if matches!(ch, '"' | ')' | '\n') {
                                    break;
                                }
                            }
                            let t = top(&indents);
                            indents.push(t + w);
                        }
                        "dedent" => {
                            if depth > 0 && indents.len() > 1 {
                                indents.pop();
                            }
                            if depth <= 1 {
                                modes.pop();
                            } else {
                                set_depth(&mut modes, depth - 1);
                            }
                        }
                        "lilypond" => {
                            modes.push(Mode::SchemeLily);
                            let t = top(&indents);
                            indents.push(t + style.indent_width);
                        }
                        // A parenthesis-free expression ends at the first
                        // string, comment, or preceded-by-text whitespace.
                        "string" | "comment" | "longcomment" if depth == 0 => {
                            modes.pop();
                        }
                        "newline" | "space" if depth == 0 && more => {
                            modes.pop();
                        }
                        _ => {}
                    },
                }
            }

            if group == "newline" {
                output.push((cur.unwrap_or(0), std::mem::take(&mut line)));
                cur = None;
            } else {
                line.push_str(&token);
            }
            pos = m.end();
        }

        if pos < text.len() {
            line.push_str(&text[pos..]);
        }
        if line.is_empty() {
            output.push((start, String::new()));
        } else {
            let cells = cur.unwrap_or_else(|| top(&indents));
            output.push((cells, line));
        }

        output
            .iter()
            .map(|(cells, text)| format!("{}{}", style.indent_string(*cells), text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn pattern(&self, modes: &[Mode]) -> &Regex {
        match modes.last() {
            Some(Mode::Scheme { .. }) => &self.scheme,
            Some(Mode::SchemeLily) => &self.schemelily,
            _ => &self.lily,
        }
    }
}

fn top(indents: &[usize]) -> usize {
    indents.last().copied().unwrap_or(0)
}

fn set_depth(modes: &mut [Mode], depth: usize) {
    if let Some(Mode::Scheme { depth: d }) = modes.last_mut() {
        *d = depth;
    }
}
