#![warn(missing_docs)]
//! `lily-indent` - Headless LilyPond Indentation Engine
//!
//! # Overview
//!
//! `lily-indent` computes indentation for LilyPond source text. It is
//! headless and host-agnostic: the engine reads text through a small
//! [`Document`] trait (line lookup, character classification, virtual
//! columns), so it plugs into any editor kernel, and ships a rope-backed
//! [`TextDocument`] snapshot for everyone else.
//!
//! # Core Features
//!
//! - **Line indentation**: derive the indent of a line from the delimiter
//!   nesting (`{ }`, `<< >>`, `#{ #}`, `%{ %}`, Scheme `( )`) of the
//!   preceding content line
//! - **Character classification**: a stateful scanner tracks strings, line
//!   and block comments, and embedded Scheme expressions across lines
//! - **Whole-document reindent**: rewrite every line of a text, with
//!   vertical alignment of Scheme subexpressions
//! - **Virtual columns**: UAX #11 widths with tab expansion
//!
//! # Quick Start
//!
//! ```rust
//! use lily_indent::{IndentHint, Indenter, TextDocument, Trigger};
//!
//! let doc = TextDocument::new("\\score {\n");
//! let indenter = Indenter::new().unwrap();
//!
//! // The line after an opener moves one step to the right.
//! assert_eq!(
//!     indenter.indent(&doc, 1, 2, Trigger::Newline),
//!     IndentHint::Column(2)
//! );
//! ```
//!
//! Reindenting a complete text:
//!
//! ```rust
//! use lily_indent::{ReindentOptions, Reindenter};
//!
//! let reindenter = Reindenter::new().unwrap();
//! let out = reindenter.reindent("\\score{\nc d e\n}\n", &ReindentOptions::default());
//! assert_eq!(out, "\\score{\n  c d e\n}\n");
//! ```
//!
//! # Module Description
//!
//! - [`document`] - the host document interface and the built-in snapshot
//! - [`syntax`] - character classification (code / string / comment)
//! - [`metrics`] - virtual column computation
//! - [`indent`] - the line indentation engine
//! - [`reindent`] - the whole-document reindenter
//!
//! Language configuration (delimiters, comment tokens, indent style,
//! trigger characters) lives in the dependency-free `lily-indent-lang`
//! crate, re-exported here as [`lang`].

pub mod document;
pub mod indent;
pub mod metrics;
pub mod reindent;
pub mod syntax;

pub use lily_indent_lang as lang;

pub use document::{Document, Position, TextDocument};
pub use indent::{IndentHint, Indenter, Trigger};
pub use metrics::DEFAULT_TAB_WIDTH;
pub use reindent::{ReindentOptions, Reindenter};
pub use syntax::{CharClass, LineScan, ScanState};
