use lily_indent::{Document, IndentHint, Indenter, TextDocument, Trigger};

fn engine() -> Indenter {
    Indenter::new().unwrap()
}

fn columns(text: &str) -> Vec<IndentHint> {
    let doc = TextDocument::new(text);
    let indenter = engine();
    (0..doc.line_count())
        .map(|line| indenter.indent(&doc, line, 2, Trigger::Manual))
        .collect()
}

#[test]
fn test_reproduces_a_well_indented_score() {
    let score = "\\version \"2.12.0\"\n\
                 \\score {\n\
                 \x20 \\relative c' {\n\
                 \x20   c4 d e f\n\
                 \x20   <<\n\
                 \x20     { g a b c }\n\
                 \x20     \\new Staff {\n\
                 \x20       c, b a g\n\
                 \x20     }\n\
                 \x20   >>\n\
                 \x20 }\n\
                 }\n";
    let doc = TextDocument::new(score);
    let indenter = engine();
    for line in 1..12 {
        assert_eq!(
            indenter.indent(&doc, line, 2, Trigger::Manual),
            IndentHint::Column(doc.first_virtual_column(line)),
            "line {line} moved"
        );
    }
}

#[test]
fn test_nested_blocks_step_in_and_out() {
    let hints = columns("<<\n  { c }\n  \\new Staff {\n    d\n  }\n>>\n");
    assert_eq!(hints[1], IndentHint::Column(2));
    assert_eq!(hints[2], IndentHint::Column(2));
    assert_eq!(hints[3], IndentHint::Column(4));
    assert_eq!(hints[4], IndentHint::Column(2));
    assert_eq!(hints[5], IndentHint::Column(0));
}

#[test]
fn test_line_comment_hides_openers() {
    // The `{` after `%` must not indent the next line.
    let hints = columns("{\n  c d % comment {\n");
    assert_eq!(hints[2], IndentHint::Column(2));
}

#[test]
fn test_string_hides_delimiters() {
    let hints = columns("{\n  e \\markup { \"a } b\" }\n");
    assert_eq!(hints[2], IndentHint::Column(2));

    // A percent sign inside a string does not start a comment.
    let hints = columns("{\n  c \"100%\" {\n");
    assert_eq!(hints[2], IndentHint::Column(4));
}

#[test]
fn test_block_comment_delimiters_count_inside_strings() {
    // `%{` opens a nesting level wherever it appears, quoted or not.
    let hints = columns("{\n  c \"%{\" d\n");
    assert_eq!(hints[2], IndentHint::Column(4));
}

#[test]
fn test_block_comment_lines() {
    let hints = columns("%{\n  remark\n%}\n{\n  c4\n");
    assert_eq!(hints[1], IndentHint::Column(2));
    assert_eq!(hints[2], IndentHint::Column(0));
    assert_eq!(hints[3], IndentHint::Column(0));
    assert_eq!(hints[4], IndentHint::Column(2));
}

#[test]
fn test_embedded_lilypond_closer_dedents() {
    let hints = columns("\\foo #{\n  c4 d4\n#}\n");
    assert_eq!(hints[1], IndentHint::Column(2));
    assert_eq!(hints[2], IndentHint::Column(0));
}

#[test]
fn test_gutter_comments_and_blank_lines_are_skipped() {
    let text = "{\n%%% gutter\n\n  c4\n";
    let hints = columns(text);
    // The gutter comment itself goes to column 0 ...
    assert_eq!(hints[1], IndentHint::Column(0));
    // ... and neither it nor the blank line is a reference line.
    assert_eq!(hints[3], IndentHint::Column(2));

    let hints = columns("{\n;;; scheme gutter\n  c4\n");
    assert_eq!(hints[1], IndentHint::Column(0));
    assert_eq!(hints[2], IndentHint::Column(2));
}

#[test]
fn test_scheme_continuation_hangs_under_subexpression() {
    // `(fac n)` opens and closes on the line; the continuation hangs under
    // its opening paren.
    let hints = columns("#(define (fac n)\nbody\n");
    assert_eq!(hints[1], IndentHint::Column(9));
}

#[test]
fn test_scheme_multiline_expression() {
    let text = "#(foo (bar\n    baz)\n      quux)\nc4\n";
    let hints = columns(text);
    // Two opens on the first line: one step each.
    assert_eq!(hints[1], IndentHint::Column(4));
    // `baz)` closes `(bar`; continue under that paren.
    assert_eq!(hints[2], IndentHint::Column(6));
    // `quux)` closes the whole expression; back to the line that opened it.
    assert_eq!(hints[3], IndentHint::Column(0));
}

#[test]
fn test_trigger_characters() {
    let doc = TextDocument::new("{\n  c4\n}\n");
    let indenter = engine();
    for ch in ['}', '>', '%', ';'] {
        assert!(indenter.triggers().contains(ch));
        assert_ne!(
            indenter.indent(&doc, 2, 2, Trigger::Char(ch)),
            IndentHint::Keep,
            "{ch} should re-indent"
        );
    }
    // Ordinary typing never moves the line.
    assert_eq!(indenter.indent(&doc, 2, 2, Trigger::Char('c')), IndentHint::Keep);
    assert_eq!(indenter.indent(&doc, 2, 2, Trigger::Char(' ')), IndentHint::Keep);
}

#[test]
fn test_indent_width_is_respected() {
    let doc = TextDocument::new("{\nc\n");
    let indenter = engine();
    assert_eq!(indenter.indent(&doc, 1, 4, Trigger::Newline), IndentHint::Column(4));
    assert_eq!(indenter.indent(&doc, 1, 8, Trigger::Newline), IndentHint::Column(8));
}

#[test]
fn test_tabs_in_reference_line() {
    // The reference line is indented with one tab (8 cells); the next step
    // lands at 10.
    let doc = TextDocument::new("{\n\t<<\nc\n");
    let indenter = engine();
    assert_eq!(indenter.indent(&doc, 2, 2, Trigger::Newline), IndentHint::Column(10));
}
