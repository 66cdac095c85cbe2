use lily_indent::{Document, IndentHint, Indenter, TextDocument, Trigger};

fn main() {
    let source = "\\score {\n\\relative c' {\nc4 d e f\n<<\n{ g a }\n>>\n}\n}\n";
    let doc = TextDocument::new(source);
    let indenter = Indenter::new().expect("patterns compile");

    // Print the column the engine would give every line of the flat input.
    for line in 0..doc.line_count() {
        let text = doc.line(line).unwrap_or_default();
        match indenter.indent(&doc, line, 2, Trigger::Manual) {
            IndentHint::Column(cells) => println!("{cells:2} | {text}"),
            IndentHint::Keep => println!(" - | {text}"),
        }
    }
}
