use lily_indent::{ReindentOptions, Reindenter};

fn main() {
    let input = "\\new Staff {\nc4 d\n#(set-global-staff-size\n20)\n}\n";
    let reindenter = Reindenter::new().expect("patterns compile");
    print!("{}", reindenter.reindent(input, &ReindentOptions::default()));
}
