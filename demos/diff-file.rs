use std::{env, fs, process};

use movediff::{DiffConfig, Fragment, diff_with_config};

/// Compares two versions of a file and prints the fragments, one per line.
/// Moved blocks are bracketed with their colour; marks show where a block
/// used to be.
///
/// Run it with:
/// `RUST_LOG=movediff=debug cargo run --example diff-file old.txt new.txt [--full]`
fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: diff-file <old> <new> [--full]");
        process::exit(1);
    }

    let old_file = &args[1];
    let new_file = &args[2];
    let full = args.get(3).is_some_and(|flag| flag == "--full");

    let old_content = fs::read_to_string(old_file).unwrap_or_else(|e| {
        eprintln!("Error reading {old_file}: {e}");
        process::exit(1);
    });

    let new_content = fs::read_to_string(new_file).unwrap_or_else(|e| {
        eprintln!("Error reading {new_file}: {e}");
        process::exit(1);
    });

    let config = DiffConfig::default().with_full_diff(full);
    let diff = diff_with_config(&old_content, &new_content, &config);

    if diff.is_unchanged() {
        println!("(no changes)");
        return;
    }

    for fragment in diff.fragments() {
        match fragment {
            Fragment::ContainerStart | Fragment::ContainerEnd => {}
            Fragment::FragmentStart => println!("@@"),
            Fragment::FragmentEnd => {}
            Fragment::Separator => println!("~~"),
            Fragment::Same { text, color } => print_text(' ', text, *color),
            Fragment::Delete { text, color } => print_text('-', text, *color),
            Fragment::Insert { text, color } => print_text('+', text, *color),
            Fragment::Mark {
                text,
                color,
                direction,
            } => println!("<mark {} {direction}> {text:?}", color.unwrap_or_default()),
            Fragment::BlockStart { color, direction } => println!("[moved {color} {direction}"),
            Fragment::BlockEnd { color } => println!("moved {color}]"),
            Fragment::Omission { side, boundary } => println!("... {side} ({boundary:?})"),
        }
    }

    if diff.is_inconsistent() {
        eprintln!("warning: the diff does not reproduce its inputs");
        process::exit(2);
    }
}

fn print_text(prefix: char, text: &str, color: Option<usize>) {
    match color {
        Some(color) => println!("{prefix}{color} {text:?}"),
        None => println!("{prefix} {text:?}"),
    }
}
