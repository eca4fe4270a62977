
use std::{fs, path::Path};

use example_document::ExampleDocument;
use movediff::{DiffConfig, Fragment, FragmentKind, diff, diff_with_config};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde::Deserialize;

fn full() -> DiffConfig { DiffConfig::default().with_full_diff(true) }

#[test]
fn test_documents_round_trip() {
    for doc in &get_all_documents() {
        doc.assert_round_trip(&doc.diff(&full()));
    }
}

#[test]
fn test_documents_round_trip_without_char_diff() {
    let config = full().with_char_diff(false).with_repeated_diff(false);
    for doc in &get_all_documents() {
        doc.assert_round_trip(&doc.diff(&config));
    }
}

#[test]
fn test_documents_report_expected_changes() {
    for doc in &get_all_documents() {
        doc.assert_changes(&doc.diff(&full()));
    }
}

#[test]
fn test_hidden_moves_still_round_trip() {
    let config = full().with_show_block_moves(false);
    for doc in &get_all_documents() {
        let diff = doc.diff(&config);

        doc.assert_round_trip(&diff);
        assert!(
            diff.fragments()
                .iter()
                .all(|fragment| fragment.color().is_none())
        );
    }
}

#[test]
fn test_output_is_wrapped_in_containers() {
    let diff = diff("old text", "new text");
    let fragments = diff.fragments();

    assert_eq!(fragments[0], Fragment::ContainerStart);
    assert_eq!(fragments[1], Fragment::FragmentStart);
    assert_eq!(fragments[fragments.len() - 2], Fragment::FragmentEnd);
    assert_eq!(fragments[fragments.len() - 1], Fragment::ContainerEnd);
}

#[test]
fn test_large_unchanged_text_is_clipped() {
    let paragraph = "Nothing in this paragraph changes between the two versions at all.\n";
    let body = paragraph.repeat(60);
    let old = format!("{body}The end is old.\n");
    let new = format!("{body}The end is new.\n");

    let clipped = diff(&old, &new);
    let unclipped = diff_with_config(&old, &new, &full());

    assert!(clipped.fragments().len() > 4);
    assert!(
        clipped
            .fragments()
            .iter()
            .any(|fragment| fragment.kind() == FragmentKind::Omission)
    );
    assert!(clipped.old_text().len() < old.len());
    assert_eq!(unclipped.old_text(), old);
    assert_eq!(unclipped.new_text(), new);
}

#[test]
fn test_repetitive_input_terminates() {
    let old = "x ".repeat(300);
    let new = format!("{}y {}", "x ".repeat(150), "x ".repeat(150));

    let diff = diff_with_config(&old, &new, &full());

    assert_eq!(diff.old_text(), old);
    assert_eq!(diff.new_text(), new);
}

#[cfg(feature = "serde")]
#[test]
fn test_serialized_fragments() {
    let diff = diff_with_config("a b c", "a x c", &full());

    let yaml = serde_yaml::to_string(diff.fragments()).expect("Failed to serialize fragments");
    assert!(yaml.contains("kind: Delete"));

    let parsed: Vec<Fragment> = serde_yaml::from_str(&yaml).expect("Failed to parse fragments");
    assert_eq!(parsed, diff.fragments());
}

fn words() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "alpha", "beta", "gamma", "delta", "the", "a", " ", "  ", "\n", "\n\n", ".", ", ",
            "Köln", "日本", "colour", "color",
        ]),
        0..40,
    )
    .prop_map(|words| words.concat())
}

proptest! {
    #[test]
    fn test_any_pair_round_trips(old in words(), new in words()) {
        let diff = diff_with_config(&old, &new, &full());

        prop_assert!(!diff.is_inconsistent());
        prop_assert_eq!(diff.old_text(), old);
        prop_assert_eq!(diff.new_text(), new);
    }

    #[test]
    fn test_any_text_round_trips(old in "\\PC{0,60}", new in "\\PC{0,60}") {
        let diff = diff_with_config(&old, &new, &full());

        prop_assert_eq!(diff.old_text(), old);
        prop_assert_eq!(diff.new_text(), new);
    }

    #[test]
    fn test_moves_pair_blocks_with_marks(old in words(), new in words()) {
        let diff = diff_with_config(&old, &new, &full());
        let fragments = diff.fragments();

        for fragment in fragments {
            if let Fragment::BlockStart { color, .. } = fragment {
                let end = Fragment::BlockEnd { color: *color };
                prop_assert!(fragments.contains(&end));
                prop_assert!(
                    fragments
                        .iter()
                        .any(|other| other.kind() == FragmentKind::Mark && other.color() == Some(*color))
                );
            }
        }
    }
}

fn get_all_documents() -> Vec<ExampleDocument> {
    let examples_dir = Path::new("tests/examples");
    let entries = fs::read_dir(examples_dir)
        .expect("Failed to read examples directory")
        .collect::<Vec<_>>();

    let mut documents = Vec::new();

    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("yml") {
            let file = fs::File::open(&path).expect("Failed to open example file");
            for document in serde_yaml::Deserializer::from_reader(file) {
                let doc =
                    ExampleDocument::deserialize(document).expect("Failed to deserialize document");
                documents.push(doc);
            }
        }
    }

    documents
}
