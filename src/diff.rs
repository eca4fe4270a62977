use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    DiffConfig,
    blocks::Blocks,
    char_refine::split_refine_chars,
    fragments::{Fragment, FragmentKind, assemble, clip::clip, wrap},
    matcher::Matcher,
    slide::slide_all,
    tokenizer::Level,
    version::Versions,
};

/// The result of comparing two texts: fragments in display order and
/// whether they failed to reproduce the inputs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    fragments: Vec<Fragment>,
    inconsistent: bool,
}

impl Diff {
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] { &self.fragments }

    #[must_use]
    pub fn into_fragments(self) -> Vec<Fragment> { self.fragments }

    /// True when the unclipped fragments did not concatenate back to the
    /// old and new text. This indicates a defect, never bad input.
    #[must_use]
    pub fn is_inconsistent(&self) -> bool { self.inconsistent }

    /// True when the texts are identical or nothing is left to show.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        let content = self
            .fragments
            .iter()
            .filter(|fragment| {
                !matches!(
                    fragment.kind(),
                    FragmentKind::ContainerStart
                        | FragmentKind::ContainerEnd
                        | FragmentKind::FragmentStart
                        | FragmentKind::FragmentEnd
                )
            })
            .collect::<Vec<_>>();

        matches!(content[..], [] | [Fragment::Same { color: None, .. }])
    }

    /// Reconstructs the old text. Only complete for unclipped diffs.
    #[must_use]
    pub fn old_text(&self) -> String { old_text(&self.fragments) }

    /// Reconstructs the new text. Only complete for unclipped diffs.
    #[must_use]
    pub fn new_text(&self) -> String { new_text(&self.fragments) }
}

fn old_text(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .filter(|fragment| fragment.is_in_old())
        .map(Fragment::text)
        .collect()
}

fn new_text(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .filter(|fragment| fragment.is_in_new())
        .map(Fragment::text)
        .collect()
}

/// Compares `old` and `new` with the default configuration.
///
/// ```
/// use movediff::{Fragment, diff};
///
/// let diff = diff("the quick fox", "the slow fox");
/// let changes = diff
///     .fragments()
///     .iter()
///     .filter(|fragment| matches!(fragment, Fragment::Delete { .. } | Fragment::Insert { .. }))
///     .map(Fragment::text)
///     .collect::<Vec<_>>();
///
/// assert_eq!(changes, vec!["quick", "slow"]);
/// assert_eq!(diff.new_text(), "the slow fox");
/// ```
#[must_use]
pub fn diff(old: &str, new: &str) -> Diff { diff_with_config(old, new, &DiffConfig::default()) }

/// Compares `old` and `new`, detecting moved blocks of text.
///
/// Both texts are tokenized at successively finer levels, from paragraphs
/// down to words and, for similar words, characters. Only text that is still
/// unmatched is refined further. The matched tokens are then grouped into
/// blocks; groups that do not lie on the longest in-order path are reported
/// as moved.
///
/// The function is total: any two strings produce a diff.
#[must_use]
pub fn diff_with_config(old: &str, new: &str, config: &DiffConfig) -> Diff {
    if old == new {
        return trivial(Fragment::Same {
            text: new.to_owned(),
            color: None,
        });
    }
    if old.is_empty() {
        return trivial(Fragment::Insert {
            text: new.to_owned(),
            color: None,
        });
    }
    if new.is_empty() {
        return trivial(Fragment::Delete {
            text: old.to_owned(),
            color: None,
        });
    }

    let mut versions = Versions::new(old, new);
    link_versions(&mut versions, config);
    versions.enumerate();

    let blocks = Blocks::detect(&mut versions, config);
    debug!(
        "{} blocks in {} groups",
        blocks.blocks.len(),
        blocks.groups.len()
    );

    let fragments = assemble(&blocks, config.show_block_moves);

    let (expected_old, expected_new) = (old_text(&fragments), new_text(&fragments));
    let inconsistent = expected_old != old || expected_new != new;
    if inconsistent {
        warn!(
            "diff is not consistent with its input: old text has {} bytes, reconstructed {}; \
             new text has {} bytes, reconstructed {}",
            old.len(),
            expected_old.len(),
            new.len(),
            expected_new.len(),
        );
    }

    let fragments = if config.full_diff {
        fragments
    } else {
        clip(fragments, &config.clip)
    };

    Diff {
        fragments,
        inconsistent,
    }
}

fn trivial(fragment: Fragment) -> Diff {
    Diff {
        fragments: wrap(vec![fragment]),
        inconsistent: false,
    }
}

/// Links the tokens of both versions, refining unmatched text level by level.
fn link_versions(versions: &mut Versions, config: &DiffConfig) {
    let mut matcher = Matcher::new(config);

    versions.new.split(Level::Paragraph);
    versions.old.split(Level::Paragraph);
    matcher.calculate(versions, Level::Paragraph, false);

    for level in [Level::Line, Level::Sentence, Level::Chunk] {
        versions.split_refine(level);
        matcher.calculate(versions, level, false);
    }

    versions.split_refine(Level::Word);
    matcher.calculate(versions, Level::Word, true);
    slide_all(versions);

    if config.char_diff {
        split_refine_chars(versions);
        matcher.calculate(versions, Level::Character, true);
        slide_all(versions);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Side;

    fn full() -> DiffConfig { DiffConfig::default().with_full_diff(true) }

    fn content(diff: &Diff) -> Vec<Fragment> {
        let fragments = diff.fragments();
        fragments[2..fragments.len() - 2].to_vec()
    }

    fn same(text: &str) -> Fragment {
        Fragment::Same {
            text: text.to_owned(),
            color: None,
        }
    }

    fn delete(text: &str) -> Fragment {
        Fragment::Delete {
            text: text.to_owned(),
            color: None,
        }
    }

    fn insert(text: &str) -> Fragment {
        Fragment::Insert {
            text: text.to_owned(),
            color: None,
        }
    }

    #[test]
    fn test_identical() {
        let diff = diff("same text\n", "same text\n");

        assert_eq!(content(&diff), vec![same("same text\n")]);
        assert!(diff.is_unchanged());
        assert!(!diff.is_inconsistent());
    }

    #[test]
    fn test_pure_insertion() {
        let diff = diff("", "X");

        assert_eq!(content(&diff), vec![insert("X")]);
        assert!(!diff.is_unchanged());
    }

    #[test]
    fn test_pure_deletion() {
        let diff = diff("X", "");

        assert_eq!(content(&diff), vec![delete("X")]);
        assert_eq!(diff.old_text(), "X");
        assert_eq!(diff.new_text(), "");
    }

    #[test]
    fn test_unique_words_link_around_a_replacement() {
        let diff = diff_with_config("the quick fox", "the slow fox", &full());

        assert_eq!(
            content(&diff),
            vec![same("the "), delete("quick"), insert("slow"), same(" fox")]
        );
    }

    #[test]
    fn test_moved_word() {
        let diff = diff_with_config("A B C", "B C A", &full());

        let marks = diff
            .fragments()
            .iter()
            .filter_map(|fragment| match fragment {
                Fragment::Mark { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(marks, vec!["A"]);

        let moved = diff
            .fragments()
            .iter()
            .filter(|fragment| matches!(fragment, Fragment::Same { color: Some(_), .. }))
            .map(Fragment::text)
            .collect::<Vec<_>>();
        assert_eq!(moved, vec!["A"]);

        assert!(diff.fragments().contains(&same("B C")));
        assert!(diff.fragments().contains(&Fragment::BlockStart {
            color: 1,
            direction: Side::Left
        }));
        assert!(diff.fragments().contains(&Fragment::Mark {
            text: "A".to_owned(),
            color: Some(1),
            direction: Side::Right
        }));
        assert_eq!(diff.old_text(), "A B C");
        assert_eq!(diff.new_text(), "B C A");
        assert!(!diff.is_inconsistent());
    }

    #[test]
    fn test_similar_words_differ_by_characters() {
        let diff = diff_with_config(
            "The colour of the sky.",
            "The color of the sky.",
            &full(),
        );

        assert_eq!(
            content(&diff),
            vec![same("The colo"), delete("u"), same("r of the sky.")]
        );
    }

    #[test]
    fn test_joined_word_longer_than_its_split_tail() {
        let diff = diff_with_config("p a-xyzw q", "p ab q", &full());

        assert_eq!(diff.old_text(), "p a-xyzw q");
        assert_eq!(diff.new_text(), "p ab q");
        assert!(!diff.is_inconsistent());
    }

    #[test]
    fn test_character_diff_can_be_disabled() {
        let config = full().with_char_diff(false);
        let diff = diff_with_config("The colour of the sky.", "The color of the sky.", &config);

        assert_eq!(
            content(&diff),
            vec![same("The "), delete("colour"), insert("color"), same(" of the sky.")]
        );
    }

    #[test]
    fn test_moved_line() {
        let old = "first line here\nsecond line there\nthird line everywhere\n";
        let new = "second line there\nthird line everywhere\nfirst line here\n";

        let diff = diff_with_config(old, new, &full());

        assert_eq!(diff.old_text(), old);
        assert_eq!(diff.new_text(), new);
        assert!(!diff.is_inconsistent());

        let block_start = diff
            .fragments()
            .iter()
            .find(|fragment| fragment.kind() == FragmentKind::BlockStart);
        assert!(matches!(
            block_start,
            Some(Fragment::BlockStart {
                color: 1,
                direction: Side::Left
            })
        ));
    }

    #[test]
    fn test_clipping_keeps_both_edges() {
        let body = (0..120)
            .map(|line| format!("Unchanged line number {line} of the document.\n"))
            .collect::<String>();
        let old = format!("Old title\n{body}Old footer\n");
        let new = format!("New title\n{body}New footer\n");

        let diff = diff(&old, &new);

        assert!(!diff.is_inconsistent());
        let omissions = diff
            .fragments()
            .iter()
            .filter(|fragment| fragment.kind() == FragmentKind::Omission)
            .count();
        assert_eq!(omissions, 2);
        assert!(diff.fragments().contains(&Fragment::Separator));

        for fragment in diff.fragments() {
            if let Fragment::Same { text, .. } = fragment {
                assert!(body.contains(text.as_str()) || old.contains(text.as_str()));
                assert!(text.len() < body.len());
            }
        }
    }
}
