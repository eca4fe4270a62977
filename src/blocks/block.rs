use crate::{
    tokenizer::patterns::word_count,
    version::{TokenId, Version},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    /// Linked tokens, present in both versions.
    Same,
    /// Old tokens without a counterpart.
    Delete,
    /// New tokens without a counterpart.
    Insert,
    /// Placeholder at the old position of a moved group.
    Mark,
}

/// A maximal run of tokens sharing one relationship between the versions.
///
/// `new_number` is `None` for blocks shown before the first token of the
/// new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block {
    pub kind: BlockKind,
    /// Creation order of `Same` blocks, which is their old-text order.
    pub old_block: Option<usize>,
    pub old_number: Option<usize>,
    pub new_number: Option<usize>,
    pub old_start: Option<TokenId>,
    pub count: usize,
    pub unique: bool,
    pub words: usize,
    pub chars: usize,
    pub section: Option<usize>,
    pub group: Option<usize>,
    pub fixed: bool,
    /// For marks, the group that was moved away from here.
    pub moved: Option<usize>,
    pub text: String,
}

impl Block {
    fn new(kind: BlockKind, text: String) -> Self {
        Block {
            kind,
            old_block: None,
            old_number: None,
            new_number: None,
            old_start: None,
            count: 0,
            unique: false,
            words: word_count(&text),
            chars: text.chars().count(),
            section: None,
            group: None,
            fixed: false,
            moved: None,
            text,
        }
    }

    /// A run of `count` linked tokens starting at `old_start`.
    #[must_use]
    pub fn same(old: &Version, old_start: TokenId, new_number: usize, count: usize, unique: bool) -> Self {
        Block {
            old_number: Some(old[old_start].number),
            new_number: Some(new_number),
            old_start: Some(old_start),
            count,
            unique,
            ..Block::new(BlockKind::Same, run_text(old, old_start, count))
        }
    }

    #[must_use]
    pub fn delete(old: &Version, old_start: TokenId, count: usize) -> Self {
        Block {
            old_number: Some(old[old_start].number),
            old_start: Some(old_start),
            count,
            ..Block::new(BlockKind::Delete, run_text(old, old_start, count))
        }
    }

    #[must_use]
    pub fn insert(new: &Version, new_start: TokenId, count: usize) -> Self {
        Block {
            new_number: Some(new[new_start].number),
            count,
            ..Block::new(BlockKind::Insert, run_text(new, new_start, count))
        }
    }

    /// Marks the old position of group `moved`.
    #[must_use]
    pub fn mark(moved: usize, old_number: Option<usize>, new_number: Option<usize>, group: usize) -> Self {
        Block {
            old_number,
            new_number,
            group: Some(group),
            fixed: true,
            moved: Some(moved),
            ..Block::new(BlockKind::Mark, String::new())
        }
    }

    #[must_use]
    pub fn is_fixed_same(&self) -> bool { self.kind == BlockKind::Same && self.fixed }
}

fn run_text(version: &Version, start: TokenId, count: usize) -> String {
    std::iter::successors(Some(start), |&id| version.next(id))
        .take(count)
        .map(|id| version.token_text(id))
        .collect()
}
