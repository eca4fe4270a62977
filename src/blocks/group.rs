use super::block::Block;

/// A run of blocks that is contiguous in old-text order and therefore
/// either stays in place or moves as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Group {
    pub old_number: Option<usize>,
    pub block_start: usize,
    pub block_end: usize,
    pub unique: bool,
    pub max_words: usize,
    pub words: usize,
    pub chars: usize,
    pub fixed: bool,
    /// Group holding the mark at the old position, for moved groups.
    pub moved_from: Option<usize>,
    /// Move colour, assigned to moved groups only.
    pub color: Option<usize>,
}

impl Group {
    /// Aggregates `blocks[block_start..=block_end]`.
    #[must_use]
    pub fn spanning(blocks: &[Block], block_start: usize, block_end: usize, fixed: bool) -> Self {
        let members = &blocks[block_start..=block_end];

        Group {
            old_number: blocks[block_start].old_number,
            block_start,
            block_end,
            unique: members.iter().any(|block| block.unique),
            max_words: members.iter().map(|block| block.words).max().unwrap_or_default(),
            words: members.iter().map(|block| block.words).sum(),
            chars: members.iter().map(|block| block.chars).sum(),
            fixed,
            moved_from: None,
            color: None,
        }
    }

    #[must_use]
    pub fn is_moved(&self) -> bool { !self.fixed }

    pub fn blocks(&self) -> std::ops::RangeInclusive<usize> { self.block_start..=self.block_end }
}
