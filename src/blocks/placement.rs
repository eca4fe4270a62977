use log::debug;

use super::{Block, BlockKind, Blocks, Group};

impl Blocks {
    /// Restores display order and refreshes the block ranges of groups.
    pub(super) fn sort_blocks(&mut self) {
        self.blocks
            .sort_by_key(|block| (block.new_number, block.old_number.unwrap_or(0)));

        let mut current = None;
        for (index, block) in self.blocks.iter().enumerate() {
            let Some(group) = block.group else {
                continue;
            };
            if current != Some(group) {
                current = Some(group);
                self.groups[group].block_start = index;
                self.groups[group].old_number = block.old_number;
            }
            self.groups[group].block_end = index;
        }
    }

    /// Shows every deletion next to a stable neighbour from the old text:
    /// a fixed block before or after it, then an unmoved position inside a
    /// group, then the closest preceding fixed block. Deletions without
    /// any reference go before the first block.
    pub(super) fn position_deletions(&mut self) {
        let by_old = self.old_order(|block| block.old_number);

        for (position, &index) in by_old.iter().enumerate() {
            if self.blocks[index].kind != BlockKind::Delete {
                continue;
            }

            let prev = position.checked_sub(1).map(|prev| by_old[prev]);
            let next = by_old.get(position + 1).copied();
            let is_same = |candidate: &Option<usize>| {
                candidate.is_some_and(|index| self.blocks[index].kind == BlockKind::Same)
            };

            let reference = if prev.is_some_and(|index| self.blocks[index].is_fixed_same()) {
                prev
            } else if next.is_some_and(|index| self.blocks[index].is_fixed_same()) {
                next
            } else if is_same(&prev) && prev.is_some_and(|index| !self.ends_group(index)) {
                prev
            } else if is_same(&next) && next.is_some_and(|index| !self.starts_group(index)) {
                next
            } else {
                by_old[..=position]
                    .iter()
                    .rev()
                    .copied()
                    .find(|&index| self.blocks[index].is_fixed_same())
            };

            if let Some(reference) = reference {
                let reference = &self.blocks[reference];
                let anchor = (reference.new_number, reference.section, reference.group, reference.fixed);
                let deletion = &mut self.blocks[index];
                (deletion.new_number, deletion.section, deletion.group, deletion.fixed) = anchor;
            }
        }

        self.sort_blocks();
    }

    /// Assigns insertions inside a group's range to that group and gives
    /// every remaining block a group of its own.
    pub(super) fn group_insertions(&mut self) {
        for (index, group) in self.groups.iter().enumerate() {
            for block in &mut self.blocks[group.blocks()] {
                if block.group.is_none() {
                    block.group = Some(index);
                    block.fixed = group.fixed;
                }
            }
        }

        for index in 0..self.blocks.len() {
            if self.blocks[index].group.is_none() {
                self.blocks[index].group = Some(self.groups.len());
                self.groups.push(Group::spanning(&self.blocks, index, index, true));
            }
        }
    }

    /// Adds a mark at the old position of every moved group and colours
    /// the moved groups in order.
    ///
    /// A mark follows the fixed block before the group in old-text order,
    /// else precedes the fixed block after it, else follows the closest
    /// preceding fixed block. Without any of these it opens the diff in a
    /// group of its own.
    pub(super) fn insert_marks(&mut self) {
        let sorted = self.old_order(|block| (block.old_number.or(Some(0)), block.new_number));
        let mut lookup = vec![0; sorted.len()];
        for (position, &index) in sorted.iter().enumerate() {
            lookup[index] = position;
        }

        let mut color = 1;
        for moved in 0..self.groups.len() {
            let group = &self.groups[moved];
            if !group.is_moved() {
                continue;
            }

            let (start, end) = (lookup[group.block_start], lookup[group.block_end]);
            let fixed_same = |position: usize| {
                let index = sorted[position];
                self.blocks[index].is_fixed_same().then_some(index)
            };

            let reference = start
                .checked_sub(1)
                .and_then(fixed_same)
                .or_else(|| (end + 1 < sorted.len()).then_some(end + 1).and_then(fixed_same))
                .or_else(|| (0..start).rev().find_map(fixed_same));

            let old_number = group.old_number;
            let (new_number, mark_group) = match reference
                .and_then(|index| self.blocks[index].group.map(|group| (index, group)))
            {
                Some((index, group)) => (self.blocks[index].new_number, group),
                None => {
                    let position = self.blocks.len();
                    self.groups.push(Group {
                        old_number: Some(0),
                        block_start: position,
                        block_end: position,
                        unique: false,
                        max_words: 0,
                        words: 0,
                        chars: 0,
                        // holds only the mark, so it is never moved itself
                        fixed: true,
                        moved_from: None,
                        color: None,
                    });
                    (None, self.groups.len() - 1)
                }
            };

            self.blocks
                .push(Block::mark(moved, old_number, new_number, mark_group));
            self.groups[moved].color = Some(color);
            self.groups[moved].moved_from = Some(mark_group);
            debug!("group {moved} moved with color {color}, marked in group {mark_group}");
            color += 1;
        }

        self.sort_blocks();
    }

    /// Block indices sorted, stably, by `key`.
    fn old_order<K: Ord>(&self, key: impl Fn(&Block) -> K) -> Vec<usize> {
        let mut order = (0..self.blocks.len()).collect::<Vec<_>>();
        order.sort_by_key(|&index| key(&self.blocks[index]));
        order
    }

    fn starts_group(&self, index: usize) -> bool {
        self.blocks[index]
            .group
            .is_some_and(|group| self.groups[group].block_start == index)
    }

    fn ends_group(&self, index: usize) -> bool {
        self.blocks[index]
            .group
            .is_some_and(|group| self.groups[group].block_end == index)
    }
}
