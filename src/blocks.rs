use log::debug;

use crate::{
    DiffConfig,
    slide::slide_all,
    version::{TokenId, Version, Versions},
};

mod block;
mod fixed_path;
mod group;
mod placement;

pub(crate) use block::{Block, BlockKind};
pub(crate) use group::Group;

/// A span of blocks, in new-text order, that no move crosses out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Section {
    block_start: usize,
    block_end: usize,
}

/// Blocks and groups derived from the final token links.
///
/// Blocks end up in display order: sorted by new-text position, with
/// deletions and marks placed next to the block they are anchored to.
#[derive(Debug, Clone, Default)]
pub(crate) struct Blocks {
    pub blocks: Vec<Block>,
    pub groups: Vec<Group>,
    sections: Vec<Section>,
    max_words: usize,
}

impl Blocks {
    /// Turns the links of enumerated versions into blocks, unlinking
    /// insignificant matches on the way.
    #[must_use]
    pub fn detect(versions: &mut Versions, config: &DiffConfig) -> Self {
        let mut blocks = Blocks::default();
        blocks.detect_same(versions);

        let mut cycles = 0;
        if config.unlink_blocks
            && config.block_min_length > 0
            && blocks.max_words >= config.block_min_length
        {
            while cycles < config.unlink_max && blocks.unlink(versions, config.block_min_length) {
                cycles += 1;
                slide_all(versions);

                blocks.max_words = 0;
                blocks.detect_same(versions);
            }
        }
        debug!("unlinked blocks in {cycles} cycles");

        blocks.collect_deletions(&versions.old);
        blocks.position_deletions();
        blocks.collect_insertions(&versions.new);
        blocks.group_insertions();
        blocks.insert_marks();

        blocks
    }

    fn detect_same(&mut self, versions: &Versions) {
        self.collect_same(versions);
        self.collect_sections();
        self.collect_groups();
        self.set_fixed();
    }

    /// Collects runs of linked tokens that are contiguous on both sides,
    /// sorted by their new-text position.
    fn collect_same(&mut self, versions: &Versions) {
        self.blocks.clear();

        let mut old = versions.old.first();
        while let Some(old_start) = old {
            let Some(new_start) = versions.old.link(old_start) else {
                old = versions.old.next(old_start);
                continue;
            };

            let mut count = 0;
            let mut unique = false;
            let (mut new_cursor, mut old_cursor) = (Some(new_start), Some(old_start));
            while let (Some(new_id), Some(old_id)) = (new_cursor, old_cursor) {
                if versions.old.link(old_id) != Some(new_id) {
                    break;
                }
                count += 1;
                unique |= versions.new[new_id].unique;
                new_cursor = versions.new.next(new_id);
                old_cursor = versions.old.next(old_id);
            }

            let new_number = versions.new[new_start].number;
            self.blocks.push(Block {
                old_block: Some(self.blocks.len()),
                ..Block::same(&versions.old, old_start, new_number, count, unique)
            });
            old = old_cursor;
        }

        self.blocks.sort_by_key(|block| block.new_number);
    }

    /// Finds spans of blocks whose old-text order crosses, so that the
    /// fixed-path search stays local to each span.
    fn collect_sections(&mut self) {
        self.sections.clear();

        let len = self.blocks.len();
        let mut block_start = 0;
        while block_start < len {
            let mut block_end = block_start;
            let mut old_max = self.blocks[block_start].old_number;
            let mut section_old_max = old_max;

            for j in block_start + 1..len {
                let old_number = self.blocks[j].old_number;
                if old_number > old_max {
                    old_max = old_number;
                } else if old_number < section_old_max {
                    block_end = j;
                    section_old_max = old_max;
                }
            }

            if block_end > block_start {
                let section = self.sections.len();
                for block in &mut self.blocks[block_start..=block_end] {
                    block.section = Some(section);
                }
                self.sections.push(Section {
                    block_start,
                    block_end,
                });
            }
            block_start = block_end + 1;
        }
    }

    /// Merges blocks that follow each other in old-text order. Groups
    /// outside any section cannot have moved.
    fn collect_groups(&mut self) {
        self.groups.clear();

        let len = self.blocks.len();
        let mut block_start = 0;
        while block_start < len {
            let mut block_end = block_start;
            while block_end + 1 < len
                && self.blocks[block_end + 1].old_block
                    == self.blocks[block_end].old_block.map(|old_block| old_block + 1)
            {
                block_end += 1;
            }

            let fixed = self.blocks[block_start].section.is_none();
            let group = Group::spanning(&self.blocks, block_start, block_end, fixed);
            self.max_words = self.max_words.max(group.max_words);

            let index = self.groups.len();
            for block in &mut self.blocks[block_start..=block_end] {
                block.group = Some(index);
                block.fixed = fixed;
            }
            self.groups.push(group);

            block_start = block_end + 1;
        }
    }

    /// Marks the heaviest old-order monotonic chain of groups in every
    /// section as fixed.
    fn set_fixed(&mut self) {
        for section in self.sections.clone() {
            let (Some(group_start), Some(group_end)) = (
                self.blocks[section.block_start].group,
                self.blocks[section.block_end].group,
            ) else {
                continue;
            };

            for group in fixed_path::max_path(&self.groups, group_start, group_end) {
                self.groups[group].fixed = true;
                for block in self.groups[group].blocks() {
                    self.blocks[block].fixed = true;
                }
            }
        }
    }

    /// Unlinks groups without a significant block, and the short
    /// non-unique blocks at the flanks of the remaining groups.
    ///
    /// Returns whether any token was unlinked.
    fn unlink(&self, versions: &mut Versions, min_words: usize) -> bool {
        let mut unlinked = false;

        for group in &self.groups {
            let (mut block_start, block_end) = (group.block_start, group.block_end);

            if group.max_words < min_words && !group.unique {
                for block in &self.blocks[block_start..=block_end] {
                    if block.kind == BlockKind::Same {
                        unlink_block(versions, block);
                        unlinked = true;
                    }
                }
                continue;
            }

            for index in block_start..=block_end {
                let block = &self.blocks[index];
                if block.kind != BlockKind::Same {
                    continue;
                }
                if block.words > 1 || block.unique {
                    break;
                }
                unlink_block(versions, block);
                unlinked = true;
                block_start = index;
            }

            for index in (block_start + 1..=block_end).rev() {
                let block = &self.blocks[index];
                if block.kind != BlockKind::Same {
                    continue;
                }
                if block.words > 1 || (block.words == 1 && block.unique) {
                    break;
                }
                unlink_block(versions, block);
                unlinked = true;
            }
        }

        unlinked
    }

    /// Adds one block per run of unlinked old tokens.
    fn collect_deletions(&mut self, old: &Version) {
        for (start, count) in unlinked_runs(old) {
            self.blocks.push(Block::delete(old, start, count));
        }
    }

    /// Adds one block per run of unlinked new tokens, then restores display
    /// order.
    fn collect_insertions(&mut self, new: &Version) {
        for (start, count) in unlinked_runs(new) {
            self.blocks.push(Block::insert(new, start, count));
        }
        self.sort_blocks();
    }
}

fn unlink_block(versions: &mut Versions, block: &Block) {
    let tokens = std::iter::successors(block.old_start, |&id| versions.old.next(id))
        .take(block.count)
        .collect::<Vec<_>>();
    for id in tokens {
        versions.unlink_old(id);
    }
}

/// First token and length of every maximal run of unlinked tokens.
fn unlinked_runs(version: &Version) -> Vec<(TokenId, usize)> {
    let mut runs: Vec<(TokenId, usize)> = Vec::new();
    let mut in_run = false;
    for id in version.ids() {
        if version[id].is_linked() {
            in_run = false;
            continue;
        }
        match runs.last_mut() {
            Some((_, count)) if in_run => *count += 1,
            _ => runs.push((id, 1)),
        }
        in_run = true;
    }
    runs
}
