use crate::{
    Side,
    blocks::{BlockKind, Blocks},
};

pub(crate) mod clip;
mod fragment;

pub use fragment::{Boundary, Fragment, FragmentKind};

/// Serializes blocks into fragments in display order, group by group,
/// merging neighbouring fragments of the same kind and colour.
///
/// With `show_block_moves` disabled, moved blocks lose their markers and
/// colours: their text becomes an insertion and their marks deletions.
pub(crate) fn assemble(blocks: &Blocks, show_block_moves: bool) -> Vec<Fragment> {
    let Blocks { blocks, groups, .. } = blocks;

    let mut order = (0..groups.len()).collect::<Vec<_>>();
    order.sort_by_key(|&group| groups[group].block_start);

    let mut fragments: Vec<Fragment> = Vec::new();
    let mut push = |fragment: Fragment| {
        let unmerged = match fragments.last_mut() {
            Some(last) => last.merge(fragment),
            None => Some(fragment),
        };
        fragments.extend(unmerged);
    };

    for group_index in order {
        let group = &groups[group_index];
        let color = group.color;

        let mark_position = blocks
            .iter()
            .position(|block| block.kind == BlockKind::Mark && block.moved == Some(group_index));
        // directions compare positions in display order, not group indices
        let direction = Side::of(mark_position.unwrap_or(group.block_start), group.block_start);

        if show_block_moves {
            if let Some(color) = color {
                push(Fragment::BlockStart { color, direction });
            }
        }

        for position in group.blocks() {
            let block = &blocks[position];
            let text = block.text.clone();

            let fragment = match (block.kind, show_block_moves || color.is_none()) {
                (BlockKind::Same, true) => Fragment::Same { text, color },
                (BlockKind::Delete, true) => Fragment::Delete { text, color },
                (BlockKind::Insert, true) => Fragment::Insert { text, color },
                (BlockKind::Same | BlockKind::Insert, false) => Fragment::Insert { text, color: None },
                (BlockKind::Delete, false) => continue,
                (BlockKind::Mark, _) => {
                    let Some(moved) = block.moved.map(|moved| &groups[moved]) else {
                        continue;
                    };
                    let text = blocks[moved.blocks()]
                        .iter()
                        .filter(|block| matches!(block.kind, BlockKind::Same | BlockKind::Delete))
                        .map(|block| block.text.as_str())
                        .collect::<String>();

                    if show_block_moves {
                        Fragment::Mark {
                            text,
                            color: moved.color,
                            direction: Side::of(moved.block_start, position),
                        }
                    } else {
                        Fragment::Delete { text, color: None }
                    }
                }
            };
            push(fragment);
        }

        if show_block_moves {
            if let Some(color) = color {
                push(Fragment::BlockEnd { color });
            }
        }
    }

    wrap(fragments)
}

/// Encloses content fragments in the container and fragment markers.
pub(crate) fn wrap(content: Vec<Fragment>) -> Vec<Fragment> {
    let mut wrapped = Vec::with_capacity(content.len() + 4);
    wrapped.extend([Fragment::ContainerStart, Fragment::FragmentStart]);
    wrapped.extend(content);
    wrapped.extend([Fragment::FragmentEnd, Fragment::ContainerEnd]);
    wrapped
}
