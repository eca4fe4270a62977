use crate::{
    tokenizer::Level,
    utils::common_affix_len::{common_prefix_len, common_suffix_len},
    version::{TokenId, Versions},
};

/// A run of unlinked new tokens and the unlinked old tokens at the
/// corresponding position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Gap {
    new_first: TokenId,
    new_last: TokenId,
    new_tokens: usize,
    old_first: Option<TokenId>,
    old_last: Option<TokenId>,
    old_tokens: usize,
}

/// Splits the tokens of selected unresolved gaps into characters.
///
/// A gap qualifies when one word was split into three tokens (or three
/// joined into one) keeping its ends, or when both sides have the same
/// number of tokens and every pair is closely related: identical, a
/// prefix or suffix change, an inner insertion, or the same length with
/// at least 49% identical positions. Identical pairs inside an equal-sized
/// gap are linked directly so character matching stays within words.
pub(crate) fn split_refine_chars(versions: &mut Versions) {
    for gap in find_gaps(versions) {
        if accepts_char_split(versions, &gap) {
            split_gap(versions, &gap);
        }
    }
}

fn find_gaps(versions: &Versions) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let mut open: Option<Gap> = None;

    let mut old_cursor = versions.old.first();
    let mut current = versions.new.first();
    while let Some(id) = current {
        let new_link = versions.new.link(id);
        let old_link = old_cursor.and_then(|old| versions.old.link(old));

        match (open.as_mut(), new_link) {
            (None, None) if old_link.is_none() => {
                open = Some(Gap {
                    new_first: id,
                    new_last: id,
                    new_tokens: 1,
                    old_first: old_cursor,
                    old_last: None,
                    old_tokens: 0,
                });
            }
            (Some(gap), None) => {
                gap.new_last = id;
                gap.new_tokens += 1;
            }
            (Some(_), Some(_)) => gaps.extend(open.take()),
            _ => {}
        }

        if let Some(link) = new_link {
            old_cursor = versions.old.next(link);
        }
        current = versions.new.next(id);
    }
    gaps.extend(open);

    for gap in &mut gaps {
        let mut old = gap.old_first;
        while let Some(id) = old {
            if versions.old[id].is_linked() {
                break;
            }
            gap.old_last = Some(id);
            gap.old_tokens += 1;
            old = versions.old.next(id);
        }
    }

    gaps
}

fn accepts_char_split(versions: &Versions, gap: &Gap) -> bool {
    let (Some(old_first), Some(old_last)) = (gap.old_first, gap.old_last) else {
        return false;
    };

    if gap.new_tokens != gap.old_tokens {
        return match (gap.new_tokens, gap.old_tokens) {
            (1, 3) => keeps_ends(
                versions.new.token_text(gap.new_first),
                versions.old.token_text(old_first),
                versions.old.token_text(old_last),
            ),
            (3, 1) => keeps_ends(
                versions.old.token_text(old_first),
                versions.new.token_text(gap.new_first),
                versions.new.token_text(gap.new_last),
            ),
            _ => false,
        };
    }

    let mut new = Some(gap.new_first);
    let mut old = Some(old_first);
    while let (Some(new_id), Some(old_id)) = (new, old) {
        if !tokens_are_similar(versions.new.token_text(new_id), versions.old.token_text(old_id)) {
            return false;
        }
        if new_id == gap.new_last {
            break;
        }
        new = versions.new.next(new_id);
        old = versions.old.next(old_id);
    }

    true
}

/// `whole` begins with `first` and the first occurrence of `last` ends it.
fn keeps_ends(whole: &str, first: &str, last: &str) -> bool {
    whole.starts_with(first)
        && whole
            .len()
            .checked_sub(last.len())
            .is_some_and(|end| whole.find(last) == Some(end))
}

fn tokens_are_similar(new: &str, old: &str) -> bool {
    if new == old {
        return true;
    }

    let new_chars = new.chars().collect::<Vec<_>>();
    let old_chars = old.chars().collect::<Vec<_>>();
    let (shorter, longer) = if new_chars.len() < old_chars.len() {
        ((new, &new_chars), (old, &old_chars))
    } else {
        ((old, &old_chars), (new, &new_chars))
    };
    let shorter_len = shorter.1.len();

    if new_chars.len() == old_chars.len() {
        let identical = shorter.1.iter().zip(longer.1).filter(|(a, b)| a == b).count();
        return identical * 100 >= shorter_len * 49;
    }

    let left = common_prefix_len(&new_chars, &old_chars);
    let right = common_suffix_len(&new_chars, &old_chars);

    left + right == shorter_len
        || longer.0.contains(shorter.0)
        || left * 2 >= shorter_len
        || right * 2 >= shorter_len
}

fn split_gap(versions: &mut Versions, gap: &Gap) {
    let same_length = gap.new_tokens == gap.old_tokens;

    let mut new = Some(gap.new_first);
    let mut old = gap.old_first;
    while new.is_some() || old.is_some() {
        match (new, old) {
            (Some(new_id), Some(old_id)) if same_length && versions.same_text(new_id, old_id) => {
                versions.link(new_id, old_id);
            }
            _ => {
                if let Some(new_id) = new {
                    versions.new.split_token(new_id, Level::Character);
                }
                if let Some(old_id) = old {
                    versions.old.split_token(old_id, Level::Character);
                }
            }
        }

        new = new.filter(|&id| id != gap.new_last).and_then(|id| versions.new.next(id));
        old = old.filter(|&id| Some(id) != gap.old_last).and_then(|id| versions.old.next(id));
    }
}
