use crate::{
    tokenizer::patterns::{ends_with_blank, ends_with_break},
    version::{TokenId, Version, Versions},
};

/// Slides the unlinked gaps of both versions to stable positions, new
/// version first.
pub(crate) fn slide_all(versions: &mut Versions) {
    slide_gaps(&mut versions.new, &mut versions.old);
    slide_gaps(&mut versions.old, &mut versions.new);
    debug_assert!(versions.links_are_symmetric());
}

/// Moves gaps whose edges are ambiguous (the same token could be linked on
/// either side of the gap) to the last line break, or otherwise the last
/// word border, above them.
///
/// A gap is first pushed down by one token when its front equals the token
/// after it, then pulled up as far as identical linked tokens allow without
/// passing the chosen stop.
pub(crate) fn slide_gaps(text: &mut Version, linked: &mut Version) {
    let mut gap_start = None;
    let mut current = text.first();
    while let Some(id) = current {
        match gap_start {
            None if !text[id].is_linked() => gap_start = Some(id),
            Some(start) if text[id].is_linked() => {
                if let Some(back) = text.prev(id) {
                    slide_gap(text, linked, start, back);
                }
                gap_start = None;
            }
            _ => {}
        }
        current = text.next(id);
    }
}

fn slide_gap(
    text: &mut Version,
    linked: &mut Version,
    mut gap_front: TokenId,
    mut gap_back: TokenId,
) {
    // slide down by one
    let after = text.next(gap_back);
    if after.is_some_and(|after| {
        !text[gap_front].is_linked()
            && text[after].is_linked()
            && text.token_text(gap_front) == text.token_text(after)
    }) {
        if let (Some(after), Some(front)) = (after, text.next(gap_front)) {
            move_link(text, linked, after, gap_front);
            gap_front = front;
            gap_back = after;
        }
    }

    // find where sliding up has to stop
    let front_is_blank = ends_with_blank(text.token_text(gap_front));
    let mut front_stop = text.prev(gap_front);
    if !text[gap_back].is_linked() {
        let (mut front, mut back) = (text.prev(gap_front), Some(gap_back));
        while let (Some(front_id), Some(back_id)) = (front, back) {
            if !text[front_id].is_linked() || text.token_text(front_id) != text.token_text(back_id) {
                break;
            }
            if ends_with_break(text.token_text(front_id)) {
                front_stop = Some(front_id);
                break;
            }
            if ends_with_blank(text.token_text(front_id)) != front_is_blank {
                front_stop = Some(front_id);
            }
            front = text.prev(front_id);
            back = text.prev(back_id);
        }
    }

    // slide up to the stop
    let (mut front, mut back) = (text.prev(gap_front), Some(gap_back));
    while let (Some(front_id), Some(back_id)) = (front, back) {
        if front == front_stop
            || !text[front_id].is_linked()
            || text[back_id].is_linked()
            || text.token_text(front_id) != text.token_text(back_id)
        {
            break;
        }

        move_link(text, linked, front_id, back_id);
        front = text.prev(front_id);
        back = text.prev(back_id);
    }
}

/// Hands the link of `from` over to `to`, an identical unlinked token.
fn move_link(text: &mut Version, linked: &mut Version, from: TokenId, to: TokenId) {
    if let Some(other) = text[from].link.take() {
        text[to].link = Some(other);
        linked[other].link = Some(to);
    }
}
