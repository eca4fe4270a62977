use regex::Regex;

use super::{Boundary, Fragment};
use crate::{
    ClipConfig, Side,
    tokenizer::patterns::{
        CLIP_BLANK, CLIP_HEADING, CLIP_LINE, CLIP_PARAGRAPH, is_blank, is_new_line, is_new_paragraph,
    },
    utils::char_offsets::CharOffsets,
};

/// Where a long unchanged text is cut, in chars from its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cut {
    position: usize,
    boundary: Boundary,
}

impl Cut {
    fn new(position: usize, boundary: Boundary) -> Self { Cut { position, boundary } }
}

/// Elides the middle of long, unmoved `Same` fragments.
///
/// The first content fragment keeps its start and the last one keeps its
/// end. Cuts prefer headings, then paragraph breaks, line breaks, blanks
/// and finally fixed distances.
pub(crate) fn clip(fragments: Vec<Fragment>, config: &ClipConfig) -> Vec<Fragment> {
    if fragments.len() == 5 {
        return fragments;
    }

    let (min_left, min_right) = (config.min_left(), config.min_right());
    let first_content = 2;
    let last_content = fragments.len().saturating_sub(3);

    let mut clipped = Vec::with_capacity(fragments.len());
    for (index, fragment) in fragments.into_iter().enumerate() {
        let Fragment::Same { text, color: None } = &fragment else {
            clipped.push(fragment);
            continue;
        };

        let text_length = text.chars().count();
        if text_length < min_left && text_length < min_right {
            clipped.push(fragment);
            continue;
        }

        let layout = Layout::new(text, config);
        let left = (index != first_content).then(|| layout.left_cut());
        let right = (index != last_content).then(|| layout.right_cut());

        if layout.is_worth_clipping(left, right) {
            clipped.extend(layout.split(left, right));
        } else {
            clipped.push(fragment);
        }
    }

    clipped
}

/// Candidate cut positions of one text, in chars.
struct Layout<'a> {
    text: &'a str,
    offsets: CharOffsets,
    config: &'a ClipConfig,
    lines: Vec<usize>,
    headings: Vec<(usize, usize)>,
    paragraphs: Vec<usize>,
}

impl<'a> Layout<'a> {
    fn new(text: &'a str, config: &'a ClipConfig) -> Self {
        let offsets = CharOffsets::new(text);
        let lines = break_positions(&CLIP_LINE, text, &offsets);
        let paragraphs = break_positions(&CLIP_PARAGRAPH, text, &offsets);
        let headings = CLIP_HEADING
            .find_iter(text)
            .map(|found| (offsets.to_char(found.start()), offsets.to_char(found.end())))
            .collect();

        Layout {
            text,
            offsets,
            config,
            lines,
            headings,
            paragraphs,
        }
    }

    fn len(&self) -> usize { self.offsets.len() }

    fn left_cut(&self) -> Cut {
        let config = self.config;
        let range_max = self
            .lines
            .get(config.lines_left_max)
            .copied()
            .unwrap_or(self.len());

        if let Some(&(_, end)) = self.headings.first() {
            if end <= config.heading_left && end <= range_max {
                return Cut::new(end, Boundary::Heading);
            }
        }

        let first_break = |positions: &[usize], min: usize, max: usize| {
            positions
                .iter()
                .copied()
                .take_while(|&position| position <= max && position <= range_max)
                .find(|&position| position > min)
        };
        if let Some(position) = first_break(
            &self.paragraphs,
            config.paragraph_left_min,
            config.paragraph_left_max,
        ) {
            return Cut::new(position, Boundary::Paragraph);
        }
        if let Some(position) = first_break(&self.lines, config.line_left_min, config.line_left_max) {
            return Cut::new(position, Boundary::Line);
        }

        let blank = CLIP_BLANK
            .find_at(self.text, self.offsets.to_byte(config.blank_left_min))
            .map(|found| self.offsets.to_char(found.start()));
        if let Some(position) = blank {
            if position < config.blank_left_max && position < range_max {
                return Cut::new(position, Boundary::Blank);
            }
        }

        if config.chars_left < range_max {
            return Cut::new(config.chars_left, Boundary::Chars);
        }

        Cut::new(range_max, Boundary::Fixed)
    }

    fn right_cut(&self) -> Cut {
        let config = self.config;
        let len = self.len();
        let range_min = if self.lines.len() >= config.lines_right_max {
            self.lines
                .get(self.lines.len() - config.lines_right_max)
                .copied()
                .unwrap_or(0)
        } else {
            0
        };

        if let Some(&(start, _)) = self.headings.last() {
            if start + config.heading_right >= len && start >= range_min {
                return Cut::new(start, Boundary::Heading);
            }
        }

        let last_break = |positions: &[usize], min: usize, max: usize| {
            positions
                .iter()
                .rev()
                .copied()
                .take_while(|&position| position + max >= len && position >= range_min)
                .find(|&position| position + min < len)
        };
        if let Some(position) = last_break(
            &self.paragraphs,
            config.paragraph_right_min,
            config.paragraph_right_max,
        ) {
            return Cut::new(position, Boundary::Paragraph);
        }
        if let Some(position) = last_break(&self.lines, config.line_right_min, config.line_right_max) {
            return Cut::new(position, Boundary::Line);
        }

        let search_start = len.saturating_sub(config.blank_right_max).max(range_min);
        let mut last_blank = None;
        for found in CLIP_BLANK.find_iter(&self.text[self.offsets.to_byte(search_start)..]) {
            let position = self
                .offsets
                .to_char(self.offsets.to_byte(search_start) + found.start());
            if position + config.blank_right_min > len {
                if let Some(position) = last_blank {
                    return Cut::new(position, Boundary::Blank);
                }
                break;
            }
            last_blank = Some(position);
        }

        if let Some(position) = len.checked_sub(config.chars_right).filter(|&position| position > range_min) {
            return Cut::new(position, Boundary::Chars);
        }

        Cut::new(range_min, Boundary::Fixed)
    }

    /// Clipping needs at least one cut, and with two cuts enough characters
    /// and lines between them.
    fn is_worth_clipping(&self, left: Option<Cut>, right: Option<Cut>) -> bool {
        match (left, right) {
            (None, None) => false,
            (Some(left), Some(right)) => {
                if left.position > right.position
                    || right.position - left.position < self.config.skip_chars
                {
                    return false;
                }

                let mut skipped_lines = 0;
                for &line in &self.lines {
                    if line > right.position || skipped_lines > self.config.skip_lines {
                        break;
                    }
                    if line > left.position {
                        skipped_lines += 1;
                    }
                }
                skipped_lines >= self.config.skip_lines
            }
            _ => true,
        }
    }

    fn split(&self, left: Option<Cut>, right: Option<Cut>) -> Vec<Fragment> {
        let mut fragments = Vec::with_capacity(7);

        if let Some(cut) = left {
            let mut kept = self.text[..self.offsets.to_byte(cut.position)]
                .trim_end_matches(|c| is_new_line(c) || is_new_paragraph(c));
            if matches!(cut.boundary, Boundary::Chars | Boundary::Blank) {
                kept = kept.trim_end_matches(is_break_or_blank);
            }
            fragments.push(Fragment::Same {
                text: kept.to_owned(),
                color: None,
            });
            fragments.push(Fragment::Omission {
                side: Side::Left,
                boundary: cut.boundary,
            });
        }

        if left.is_some() && right.is_some() {
            fragments.extend([Fragment::FragmentEnd, Fragment::Separator, Fragment::FragmentStart]);
        }

        if let Some(cut) = right {
            let mut kept = self.text[self.offsets.to_byte(cut.position)..]
                .trim_start_matches(|c| is_new_line(c) || is_new_paragraph(c));
            if matches!(cut.boundary, Boundary::Chars | Boundary::Blank) {
                kept = kept.trim_start_matches(is_break_or_blank);
            }
            fragments.push(Fragment::Omission {
                side: Side::Right,
                boundary: cut.boundary,
            });
            fragments.push(Fragment::Same {
                text: kept.to_owned(),
                color: None,
            });
        }

        fragments
    }
}

fn is_break_or_blank(c: char) -> bool { is_blank(c) || is_new_line(c) || is_new_paragraph(c) }

/// Start positions of all matches of `regex`, in chars, framed by the text
/// start and end.
fn break_positions(regex: &Regex, text: &str, offsets: &CharOffsets) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut last_end = None;
    for found in regex.find_iter(text) {
        positions.push(offsets.to_char(found.start()));
        last_end = Some(offsets.to_char(found.end()));
    }

    if positions.first() != Some(&0) {
        positions.insert(0, 0);
    }
    if last_end != Some(offsets.len()) {
        positions.push(offsets.len());
    }
    positions
}
