use std::ops::Range;

use regex::Regex;

mod level;
pub(crate) mod patterns;
mod sentence;
pub(crate) mod word_counts;

pub use level::Level;

/// Splits `text` into tokens at the given granularity.
///
/// Separator-like matches and the gaps between them both become tokens, so
/// concatenating the result always reproduces `text`.
///
/// ```
/// use movediff::{Level, tokenizer::split};
///
/// assert_eq!(split("Hi there!", Level::Word), vec!["Hi", " ", "there", "!"]);
/// assert_eq!(split("a\nb", Level::Line), vec!["a", "\n", "b"]);
/// ```
#[must_use]
pub fn split(text: &str, level: Level) -> Vec<&str> {
    spans(text, level)
        .into_iter()
        .map(|range| &text[range])
        .collect()
}

/// Byte ranges of the tokens `split` would return.
pub(crate) fn spans(text: &str, level: Level) -> Vec<Range<usize>> {
    let matches = match level {
        Level::Paragraph => regex_spans(&patterns::PARAGRAPH_SPLIT, text),
        Level::Line => regex_spans(&patterns::LINE_SPLIT, text),
        Level::Sentence => sentence::sentence_spans(text),
        Level::Chunk => regex_spans(&patterns::CHUNK_SPLIT, text),
        Level::Word => regex_spans(&patterns::WORD_SPLIT, text),
        Level::Character => regex_spans(&patterns::CHARACTER_SPLIT, text),
    };

    with_gaps(matches, text.len())
}

fn regex_spans(regex: &Regex, text: &str) -> Vec<Range<usize>> {
    regex.find_iter(text).map(|found| found.range()).collect()
}

/// Fills the holes between ordered, non-overlapping matches.
fn with_gaps(matches: Vec<Range<usize>>, len: usize) -> Vec<Range<usize>> {
    let mut result = Vec::with_capacity(matches.len() * 2 + 1);
    let mut last_end = 0;
    for range in matches {
        if range.is_empty() {
            continue;
        }
        if range.start > last_end {
            result.push(last_end..range.start);
        }
        last_end = range.end;
        result.push(range);
    }

    if last_end < len {
        result.push(last_end..len);
    }

    result
}
