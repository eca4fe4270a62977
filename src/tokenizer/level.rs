use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tokenization granularity, ordered from coarsest to finest.
///
/// The matcher refines unresolved text through these levels in order, so a
/// token produced at one level is only ever split at a later one.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Runs of two or more line breaks, form feeds and paragraph separators.
    Paragraph,
    /// Single line breaks.
    Line,
    /// Text ending in sentence punctuation followed by a blank.
    Sentence,
    /// Inline markup: wiki links, templates, external links, tags and URLs.
    Chunk,
    /// Words, multi-character wiki markup and single characters.
    Word,
    Character,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Paragraph,
        Level::Line,
        Level::Sentence,
        Level::Chunk,
        Level::Word,
        Level::Character,
    ];

    /// The next finer level, `None` for `Character`.
    #[must_use]
    pub fn finer(self) -> Option<Level> {
        match self {
            Level::Paragraph => Some(Level::Line),
            Level::Line => Some(Level::Sentence),
            Level::Sentence => Some(Level::Chunk),
            Level::Chunk => Some(Level::Word),
            Level::Word => Some(Level::Character),
            Level::Character => None,
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Level::Paragraph => "paragraph",
            Level::Line => "line",
            Level::Sentence => "sentence",
            Level::Chunk => "chunk",
            Level::Word => "word",
            Level::Character => "character",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_levels_refine_in_order() {
        let mut level = Level::Paragraph;
        let mut visited = vec![level];
        while let Some(finer) = level.finer() {
            assert!(finer > level);
            visited.push(finer);
            level = finer;
        }

        assert_eq!(visited, Level::ALL.to_vec());
    }
}
