#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use crate::Side;

/// One unit of the diff output, in display order.
///
/// `color` is set only inside a moved block and on the marks pointing at
/// it; the same number pairs a moved block with its mark.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    ContainerStart,
    ContainerEnd,
    FragmentStart,
    FragmentEnd,
    /// Between two clipped parts of the diff.
    Separator,
    /// Text of both versions, or of the new version when inside a moved
    /// block.
    Same { text: String, color: Option<usize> },
    /// Text only in the old version.
    Delete { text: String, color: Option<usize> },
    /// Text only in the new version.
    Insert { text: String, color: Option<usize> },
    /// Old position of a moved block; `text` is the moved block's old
    /// content and `direction` points to where it went.
    Mark {
        text: String,
        color: Option<usize>,
        direction: Side,
    },
    /// Opens a moved block; `direction` points to its mark.
    BlockStart { color: usize, direction: Side },
    BlockEnd { color: usize },
    /// Unchanged text left out by clipping, on the given side of a cut.
    Omission { side: Side, boundary: Boundary },
}

/// The fieldless kind of a [`Fragment`].
/// When compiled to WASM, the enum values are the same as their names.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg(feature = "wasm")]
pub enum FragmentKind {
    ContainerStart = "ContainerStart",
    ContainerEnd = "ContainerEnd",
    FragmentStart = "FragmentStart",
    FragmentEnd = "FragmentEnd",
    Separator = "Separator",
    Same = "Same",
    Delete = "Delete",
    Insert = "Insert",
    Mark = "Mark",
    BlockStart = "BlockStart",
    BlockEnd = "BlockEnd",
    Omission = "Omission",
}

/// The fieldless kind of a [`Fragment`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg(not(feature = "wasm"))]
pub enum FragmentKind {
    ContainerStart,
    ContainerEnd,
    FragmentStart,
    FragmentEnd,
    Separator,
    Same,
    Delete,
    Insert,
    Mark,
    BlockStart,
    BlockEnd,
    Omission,
}

/// Which kind of text boundary a clipping cut was placed at.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg(feature = "wasm")]
pub enum Boundary {
    Heading = "Heading",
    Paragraph = "Paragraph",
    Line = "Line",
    Blank = "Blank",
    Chars = "Chars",
    Fixed = "Fixed",
}

/// Which kind of text boundary a clipping cut was placed at.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg(not(feature = "wasm"))]
pub enum Boundary {
    /// After a heading or table delimiter line.
    Heading,
    Paragraph,
    Line,
    /// Inside a line, at white space.
    Blank,
    /// A fixed number of characters from the edge.
    Chars,
    /// The line budget ran out before any other boundary was found.
    Fixed,
}

impl Fragment {
    #[must_use]
    pub fn kind(&self) -> FragmentKind {
        match self {
            Fragment::ContainerStart => FragmentKind::ContainerStart,
            Fragment::ContainerEnd => FragmentKind::ContainerEnd,
            Fragment::FragmentStart => FragmentKind::FragmentStart,
            Fragment::FragmentEnd => FragmentKind::FragmentEnd,
            Fragment::Separator => FragmentKind::Separator,
            Fragment::Same { .. } => FragmentKind::Same,
            Fragment::Delete { .. } => FragmentKind::Delete,
            Fragment::Insert { .. } => FragmentKind::Insert,
            Fragment::Mark { .. } => FragmentKind::Mark,
            Fragment::BlockStart { .. } => FragmentKind::BlockStart,
            Fragment::BlockEnd { .. } => FragmentKind::BlockEnd,
            Fragment::Omission { .. } => FragmentKind::Omission,
        }
    }

    /// The text payload, empty for markers.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Fragment::Same { text, .. }
            | Fragment::Delete { text, .. }
            | Fragment::Insert { text, .. }
            | Fragment::Mark { text, .. } => text,
            _ => "",
        }
    }

    #[must_use]
    pub fn color(&self) -> Option<usize> {
        match self {
            Fragment::Same { color, .. }
            | Fragment::Delete { color, .. }
            | Fragment::Insert { color, .. }
            | Fragment::Mark { color, .. } => *color,
            Fragment::BlockStart { color, .. } | Fragment::BlockEnd { color } => Some(*color),
            _ => None,
        }
    }

    /// Whether the text belongs to the old version at this position.
    ///
    /// Deletions inside a moved block are represented by the block's mark.
    #[must_use]
    pub fn is_in_old(&self) -> bool {
        matches!(
            self,
            Fragment::Same { color: None, .. } | Fragment::Delete { color: None, .. } | Fragment::Mark { .. }
        )
    }

    /// Whether the text belongs to the new version at this position.
    #[must_use]
    pub fn is_in_new(&self) -> bool { matches!(self, Fragment::Same { .. } | Fragment::Insert { .. }) }

    /// Appends `other` if both are text of the same kind and colour.
    ///
    /// Returns `other` back when it cannot be merged.
    pub(crate) fn merge(&mut self, other: Fragment) -> Option<Fragment> {
        if self.kind() != other.kind()
            || self.color() != other.color()
            || self.text().is_empty()
            || other.text().is_empty()
        {
            return Some(other);
        }

        match (self, other) {
            (Fragment::Same { text, .. }, Fragment::Same { text: tail, .. })
            | (Fragment::Delete { text, .. }, Fragment::Delete { text: tail, .. })
            | (Fragment::Insert { text, .. }, Fragment::Insert { text: tail, .. }) => {
                text.push_str(&tail);
                None
            }
            (Fragment::Mark { text, direction, .. }, Fragment::Mark {
                text: tail,
                direction: tail_direction,
                ..
            }) if *direction == tail_direction => {
                text.push_str(&tail);
                None
            }
            (_, other) => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn same(text: &str) -> Fragment {
        Fragment::Same {
            text: text.to_owned(),
            color: None,
        }
    }

    #[test]
    fn test_merge_same_kind() {
        let mut fragment = same("a ");
        assert_eq!(fragment.merge(same("b")), None);
        assert_eq!(fragment, same("a b"));
    }

    #[test]
    fn test_merge_keeps_different_colors_apart() {
        let mut fragment = same("a");
        let coloured = Fragment::Same {
            text: "b".to_owned(),
            color: Some(1),
        };

        assert_eq!(fragment.merge(coloured.clone()), Some(coloured));
        assert_eq!(fragment.merge(Fragment::FragmentEnd), Some(Fragment::FragmentEnd));
        assert_eq!(fragment, same("a"));
    }

    #[test]
    fn test_origin() {
        let moved = Fragment::Same {
            text: "x".to_owned(),
            color: Some(2),
        };
        let mark = Fragment::Mark {
            text: "x".to_owned(),
            color: Some(2),
            direction: Side::Left,
        };

        assert!(same("x").is_in_old() && same("x").is_in_new());
        assert!(!moved.is_in_old() && moved.is_in_new());
        assert!(mark.is_in_old() && !mark.is_in_new());
        assert_eq!(mark.kind(), FragmentKind::Mark);
        assert_eq!(Fragment::BlockEnd { color: 2 }.color(), Some(2));
    }
}
