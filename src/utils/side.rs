use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// Which way a moved block or mark points, or which half of a clipped
/// fragment an omission belongs to.
/// When compiled to WASM, the enum values are the same as their names.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg(feature = "wasm")]
pub enum Side {
    Left = "Left",
    Right = "Right",
}

/// Which way a moved block or mark points, or which half of a clipped
/// fragment an omission belongs to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg(not(feature = "wasm"))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// `Left` when `position` lies before `reference`, `Right` otherwise.
    #[must_use]
    pub fn of(position: usize, reference: usize) -> Self {
        if position < reference {
            Side::Left
        } else {
            Side::Right
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "Left"),
            Side::Right => write!(f, "Right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_side_of_position() {
        assert_eq!(Side::of(1, 4), Side::Left);
        assert_eq!(Side::of(4, 4), Side::Right);
        assert_eq!(Side::of(7, 4), Side::Right);
        assert_eq!(Side::Left.to_string(), "Left");
    }
}
