use wasm_bindgen::prelude::*;

use crate::{Boundary, Fragment, FragmentKind, Side};

/// Wrapper type to expose `Fragment` to JS as a flat record.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct JsFragment {
    kind: FragmentKind,
    text: String,
    color: Option<u32>,
    direction: Option<Side>,
    boundary: Option<Boundary>,
}

#[wasm_bindgen]
impl JsFragment {
    #[must_use]
    pub fn kind(&self) -> FragmentKind { self.kind }

    #[must_use]
    pub fn text(&self) -> String { self.text.clone() }

    /// Pairs a moved block with its mark.
    #[must_use]
    pub fn color(&self) -> Option<u32> { self.color }

    /// Set on marks, block starts and omissions.
    #[must_use]
    pub fn direction(&self) -> Option<Side> { self.direction }

    #[must_use]
    pub fn boundary(&self) -> Option<Boundary> { self.boundary }
}

impl From<Fragment> for JsFragment {
    fn from(fragment: Fragment) -> Self {
        let (direction, boundary) = match &fragment {
            Fragment::Mark { direction, .. } | Fragment::BlockStart { direction, .. } => {
                (Some(*direction), None)
            }
            Fragment::Omission { side, boundary } => (Some(*side), Some(*boundary)),
            _ => (None, None),
        };

        JsFragment {
            kind: fragment.kind(),
            color: fragment.color().and_then(|color| u32::try_from(color).ok()),
            text: fragment.text().to_owned(),
            direction,
            boundary,
        }
    }
}
