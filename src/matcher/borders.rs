use crate::version::TokenId;

/// A linked `(new, old)` token pair at the edge of a linked region.
pub(crate) type Border = (TokenId, TokenId);

/// Edges of linked regions from which propagation continues, downwards
/// (towards the text end) and upwards (towards the text start).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Borders {
    pub down: Vec<Border>,
    pub up: Vec<Border>,
}

impl Borders {
    /// Records a freshly linked pair as an edge in both directions.
    pub fn push(&mut self, border: Border) {
        self.down.push(border);
        self.up.push(border);
    }

    pub fn extend(&mut self, other: Borders) {
        self.down.extend(other.down);
        self.up.extend(other.up);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.down.is_empty() && self.up.is_empty() }
}
