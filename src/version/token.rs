use std::ops::Range;

/// Stable handle of a token inside one version's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(pub(super) usize);

/// One unit of text at the granularity it was last split at.
///
/// `span` is a byte range into the owning version's text. `link` points
/// into the other version's arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub span: Range<usize>,
    pub prev: Option<TokenId>,
    pub next: Option<TokenId>,
    pub link: Option<TokenId>,
    pub number: usize,
    pub unique: bool,
}

impl Token {
    #[must_use]
    pub fn new(span: Range<usize>, prev: Option<TokenId>) -> Self {
        Token {
            span,
            prev,
            next: None,
            link: None,
            number: 0,
            unique: false,
        }
    }

    #[must_use]
    pub fn is_linked(&self) -> bool { self.link.is_some() }
}
