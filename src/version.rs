use std::ops::{Index, IndexMut};

use crate::tokenizer::{Level, spans, word_counts::WordCounts};

mod token;

pub(crate) use token::{Token, TokenId};

/// One text version held as a doubly linked list of tokens in an arena.
///
/// Splitting a token appends its parts to the arena and relinks the
/// neighbours; the replaced slot keeps its own `next` so a traversal that is
/// currently standing on it can continue.
#[derive(Debug, Clone)]
pub(crate) struct Version {
    text: String,
    tokens: Vec<Token>,
    first: Option<TokenId>,
    last: Option<TokenId>,
    words: WordCounts,
}

impl Version {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Version {
            text: text.to_owned(),
            tokens: Vec::new(),
            first: None,
            last: None,
            words: WordCounts::new(text),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str { &self.text }

    #[must_use]
    pub fn first(&self) -> Option<TokenId> { self.first }

    #[must_use]
    pub fn last(&self) -> Option<TokenId> { self.last }

    #[must_use]
    pub fn words(&self) -> &WordCounts { &self.words }

    /// Text of a single token.
    #[must_use]
    pub fn token_text(&self, id: TokenId) -> &str { &self.text[self[id].span.clone()] }

    #[must_use]
    pub fn next(&self, id: TokenId) -> Option<TokenId> { self[id].next }

    #[must_use]
    pub fn prev(&self, id: TokenId) -> Option<TokenId> { self[id].prev }

    #[must_use]
    pub fn link(&self, id: TokenId) -> Option<TokenId> { self[id].link }

    /// Handles of the live token list, first to last.
    pub fn ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        std::iter::successors(self.first, |&id| self[id].next)
    }

    /// Number of tokens currently in the list.
    #[must_use]
    pub fn len(&self) -> usize { self.ids().count() }

    /// Tokenizes the whole text, replacing any previous token list.
    pub fn split(&mut self, level: Level) {
        self.tokens.clear();
        self.first = None;
        self.last = None;

        let mut prev = None;
        for span in spans(&self.text, level) {
            prev = Some(self.push(span, prev));
        }

        if prev.is_some() {
            self.first = Some(TokenId(0));
            self.last = prev;
        }
    }

    /// Replaces a single token by its finer tokens at `level`.
    pub fn split_token(&mut self, id: TokenId, level: Level) {
        let span = self[id].span.clone();
        let parts = spans(&self.text[span.clone()], level);
        if parts.len() <= 1 {
            return;
        }

        let (outer_prev, outer_next) = (self[id].prev, self[id].next);
        let mut prev = outer_prev;
        let mut first_part = None;
        for part in parts {
            let part_id = self.push(span.start + part.start..span.start + part.end, prev);
            first_part.get_or_insert(part_id);
            prev = Some(part_id);
        }

        if let Some(last_part) = prev {
            self[last_part].next = outer_next;
        }
        match outer_next {
            Some(next) => self[next].prev = prev,
            None => self.last = prev,
        }
        if outer_prev.is_none() {
            self.first = first_part;
        }
    }

    /// Splits every unlinked token to the finer `level`.
    pub fn split_refine(&mut self, level: Level) {
        let mut current = self.first;
        while let Some(id) = current {
            if !self[id].is_linked() {
                self.split_token(id, level);
            }
            current = self[id].next;
        }
    }

    /// Numbers the live tokens in list order.
    pub fn enumerate(&mut self) {
        let mut number = 0;
        let mut current = self.first;
        while let Some(id) = current {
            self[id].number = number;
            number += 1;
            current = self[id].next;
        }
    }

    fn push(&mut self, span: std::ops::Range<usize>, prev: Option<TokenId>) -> TokenId {
        let id = TokenId(self.tokens.len());
        self.tokens.push(Token::new(span, prev));
        if let Some(prev) = prev {
            self[prev].next = Some(id);
        }
        id
    }
}

impl Index<TokenId> for Version {
    type Output = Token;

    fn index(&self, id: TokenId) -> &Token { &self.tokens[id.0] }
}

impl IndexMut<TokenId> for Version {
    fn index_mut(&mut self, id: TokenId) -> &mut Token { &mut self.tokens[id.0] }
}

/// The old and new version of one diff, with the link bookkeeping that must
/// keep both sides symmetric.
#[derive(Debug, Clone)]
pub(crate) struct Versions {
    pub new: Version,
    pub old: Version,
}

impl Versions {
    #[must_use]
    pub fn new(old: &str, new: &str) -> Self {
        Versions {
            new: Version::new(new),
            old: Version::new(old),
        }
    }

    /// Links a new token to an old token.
    pub fn link(&mut self, new: TokenId, old: TokenId) {
        self.new[new].link = Some(old);
        self.old[old].link = Some(new);
    }

    /// Removes the link of an old token from both sides.
    pub fn unlink_old(&mut self, old: TokenId) {
        if let Some(new) = self.old[old].link.take() {
            self.new[new].link = None;
        }
    }

    /// True when both texts of a token pair are identical.
    #[must_use]
    pub fn same_text(&self, new: TokenId, old: TokenId) -> bool {
        self.new.token_text(new) == self.old.token_text(old)
    }

    #[must_use]
    pub fn is_linked_pair(&self, new: TokenId, old: TokenId) -> bool {
        self.new.link(new) == Some(old) && self.old.link(old) == Some(new)
    }

    pub fn split_refine(&mut self, level: Level) {
        self.new.split_refine(level);
        self.old.split_refine(level);
    }

    pub fn enumerate(&mut self) {
        self.new.enumerate();
        self.old.enumerate();
    }

    /// Checks that every link points back at its origin.
    #[must_use]
    pub fn links_are_symmetric(&self) -> bool {
        self.new
            .ids()
            .all(|id| self.new.link(id).is_none_or(|old| self.old.link(old) == Some(id)))
            && self
                .old
                .ids()
                .all(|id| self.old.link(id).is_none_or(|new| self.new.link(new) == Some(id)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn texts(version: &Version) -> Vec<&str> {
        version.ids().map(|id| version.token_text(id)).collect()
    }

    #[test]
    fn test_split_whole_text() {
        let mut version = Version::new("one two\nthree");
        version.split(Level::Line);

        assert_eq!(texts(&version), vec!["one two", "\n", "three"]);
        assert_eq!(version.len(), 3);
    }

    #[test]
    fn test_split_token_keeps_neighbours() {
        let mut version = Version::new("one two\nthree four");
        version.split(Level::Line);
        let middle = version.first().and_then(|id| version.next(id));
        let last = version.last();

        let first = version.first().unwrap();
        version.split_token(first, Level::Word);
        version.split_token(last.unwrap(), Level::Word);

        assert_eq!(texts(&version), vec!["one", " ", "two", "\n", "three", " ", "four"]);
        assert_eq!(version.prev(middle.unwrap()).map(|id| version.token_text(id)), Some("two"));
        assert_eq!(version.last().map(|id| version.token_text(id)), Some("four"));

        let backwards = std::iter::successors(version.last(), |&id| version.prev(id))
            .map(|id| version.token_text(id))
            .collect::<Vec<_>>();
        assert_eq!(backwards, vec!["four", " ", "three", "\n", "two", " ", "one"]);
    }

    #[test]
    fn test_split_refine_skips_linked_tokens() {
        let mut versions = Versions::new("a b\nc d", "a b\nc e");
        versions.new.split(Level::Line);
        versions.old.split(Level::Line);
        let (new_first, old_first) = (versions.new.first().unwrap(), versions.old.first().unwrap());
        versions.link(new_first, old_first);

        versions.split_refine(Level::Word);

        assert_eq!(texts(&versions.new), vec!["a b", "\n", "c", " ", "e"]);
        assert_eq!(texts(&versions.old), vec!["a b", "\n", "c", " ", "d"]);
        assert!(versions.links_are_symmetric());
        assert!(versions.is_linked_pair(new_first, old_first));
    }

    #[test]
    fn test_enumerate_numbers_live_tokens() {
        let mut version = Version::new("x y");
        version.split(Level::Paragraph);
        version.split_refine(Level::Word);
        version.enumerate();

        let numbers = version.ids().map(|id| version[id].number).collect::<Vec<_>>();
        assert_eq!(numbers, vec![0, 1, 2]);
    }

    #[test]
    fn test_unlink_clears_both_sides() {
        let mut versions = Versions::new("x", "x");
        versions.new.split(Level::Word);
        versions.old.split(Level::Word);
        let (new, old) = (versions.new.first().unwrap(), versions.old.first().unwrap());

        versions.link(new, old);
        assert!(versions.same_text(new, old));
        versions.unlink_old(old);

        assert_eq!(versions.new.link(new), None);
        assert_eq!(versions.old.link(old), None);
    }
}
