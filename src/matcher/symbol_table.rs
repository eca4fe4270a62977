use std::collections::HashMap;

use super::{Direction, Pass};
use crate::version::{TokenId, Version, Versions};

#[derive(Debug, Clone, Copy, Default)]
struct Symbol {
    new_count: usize,
    old_count: usize,
    new_token: Option<TokenId>,
    old_token: Option<TokenId>,
}

/// Occurrence counts of unlinked token texts within one matching pass.
///
/// A table lives for exactly one pass; repeated and recursive passes build
/// their own, so no pass observes another's counts.
#[derive(Debug, Default)]
pub(crate) struct SymbolTable<'t> {
    index: HashMap<&'t str, usize>,
    symbols: Vec<Symbol>,
}

impl<'t> SymbolTable<'t> {
    /// Indexes the unlinked tokens a pass covers in both versions.
    #[must_use]
    pub fn collect(versions: &'t Versions, pass: &Pass) -> Self {
        let mut table = SymbolTable::default();

        for id in scan(&versions.new, pass.new_start, pass) {
            let symbol = table.entry(versions.new.token_text(id));
            symbol.new_count += 1;
            symbol.new_token.get_or_insert(id);
        }

        for id in scan(&versions.old, pass.old_start, pass) {
            let symbol = table.entry(versions.old.token_text(id));
            symbol.old_count += 1;
            symbol.old_token = Some(id);
        }

        table
    }

    /// Token pairs whose text occurs exactly once on each side, in the order
    /// their texts were first seen.
    pub fn unique_pairs(&self) -> impl Iterator<Item = (TokenId, TokenId)> + '_ {
        self.symbols
            .iter()
            .filter(|symbol| symbol.new_count == 1 && symbol.old_count == 1)
            .filter_map(|symbol| symbol.new_token.zip(symbol.old_token))
    }

    fn entry(&mut self, text: &'t str) -> &mut Symbol {
        let next_index = self.symbols.len();
        let index = *self.index.entry(text).or_insert(next_index);
        if index == next_index {
            self.symbols.push(Symbol::default());
        }
        &mut self.symbols[index]
    }
}

/// Unlinked tokens of one version covered by a pass. Recursive passes stay
/// inside their gap and stop at the first linked token.
fn scan<'v>(
    version: &'v Version,
    start: Option<TokenId>,
    pass: &Pass,
) -> impl Iterator<Item = TokenId> + 'v {
    let direction = pass.direction;
    let bounded = pass.depth > 0;

    std::iter::successors(start, move |&id| match direction {
        Direction::Down => version.next(id),
        Direction::Up => version.prev(id),
    })
    .take_while(move |&id| !(bounded && version[id].is_linked()))
    .filter(move |&id| !version[id].is_linked())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tokenizer::Level;

    fn pass_from_start(versions: &Versions) -> Pass {
        Pass {
            level: Level::Word,
            recurse: false,
            repeating: false,
            new_start: versions.new.first(),
            old_start: versions.old.first(),
            direction: Direction::Down,
            depth: 0,
        }
    }

    #[test]
    fn test_unique_pairs_skip_repeated_tokens() {
        let mut versions = Versions::new("a b a c", "a c b");
        versions.new.split(Level::Word);
        versions.old.split(Level::Word);

        let pass = pass_from_start(&versions);
        let table = SymbolTable::collect(&versions, &pass);
        let unique = table
            .unique_pairs()
            .map(|(new, old)| (versions.new.token_text(new), versions.old.token_text(old)))
            .collect::<Vec<_>>();

        assert_eq!(unique, vec![("c", "c"), ("b", "b")]);
    }

    #[test]
    fn test_recursive_scan_stops_at_linked_token() {
        let mut versions = Versions::new("x y z", "x y z");
        versions.new.split(Level::Word);
        versions.old.split(Level::Word);
        let new_ids = versions.new.ids().collect::<Vec<_>>();
        let old_ids = versions.old.ids().collect::<Vec<_>>();
        versions.link(new_ids[2], old_ids[2]);

        let pass = Pass {
            depth: 1,
            ..pass_from_start(&versions)
        };
        let table = SymbolTable::collect(&versions, &pass);
        let unique = table
            .unique_pairs()
            .map(|(new, _)| versions.new.token_text(new))
            .collect::<Vec<_>>();

        assert_eq!(unique, vec!["x", " "]);
    }
}
