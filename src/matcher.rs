use log::{debug, trace};

use crate::{
    DiffConfig,
    tokenizer::{Level, patterns::is_blank_only, word_counts::words_and_chunks},
    version::{TokenId, Versions},
};

mod borders;
mod symbol_table;

use borders::{Border, Borders};
use symbol_table::SymbolTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Down,
    Up,
}

/// Parameters of one matching pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pass {
    pub level: Level,
    pub recurse: bool,
    pub repeating: bool,
    pub new_start: Option<TokenId>,
    pub old_start: Option<TokenId>,
    pub direction: Direction,
    pub depth: usize,
}

impl Pass {
    fn is_top_level(&self) -> bool { self.depth == 0 && !self.repeating }
}

/// Links corresponding tokens of the old and new version.
///
/// Each pass links tokens whose text occurs exactly once on both sides,
/// then grows the linked regions token by token in both directions. The
/// borders where growth stopped are kept between refinement levels so the
/// next, finer level continues from them.
#[derive(Debug)]
pub(crate) struct Matcher<'c> {
    config: &'c DiffConfig,
    borders: Borders,
    deepest: usize,
}

impl<'c> Matcher<'c> {
    #[must_use]
    pub fn new(config: &'c DiffConfig) -> Self {
        Matcher {
            config,
            borders: Borders::default(),
            deepest: 0,
        }
    }

    /// Deepest recursion any pass so far has reached, never more than
    /// `recursion_max`.
    #[must_use]
    pub fn deepest_recursion(&self) -> usize { self.deepest }

    /// Runs a full-text pass at `level`, optionally refining unresolved gaps
    /// with bounded recursion.
    pub fn calculate(&mut self, versions: &mut Versions, level: Level, recurse: bool) {
        let pass = Pass {
            level,
            recurse,
            repeating: false,
            new_start: versions.new.first(),
            old_start: versions.old.first(),
            direction: Direction::Down,
            depth: 0,
        };
        self.run(versions, pass);

        if log::log_enabled!(log::Level::Debug) {
            let linked = versions
                .new
                .ids()
                .filter(|&id| versions.new[id].is_linked())
                .count();
            debug!(
                "{level} pass: {} new tokens, {} old tokens, {linked} linked, recursion depth {}",
                versions.new.len(),
                versions.old.len(),
                self.deepest,
            );
        }
        debug_assert!(versions.links_are_symmetric());
    }

    fn run(&mut self, versions: &mut Versions, pass: Pass) {
        self.deepest = self.deepest.max(pass.depth);
        if pass.depth > 0 {
            trace!("recursing into {:?} gap at depth {}", pass.direction, pass.depth);
        }

        let mut borders = if pass.is_top_level() {
            std::mem::take(&mut self.borders)
        } else {
            Borders::default()
        };

        let candidates = SymbolTable::collect(versions, &pass)
            .unique_pairs()
            .collect::<Vec<_>>();

        let mut linked_unique = false;
        for (new, old) in candidates {
            if is_blank_only(versions.new.token_text(new)) {
                continue;
            }

            versions.link(new, old);
            linked_unique = true;
            borders.push((new, old));

            if pass.depth == 0 && self.is_significant(versions, new, pass.level) {
                versions.new[new].unique = true;
                versions.old[old].unique = true;
            }
        }

        if !linked_unique && borders.is_empty() {
            return;
        }

        let mut next = Borders::default();
        for &border in &borders.down {
            if let Some(stop) = propagate(versions, border, Direction::Down) {
                next.down.push(stop);
            }
        }
        for &border in &borders.up {
            if let Some(stop) = propagate(versions, border, Direction::Up) {
                next.up.push(stop);
            }
        }

        if pass.is_top_level() {
            if let Some(border) = anchor(versions, Direction::Down) {
                next.down.push(border);
            }
            if let Some(border) = anchor(versions, Direction::Up) {
                next.up.push(border);
            }
            self.borders = next.clone();
        } else {
            self.borders.extend(next.clone());
        }

        if !pass.repeating && self.config.repeated_diff {
            self.run(
                versions,
                Pass {
                    repeating: true,
                    ..pass
                },
            );
        }

        if pass.recurse && self.config.recursive_diff && pass.depth < self.config.recursion_max {
            for border in next.down {
                let start = step(versions, border, Direction::Down);
                self.recurse_into(versions, pass, start, Direction::Down);
            }
            for border in next.up {
                let start = step(versions, border, Direction::Up);
                self.recurse_into(versions, pass, start, Direction::Up);
            }
        }
    }

    fn recurse_into(
        &mut self,
        versions: &mut Versions,
        pass: Pass,
        (new_start, old_start): (Option<TokenId>, Option<TokenId>),
        direction: Direction,
    ) {
        let (Some(new), Some(old)) = (new_start, old_start) else {
            return;
        };
        if versions.new[new].is_linked() || versions.old[old].is_linked() {
            return;
        }

        self.run(
            versions,
            Pass {
                repeating: false,
                new_start,
                old_start,
                direction,
                depth: pass.depth + 1,
                ..pass
            },
        );
    }

    /// Whether a uniquely linked token is meaningful enough to anchor a
    /// moved block: every character counts at the character level,
    /// otherwise it needs enough words or one word that is unique in both
    /// versions.
    fn is_significant(&self, versions: &Versions, new: TokenId, level: Level) -> bool {
        if level == Level::Character {
            return true;
        }

        let words = words_and_chunks(versions.new.token_text(new)).collect::<Vec<_>>();
        if words.len() >= self.config.block_min_length {
            return true;
        }

        words
            .iter()
            .any(|word| versions.old.words().get(word) == 1 && versions.new.words().get(word) == 1)
    }
}

fn step(
    versions: &Versions,
    (new, old): Border,
    direction: Direction,
) -> (Option<TokenId>, Option<TokenId>) {
    match direction {
        Direction::Down => (versions.new.next(new), versions.old.next(old)),
        Direction::Up => (versions.new.prev(new), versions.old.prev(old)),
    }
}

/// Links identical unlinked neighbours of a linked pair, walking in
/// `direction`. Returns the last linked pair when growth stopped at a
/// mismatch, which is where a finer level has to pick up.
fn propagate(versions: &mut Versions, border: Border, direction: Direction) -> Option<Border> {
    let (new, old) = border;
    if !versions.is_linked_pair(new, old) {
        return None;
    }

    let mut last = border;
    loop {
        let (Some(new), Some(old)) = step(versions, last, direction) else {
            return None;
        };
        if versions.new[new].is_linked() || versions.old[old].is_linked() {
            return None;
        }
        if !versions.same_text(new, old) {
            return Some(last);
        }

        versions.link(new, old);
        last = (new, old);
    }
}

/// Treats the text start (or end) as linked and links identical tokens
/// from there until the first mismatch or linked token.
fn anchor(versions: &mut Versions, direction: Direction) -> Option<Border> {
    let (mut new, mut old) = match direction {
        Direction::Down => (versions.new.first(), versions.old.first()),
        Direction::Up => (versions.new.last(), versions.old.last()),
    };

    let mut last = None;
    while let (Some(new_id), Some(old_id)) = (new, old) {
        if versions.new[new_id].is_linked()
            || versions.old[old_id].is_linked()
            || !versions.same_text(new_id, old_id)
        {
            break;
        }

        versions.link(new_id, old_id);
        last = Some((new_id, old_id));
        (new, old) = step(versions, (new_id, old_id), direction);
    }

    last
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn linked_texts(versions: &Versions) -> Vec<(&str, bool)> {
        versions
            .new
            .ids()
            .map(|id| (versions.new.token_text(id), versions.new[id].is_linked()))
            .collect()
    }

    fn word_versions(old: &str, new: &str) -> Versions {
        let mut versions = Versions::new(old, new);
        versions.new.split(Level::Word);
        versions.old.split(Level::Word);
        versions
    }

    #[test]
    fn test_unique_words_anchor_propagation() {
        let config = DiffConfig::default();
        let mut versions = word_versions("the quick fox", "the slow fox");

        Matcher::new(&config).calculate(&mut versions, Level::Word, true);

        assert_eq!(
            linked_texts(&versions),
            vec![("the", true), (" ", true), ("slow", false), (" ", true), ("fox", true)]
        );
        assert!(versions.links_are_symmetric());
    }

    #[test]
    fn test_repeated_tokens_link_by_propagation() {
        let config = DiffConfig::default();
        let mut versions = word_versions("a a a unique b b", "a a a unique b b");

        Matcher::new(&config).calculate(&mut versions, Level::Word, false);

        assert!(linked_texts(&versions).iter().all(|&(_, linked)| linked));
    }

    #[test]
    fn test_blank_tokens_are_not_unique_anchors() {
        let config = DiffConfig::default();
        let mut versions = word_versions("x y", "p q");

        Matcher::new(&config).calculate(&mut versions, Level::Word, true);

        assert!(linked_texts(&versions).iter().all(|&(_, linked)| !linked));
    }

    #[test]
    fn test_significant_tokens_are_marked_unique() {
        let config = DiffConfig::default();
        let mut versions = word_versions("alpha beta beta", "beta alpha beta");

        Matcher::new(&config).calculate(&mut versions, Level::Word, false);

        let alpha = versions
            .new
            .ids()
            .find(|&id| versions.new.token_text(id) == "alpha")
            .unwrap();
        assert!(versions.new[alpha].unique);
        let old_alpha = versions.new.link(alpha).unwrap();
        assert!(versions.old[old_alpha].unique);
    }

    #[test]
    fn test_recursion_resolves_crossed_duplicates() {
        let config = DiffConfig::default();
        let mut versions = word_versions("A x B y A x", "A x C y A x");

        Matcher::new(&config).calculate(&mut versions, Level::Word, true);

        let unlinked = linked_texts(&versions)
            .into_iter()
            .filter(|&(_, linked)| !linked)
            .map(|(text, _)| text)
            .collect::<Vec<_>>();
        assert_eq!(unlinked, vec!["C"]);
    }

    #[test]
    fn test_recursion_stops_at_configured_depth() {
        let (old, new) = ("A x B y A x", "A x C y A x");

        let config = DiffConfig::default().with_recursion_max(0);
        let mut versions = word_versions(old, new);
        let mut matcher = Matcher::new(&config);
        matcher.calculate(&mut versions, Level::Word, true);
        assert_eq!(matcher.deepest_recursion(), 0);

        let config = DiffConfig::default().with_recursion_max(1);
        let mut versions = word_versions(old, new);
        let mut matcher = Matcher::new(&config);
        matcher.calculate(&mut versions, Level::Word, true);
        assert_eq!(matcher.deepest_recursion(), 1);
    }

    #[test]
    fn test_repetitive_text_stays_within_recursion_cap() {
        let old = "a b ".repeat(80);
        let new = format!("{}c {}", "a b ".repeat(40), "b a ".repeat(40));

        for cap in [1, 2, 3] {
            let config = DiffConfig::default().with_recursion_max(cap);
            let mut versions = word_versions(&old, &new);
            let mut matcher = Matcher::new(&config);
            matcher.calculate(&mut versions, Level::Word, true);

            assert!(matcher.deepest_recursion() <= cap);
            assert!(versions.links_are_symmetric());
        }
    }

    #[test]
    fn test_identical_text_links_without_repeat_or_recursion() {
        let config = DiffConfig::default().with_recursive_diff(false).with_repeated_diff(false);
        let mut versions = word_versions("a b c", "a b c");

        Matcher::new(&config).calculate(&mut versions, Level::Word, true);

        assert!(linked_texts(&versions).iter().all(|&(_, linked)| linked));
    }
}
