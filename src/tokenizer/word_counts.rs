use std::collections::HashMap;

use super::patterns::{COUNT_CHUNKS, COUNT_WORDS};

/// Occurrence counts of every real word and inline markup chunk of one text
/// version. Only used to decide whether a linked token is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts {
    counts: HashMap<String, usize>,
}

impl WordCounts {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut counts = HashMap::new();
        for found in COUNT_WORDS.find_iter(text).chain(COUNT_CHUNKS.find_iter(text)) {
            *counts.entry(found.as_str().to_owned()).or_insert(0) += 1;
        }

        WordCounts { counts }
    }

    #[must_use]
    pub fn get(&self, word: &str) -> usize { self.counts.get(word).copied().unwrap_or(0) }
}

/// Words and chunks of a single token, in the order they are counted.
pub fn words_and_chunks(token: &str) -> impl Iterator<Item = &str> {
    COUNT_WORDS
        .find_iter(token)
        .chain(COUNT_CHUNKS.find_iter(token))
        .map(|found| found.as_str())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_counts_words_and_chunks() {
        let counts = WordCounts::new("the cat and the hat [[the cat]]");

        assert_eq!(counts.get("the"), 3);
        assert_eq!(counts.get("cat"), 2);
        assert_eq!(counts.get("hat"), 1);
        assert_eq!(counts.get("[[the cat]]"), 1);
        assert_eq!(counts.get("dog"), 0);
    }

    #[test]
    fn test_words_and_chunks_of_token() {
        assert_eq!(
            words_and_chunks("see {{tpl}} now").collect::<Vec<_>>(),
            vec!["see", "tpl", "now", "{{tpl}}"]
        );
    }
}
