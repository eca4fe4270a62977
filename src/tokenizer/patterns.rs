//! Character classes and compiled expressions shared by the tokenizer, the
//! matcher and the clipper.
use std::sync::LazyLock;

use regex::Regex;

/// Breaking white space without line or paragraph breaks.
pub const BLANKS: &str = r" \t\x0b\x{2000}-\x{200b}\x{202f}\x{205f}\x{3000}";

/// Line breaks including `\n` and `\r`.
pub const NEW_LINES: &str = r"\n\r\x{0085}\x{2028}";

/// Paragraph breaks other than blank lines.
pub const NEW_PARAGRAPH: &str = r"\f\x{2029}";

const CHUNK: &str = concat!(
    r"\[\[[^\[\]\n]+\]\]|",        // [[wiki link]]
    r"\{\{[^\{\}\n]+\}\}|",        // {{template}}
    r"\[[^\[\]\n]+\]|",            // [ext. link]
    r"</?[^<>\[\]\{\}\n]+>|",      // <html>
    r"\[\[[^\[\]\|\n]+\]\]\||",    // [[wiki link|
    r"\{\{[^\{\}\|\n]+\||",        // {{template|
    r#"\b(?:(?:https?:|)//)[^\x00-\x20\s"\[\]\x7f]+"#, // link
);

const WORD: &str = r"\w+(?:['’]\w*)*";

/// Anything a line-bound `.` would match.
const NOT_LINE_BREAK: &str = r"[^\n\r\x{2028}\x{2029}]";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|error| panic!("invalid built-in pattern {pattern}: {error}"))
}

pub static PARAGRAPH_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?:\r\n|\n|\r){{2,}}|[{NEW_PARAGRAPH}]")));

pub static LINE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"\r\n|\n|\r|[{NEW_LINES}]")));

pub static CHUNK_SPLIT: LazyLock<Regex> = LazyLock::new(|| compile(CHUNK));

pub static WORD_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"{WORD}|\[\[|\]\]|\{{\{{|\}}\}}|&\w+;|'''|''|==+|\{{\||\|\}}|\|-|{NOT_LINE_BREAK}"
    ))
});

pub static CHARACTER_SPLIT: LazyLock<Regex> = LazyLock::new(|| compile(NOT_LINE_BREAK));

/// Real words, used for word-frequency tables and block word counts.
pub static COUNT_WORDS: LazyLock<Regex> = LazyLock::new(|| compile(WORD));

/// Inline markup chunks, counted alongside real words.
pub static COUNT_CHUNKS: LazyLock<Regex> = LazyLock::new(|| compile(CHUNK));

/// A single line or paragraph break run, the clipper's line positions.
pub static CLIP_LINE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("[{NEW_LINES}{NEW_PARAGRAPH}]+")));

/// A line starting with a wiki heading or table delimiter.
pub static CLIP_HEADING: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\n(?:==+[^\n]+?==+|\{\||\|\})[^\n]*"));

pub static CLIP_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(r"(?:(?:\r\n|\n|\r){{2,}}|[{NEW_PARAGRAPH}])+"))
});

pub static CLIP_BLANK: LazyLock<Regex> = LazyLock::new(|| compile(&format!("[{BLANKS}]+")));

fn in_class(c: char, ranges: &[(char, char)]) -> bool {
    ranges.iter().any(|&(low, high)| low <= c && c <= high)
}

const BLANK_RANGES: &[(char, char)] = &[
    (' ', ' '),
    ('\t', '\t'),
    ('\x0b', '\x0b'),
    ('\u{2000}', '\u{200b}'),
    ('\u{202f}', '\u{202f}'),
    ('\u{205f}', '\u{205f}'),
    ('\u{3000}', '\u{3000}'),
];

const NEW_LINE_RANGES: &[(char, char)] = &[
    ('\n', '\n'),
    ('\r', '\r'),
    ('\u{0085}', '\u{0085}'),
    ('\u{2028}', '\u{2028}'),
];

const NEW_PARAGRAPH_RANGES: &[(char, char)] = &[('\x0c', '\x0c'), ('\u{2029}', '\u{2029}')];

const SENTENCE_END: &[char] = &[
    '.', '!', '?', ':', ';',
    // full stops
    '\u{0589}', '\u{06D4}', '\u{0701}', '\u{0702}', '\u{0964}', '\u{0DF4}', '\u{1362}',
    '\u{166E}', '\u{1803}', '\u{1809}', '\u{2CF9}', '\u{2CFE}', '\u{2E3C}', '\u{3002}',
    '\u{A4FF}', '\u{A60E}', '\u{A6F3}', '\u{FE52}', '\u{FF0E}', '\u{FF61}',
    // exclamation marks
    '\u{01C3}', '\u{055C}', '\u{07F9}', '\u{1944}', '\u{203C}', '\u{2048}', '\u{FE15}',
    '\u{FE57}', '\u{FF01}',
    // question marks
    '\u{037E}', '\u{055E}', '\u{061F}', '\u{1367}', '\u{1945}', '\u{2047}', '\u{2049}',
    '\u{2CFA}', '\u{2CFB}', '\u{2E2E}', '\u{A60F}', '\u{A6F7}', '\u{FE56}', '\u{FF1F}',
];

#[must_use]
pub fn is_blank(c: char) -> bool { in_class(c, BLANK_RANGES) }

#[must_use]
pub fn is_new_line(c: char) -> bool { in_class(c, NEW_LINE_RANGES) }

#[must_use]
pub fn is_new_paragraph(c: char) -> bool { in_class(c, NEW_PARAGRAPH_RANGES) }

/// Characters a line-bound `.` refuses to match.
#[must_use]
pub fn is_line_terminator(c: char) -> bool { matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') }

#[must_use]
pub fn is_sentence_end(c: char) -> bool { SENTENCE_END.contains(&c) }

/// True when `token` holds nothing but blanks and line or paragraph breaks.
/// Such tokens never serve as unique anchors.
#[must_use]
pub fn is_blank_only(token: &str) -> bool {
    token
        .chars()
        .all(|c| is_blank(c) || is_new_line(c) || is_new_paragraph(c))
}

/// Gap sliding stops at tokens ending in a line or paragraph break.
#[must_use]
pub fn ends_with_break(token: &str) -> bool {
    token
        .chars()
        .next_back()
        .is_some_and(|c| is_new_line(c) || is_new_paragraph(c))
}

/// Gap sliding prefers word borders, tokens ending in a blank.
#[must_use]
pub fn ends_with_blank(token: &str) -> bool { token.chars().next_back().is_some_and(is_blank) }

/// Number of real words in `text`.
#[must_use]
pub fn word_count(text: &str) -> usize { COUNT_WORDS.find_iter(text).count() }

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(" \t\u{3000}", true; "blanks")]
    #[test_case("\n\r\n", true; "line breaks")]
    #[test_case("\u{2029}", true; "paragraph separator")]
    #[test_case(" a ", false; "word between blanks")]
    #[test_case("", true; "empty")]
    fn test_is_blank_only(token: &str, expected: bool) {
        assert_eq!(is_blank_only(token), expected);
    }

    #[test]
    fn test_slide_classes() {
        assert!(ends_with_break("word\n"));
        assert!(!ends_with_break("\nword"));
        assert!(ends_with_blank("word "));
        assert!(!ends_with_blank("word"));
        assert!(!ends_with_blank(""));
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("It's a dog's life, isn't it?"), 6);
        assert_eq!(word_count("  ... !!"), 0);
        assert_eq!(word_count("naïve façade"), 2);
    }

    #[test]
    fn test_chunks_are_counted() {
        let chunks = COUNT_CHUNKS
            .find_iter("See [[Main Page|home]] and {{cite web}} at https://example.org/x.")
            .map(|m| m.as_str())
            .collect::<Vec<_>>();

        assert_eq!(
            chunks,
            vec!["[[Main Page|home]]", "{{cite web}}", "https://example.org/x."]
        );
    }
}
