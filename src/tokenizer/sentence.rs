use std::ops::Range;

use super::patterns::{is_blank, is_line_terminator, is_sentence_end};

/// Finds sentence spans: a non-blank start, the shortest run of text on the
/// same line up to a run of sentence punctuation, and that punctuation run
/// followed by a blank or the end of the text.
///
/// The start itself may be a line break, which attaches a leading newline
/// to the sentence following it. Byte ranges are returned in order and never
/// overlap.
pub fn sentence_spans(text: &str) -> Vec<Range<usize>> {
    let chars = text.char_indices().collect::<Vec<_>>();
    let byte_at = |index: usize| chars.get(index).map_or(text.len(), |&(byte, _)| byte);

    let mut spans = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        if is_blank(chars[start].1) {
            start += 1;
            continue;
        }

        let mut cursor = start + 1;
        let mut end = None;
        while cursor < chars.len() {
            let c = chars[cursor].1;
            if is_line_terminator(c) {
                break;
            }

            if is_sentence_end(c) {
                let mut run_end = cursor;
                while run_end < chars.len() && is_sentence_end(chars[run_end].1) {
                    run_end += 1;
                }

                if run_end == chars.len() || is_blank(chars[run_end].1) {
                    end = Some(run_end);
                    break;
                }
                cursor = run_end;
                continue;
            }

            cursor += 1;
        }

        match end {
            Some(end) => {
                spans.push(byte_at(start)..byte_at(end));
                start = end;
            }
            // every start before `cursor` fails the same way
            None => start = cursor,
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        sentence_spans(text)
            .into_iter()
            .map(|range| &text[range])
            .collect()
    }

    #[test]
    fn test_simple_sentences() {
        assert_eq!(
            sentences("One fish. Two fish! Red fish?"),
            vec!["One fish.", "Two fish!", "Red fish?"]
        );
    }

    #[test]
    fn test_punctuation_inside_words_does_not_end_sentence() {
        assert_eq!(
            sentences("Version 1.2 is out... Get it now"),
            vec!["Version 1.2 is out..."]
        );
    }

    #[test]
    fn test_sentences_do_not_cross_lines() {
        assert_eq!(
            sentences("no end here\nFinal words."),
            vec!["\nFinal words."]
        );
    }

    #[test]
    fn test_unicode_full_stop() {
        assert_eq!(sentences("你好。 再见。"), vec!["你好。", "再见。"]);
    }

    #[test]
    fn test_no_sentences() {
        assert_eq!(sentences(""), Vec::<&str>::new());
        assert_eq!(sentences("   "), Vec::<&str>::new());
        assert_eq!(sentences("."), Vec::<&str>::new());
    }
}
