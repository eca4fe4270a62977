/// Translates between byte offsets and char indices of one string.
///
/// Regex matches report byte offsets, while every length budget in the
/// clipping configuration counts Unicode scalar values.
#[derive(Debug, Clone)]
pub struct CharOffsets {
    boundaries: Vec<usize>,
}

impl CharOffsets {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let boundaries = text
            .char_indices()
            .map(|(index, _)| index)
            .chain(std::iter::once(text.len()))
            .collect();

        CharOffsets { boundaries }
    }

    /// Number of chars in the text.
    #[must_use]
    pub fn len(&self) -> usize { self.boundaries.len() - 1 }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Byte offset of the char at `char_index`, clamped to the text length.
    #[must_use]
    pub fn to_byte(&self, char_index: usize) -> usize {
        self.boundaries[char_index.min(self.len())]
    }

    /// Char index of the char boundary at or after `byte_index`.
    #[must_use]
    pub fn to_char(&self, byte_index: usize) -> usize {
        match self.boundaries.binary_search(&byte_index) {
            Ok(index) | Err(index) => index,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ascii_offsets_are_identity() {
        let offsets = CharOffsets::new("hello");
        assert_eq!(offsets.len(), 5);
        assert_eq!(offsets.to_byte(3), 3);
        assert_eq!(offsets.to_char(3), 3);
        assert_eq!(offsets.to_byte(10), 5);
    }

    #[test]
    fn test_multibyte_offsets() {
        let text = "aé→b";
        let offsets = CharOffsets::new(text);
        assert_eq!(offsets.len(), 4);
        assert_eq!(offsets.to_byte(2), 3);
        assert_eq!(offsets.to_byte(3), 6);
        assert_eq!(offsets.to_char(6), 3);
        assert_eq!(offsets.to_char(text.len()), 4);
        assert!(CharOffsets::new("").is_empty());
    }
}
