#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options of one diff computation.
///
/// Every field has a default, so partial configuration documents can be
/// deserialized when the `serde` feature is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiffConfig {
    /// Keep long unchanged passages instead of clipping them.
    pub full_diff: bool,
    /// Emit moved blocks with their marks. When disabled, moves are
    /// rendered as a deletion at the old and an insertion at the new place.
    pub show_block_moves: bool,
    /// Refine similar words down to characters.
    pub char_diff: bool,
    /// Repeat each matching pass once with a fresh symbol table.
    pub repeated_diff: bool,
    /// Refine unresolved gaps by recursive matching.
    pub recursive_diff: bool,
    /// Maximum recursion depth of gap refinement.
    pub recursion_max: usize,
    /// Turn short, non-unique matches back into changes.
    pub unlink_blocks: bool,
    /// Maximum number of unlinking cycles.
    pub unlink_max: usize,
    /// Minimum number of real words for a match to count as significant.
    pub block_min_length: usize,
    pub clip: ClipConfig,
}

impl Default for DiffConfig {
    fn default() -> Self {
        DiffConfig {
            full_diff: false,
            show_block_moves: true,
            char_diff: true,
            repeated_diff: true,
            recursive_diff: true,
            recursion_max: 10,
            unlink_blocks: true,
            unlink_max: 5,
            block_min_length: 3,
            clip: ClipConfig::default(),
        }
    }
}

impl DiffConfig {
    #[must_use]
    pub fn with_full_diff(mut self, full_diff: bool) -> Self {
        self.full_diff = full_diff;
        self
    }

    #[must_use]
    pub fn with_show_block_moves(mut self, show_block_moves: bool) -> Self {
        self.show_block_moves = show_block_moves;
        self
    }

    #[must_use]
    pub fn with_char_diff(mut self, char_diff: bool) -> Self {
        self.char_diff = char_diff;
        self
    }

    #[must_use]
    pub fn with_repeated_diff(mut self, repeated_diff: bool) -> Self {
        self.repeated_diff = repeated_diff;
        self
    }

    #[must_use]
    pub fn with_recursive_diff(mut self, recursive_diff: bool) -> Self {
        self.recursive_diff = recursive_diff;
        self
    }

    #[must_use]
    pub fn with_recursion_max(mut self, recursion_max: usize) -> Self {
        self.recursion_max = recursion_max;
        self
    }

    #[must_use]
    pub fn with_unlink_blocks(mut self, unlink_blocks: bool) -> Self {
        self.unlink_blocks = unlink_blocks;
        self
    }

    #[must_use]
    pub fn with_unlink_max(mut self, unlink_max: usize) -> Self {
        self.unlink_max = unlink_max;
        self
    }

    #[must_use]
    pub fn with_block_min_length(mut self, block_min_length: usize) -> Self {
        self.block_min_length = block_min_length;
        self
    }

    #[must_use]
    pub fn with_clip(mut self, clip: ClipConfig) -> Self {
        self.clip = clip;
        self
    }

    /// Checks the configuration for contradicting values.
    ///
    /// # Errors
    ///
    /// Returns an error if a minimum clipping distance exceeds its maximum,
    /// or if unlinking is enabled with no allowed cycles.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unlink_blocks && self.unlink_max == 0 {
            return Err(ConfigError::NoUnlinkCycles);
        }
        self.clip.validate()
    }
}

/// Distances, in characters, that control where long unchanged passages are
/// cut when the diff is clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClipConfig {
    pub heading_left: usize,
    pub heading_right: usize,
    pub paragraph_left_max: usize,
    pub paragraph_left_min: usize,
    pub paragraph_right_max: usize,
    pub paragraph_right_min: usize,
    pub line_left_max: usize,
    pub line_left_min: usize,
    pub line_right_max: usize,
    pub line_right_min: usize,
    pub blank_left_max: usize,
    pub blank_left_min: usize,
    pub blank_right_max: usize,
    pub blank_right_min: usize,
    pub chars_left: usize,
    pub chars_right: usize,
    /// Number of lines kept before the left cut at most.
    pub lines_left_max: usize,
    /// Number of lines kept after the right cut at most.
    pub lines_right_max: usize,
    /// Passages with fewer omitted lines than this are not clipped.
    pub skip_lines: usize,
    /// Passages with fewer omitted characters than this are not clipped.
    pub skip_chars: usize,
}

impl Default for ClipConfig {
    fn default() -> Self {
        ClipConfig {
            heading_left: 1500,
            heading_right: 1500,
            paragraph_left_max: 1500,
            paragraph_left_min: 500,
            paragraph_right_max: 1500,
            paragraph_right_min: 500,
            line_left_max: 1000,
            line_left_min: 500,
            line_right_max: 1000,
            line_right_min: 500,
            blank_left_max: 1000,
            blank_left_min: 500,
            blank_right_max: 1000,
            blank_right_min: 500,
            chars_left: 500,
            chars_right: 500,
            lines_left_max: 10,
            lines_right_max: 10,
            skip_lines: 5,
            skip_chars: 1000,
        }
    }
}

impl ClipConfig {
    /// Shortest left distance at which any cut may happen.
    #[must_use]
    pub(crate) fn min_left(&self) -> usize {
        [
            self.heading_left,
            self.paragraph_left_min,
            self.line_left_min,
            self.blank_left_min,
            self.chars_left,
        ]
        .into_iter()
        .min()
        .unwrap_or_default()
    }

    /// Shortest right distance at which any cut may happen.
    #[must_use]
    pub(crate) fn min_right(&self) -> usize {
        [
            self.heading_right,
            self.paragraph_right_min,
            self.line_right_min,
            self.blank_right_min,
            self.chars_right,
        ]
        .into_iter()
        .min()
        .unwrap_or_default()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let budgets = [
            ("paragraph_left", self.paragraph_left_min, self.paragraph_left_max),
            ("paragraph_right", self.paragraph_right_min, self.paragraph_right_max),
            ("line_left", self.line_left_min, self.line_left_max),
            ("line_right", self.line_right_min, self.line_right_max),
            ("blank_left", self.blank_left_min, self.blank_left_max),
            ("blank_right", self.blank_right_min, self.blank_right_max),
        ];

        for (budget, min, max) in budgets {
            if min > max {
                return Err(ConfigError::InvertedBudget { budget, min, max });
            }
        }

        Ok(())
    }
}

/// Error type for contradicting configuration values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A clipping budget whose minimum distance is larger than its maximum
    #[error(
        "Invalid clip configuration: {budget} allows cuts between {min} and {max} characters, \
         but the minimum must not exceed the maximum"
    )]
    InvertedBudget {
        /// Name of the budget, e.g. `line_left`
        budget: &'static str,
        /// The configured minimum distance
        min: usize,
        /// The configured maximum distance
        max: usize,
    },

    /// Unlinking is enabled but may never run
    #[error("Invalid configuration: unlink_blocks is enabled but unlink_max is 0")]
    NoUnlinkCycles,
}
