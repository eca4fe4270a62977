pub(crate) mod char_offsets;
pub(crate) mod common_affix_len;
pub mod side;
