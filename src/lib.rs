mod blocks;
mod char_refine;
mod config;
mod diff;
mod fragments;
mod matcher;
mod slide;
pub mod tokenizer;
mod utils;
mod version;

pub use config::{ClipConfig, ConfigError, DiffConfig};
pub use diff::{Diff, diff, diff_with_config};
pub use fragments::{Boundary, Fragment, FragmentKind};
pub use tokenizer::Level;
pub use utils::side::Side;

#[cfg(feature = "wasm")]
pub mod wasm;
