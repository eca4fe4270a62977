//! Expose the `movediff` crate's functionality to WebAssembly.
use wasm_bindgen::prelude::*;

use crate::DiffConfig;

mod types;

pub use types::JsFragment;

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc<'_> = wee_alloc::WeeAlloc::INIT;

/// WASM wrapper around `crate::diff` with the default configuration.
#[wasm_bindgen(js_name = diff)]
#[must_use]
pub fn diff(old: &str, new: &str) -> Vec<JsFragment> {
    set_panic_hook();

    into_js(crate::diff(old, new))
}

/// WASM wrapper around `crate::diff_with_config` exposing the most common
/// switches. Clipping and matching budgets keep their defaults.
#[wasm_bindgen(js_name = diffWithOptions)]
#[must_use]
pub fn diff_with_options(
    old: &str,
    new: &str,
    full_diff: bool,
    show_block_moves: bool,
    char_diff: bool,
) -> Vec<JsFragment> {
    set_panic_hook();
    let config = DiffConfig::default()
        .with_full_diff(full_diff)
        .with_show_block_moves(show_block_moves)
        .with_char_diff(char_diff);

    into_js(crate::diff_with_config(old, new, &config))
}

fn into_js(diff: crate::Diff) -> Vec<JsFragment> {
    diff.into_fragments()
        .into_iter()
        .map(std::convert::Into::into)
        .collect()
}

fn set_panic_hook() {
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
