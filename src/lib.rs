//! Princess Runner core crate.
//!
//! An endless runner rendered to a `<canvas>`: the princess jumps over obstacles that
//! hang from the top or stand on the ground, collects crowns for bonus points and
//! tries to beat the stored best score. The game rules live in [`runner`] and have no
//! browser dependencies; [`web`] mounts them on a page and exports the JS API
//! (`init_game` and the returned `GameHandle`'s `start`/`stop`/`reset`/`jump`).

use wasm_bindgen::prelude::*;

pub mod character;
pub mod config;
pub mod error;
pub mod runner;
pub mod storage;
pub mod web;

pub use config::{GameConfig, LayerSpec};
pub use error::GameError;
pub use runner::{GameLoop, RunState, TickOutcome};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    // Already installed when a host calls the start hook twice.
    console_log::init_with_level(level).ok();
}
