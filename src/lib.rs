//! Level Quiz core crate.
//!
//! A multiple-choice quiz split into levels. Each question runs a countdown;
//! a perfect level unlocks the next one and plays a confetti burst. The quiz
//! state machine and the confetti engine are plain Rust and run natively under
//! `cargo test`; the browser host (DOM, timers, canvas) is only compiled for
//! `wasm32`.

use wasm_bindgen::prelude::*;

pub mod confetti;
pub mod config;
mod error;
pub mod quiz;

#[cfg(target_arch = "wasm32")]
mod web;

pub use config::{ConfettiConfig, GameConfig};
pub use error::QuizError;
pub use quiz::{Level, Outcome, Phase, Question, Quiz, Session, builtin_levels};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    web::init_tracing();
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Mount the quiz into the page with the built-in levels and default timings.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(GameConfig::default(), builtin_levels())
}

/// Like [`start_game`] but with JSON overrides. Either argument may be empty
/// to keep the built-in value.
#[cfg(all(target_arch = "wasm32", feature = "serde_json"))]
#[wasm_bindgen]
pub fn start_game_with(config_json: &str, levels_json: &str) -> Result<(), JsValue> {
    use web::to_js;
    let config = if config_json.trim().is_empty() {
        GameConfig::default()
    } else {
        GameConfig::from_json(config_json).map_err(to_js)?
    };
    let levels = if levels_json.trim().is_empty() {
        builtin_levels()
    } else {
        quiz::levels_from_json(levels_json).map_err(to_js)?
    };
    web::start(config, levels)
}
