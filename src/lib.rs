//! Glyph Rain core crate.
//!
//! Paints the falling glyph backdrop of the portfolio page and wires two small
//! flourishes: the typed-in role line and the Konami easter egg. The frame logic
//! (`GlyphRain`) is plain Rust drawing onto a `Surface`, so it runs and tests
//! natively; everything touching the DOM lives behind the exported functions below.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod konami;
mod logging;
pub mod rain;
pub mod rain_loop;
pub mod surface;
pub mod typing;

pub use config::RainConfig;
pub use error::RainError;
pub use konami::KonamiDetector;
pub use rain::GlyphRain;
pub use rain_loop::RainLoop;
pub use surface::{CanvasSurface, DrawOp, RecordingSurface, Surface};
pub use typing::Typewriter;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

thread_local! {
    static ACTIVE_RAIN: RefCell<Option<RainLoop>> = const { RefCell::new(None) };
}

fn window() -> Result<web_sys::Window, RainError> {
    web_sys::window().ok_or(RainError::NoWindow)
}

/// Mount (or remount) the single page-wide rain.
fn mount_rain(config: &RainConfig) -> Result<(), RainError> {
    let rain = RainLoop::mount(&window()?, config)?;
    if let Some(previous) = ACTIVE_RAIN.with(|cell| cell.replace(Some(rain))) {
        previous.unmount();
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Exports
// -----------------------------------------------------------------------------

/// Start the rain on `<canvas id=canvas_id>` with the default look.
#[wasm_bindgen]
pub fn start_matrix_rain(canvas_id: &str) -> Result<(), JsValue> {
    let config = RainConfig { canvas_id: canvas_id.to_string(), ..RainConfig::default() };
    mount_rain(&config)?;
    Ok(())
}

/// Start the rain from a JSON object of `RainConfig` fields; omitted fields use defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_matrix_rain_with_config(json: &str) -> Result<(), JsValue> {
    let config = RainConfig::from_json(json)?;
    mount_rain(&config)?;
    Ok(())
}

/// Stop the rain if one is running. Returns whether anything was stopped.
#[wasm_bindgen]
pub fn stop_matrix_rain() -> bool {
    match ACTIVE_RAIN.with(|cell| cell.borrow_mut().take()) {
        Some(rain) => {
            rain.unmount();
            true
        }
        None => false,
    }
}

#[wasm_bindgen]
pub fn start_typing_reveal(element_id: &str, delay_ms: i32, speed_ms: i32) -> Result<(), JsValue> {
    typing::start_reveal(&window()?, element_id, delay_ms, speed_ms)?;
    Ok(())
}

#[wasm_bindgen]
pub fn install_konami_listener() -> Result<(), JsValue> {
    konami::install(&window()?)?;
    Ok(())
}

/// Page-load hook: rain on the default canvas, role line reveal, easter egg.
#[wasm_bindgen]
pub fn start_portfolio() -> Result<(), JsValue> {
    let win = window()?;
    mount_rain(&RainConfig::default())?;
    typing::start_reveal(
        &win,
        "roleText",
        typing::DEFAULT_START_DELAY_MS,
        typing::DEFAULT_SPEED_MS,
    )?;
    konami::install(&win)?;
    tracing::info!("Hey there, fellow developer! Looking at the code? I like your style.");
    Ok(())
}
