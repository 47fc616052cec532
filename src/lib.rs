#[macro_use]
mod browser;
pub mod engine;
pub mod game;
pub mod geometry;
pub mod sim;
pub mod sprite;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

/// Main entry for the WebAssembly module:
/// - installs the panic hook
/// - spawns the game loop on the local task queue
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // readable panic messages while debugging in the browser
    console_error_panic_hook::set_once();

    browser::spawn_local(async move {
        if let Err(err) = engine::GameLoop::start(game::DesertRush::new()).await {
            // no window/canvas/context means no session at all
            log!("Failed to start the game : {:#?}", err);
        }
    });

    Ok(())
}
