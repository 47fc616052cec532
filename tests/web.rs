//! Browser smoke test; runs under `wasm-pack test` only.

#![cfg(target_arch = "wasm32")]

use desert_rush::sim::{GameState, InputSnapshot, Session};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn session_simulates_inside_the_browser() {
    let start = js_sys::Date::now();
    let mut session = Session::new();
    session.state = GameState::Playing;
    for _ in 0..60 {
        session.step(&InputSnapshot::default());
    }
    assert_eq!(session.state, GameState::Playing);
    assert!(js_sys::Date::now() >= start);
}
