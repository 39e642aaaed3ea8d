mod app;
mod config;
mod logging;
mod session;
mod sheets;
mod storage;
mod types;
mod worker;

use leptos::*;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Missing document body is the one fatal condition: nothing to
    // mount into, so log and stop instead of panicking.
    let body_present = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .is_some();
    if !body_present {
        logging::error("No se pudieron inicializar elementos DOM");
        return;
    }

    worker::register();

    mount_to_body(app::App);
}
