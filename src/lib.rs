/// Language Pair Links - quick links for saved translation language pairs
/// Built with Rust + WASM + Yew

mod background;
mod content;
pub mod analytics;
pub mod chrome;
pub mod config;
pub mod controller;
pub mod error;
pub mod language_pair;
pub mod operations;
pub mod storage;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Inject the quick link bar into the translation page
#[wasm_bindgen]
pub fn start_content_script() {
    content::start(config::ContentConfig::default());
}

// Deliver a runtime message received by the background service worker
#[wasm_bindgen]
pub fn handle_runtime_message(message: JsValue) {
    background::handle_message(message);
}
