pub mod analytics;
pub mod clock;
pub mod config;
pub mod dom;
pub mod events;
pub mod links;
pub mod state;
pub mod tracker;


use std::cell::RefCell;
use std::rc::Rc;

use analytics::GtagSink;
use clock::BrowserClock;
use config::load_config;
use tracker::Tracker;
use wasm_bindgen::prelude::*;

/// Instrument the page. Runs once when the module is loaded, after the
/// gtag snippet in the page head.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = load_config();
    let sink = GtagSink::new(config.log_events);
    let tracker = Rc::new(RefCell::new(Tracker::new(config, sink, BrowserClock)));

    dom::install(&tracker);
    tracker.borrow().page_view(dom::page_metadata());

    leptos::logging::log!("Portfolio GA4 tracking initialized");
}
