//! Wiring between the live page and the [`Tracker`].
//!
//! Every registration is independent: one that fails (a bad selector, a
//! missing browser API) is logged and the rest still go in.

mod debounce;
mod listeners;
mod observers;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, NodeList};

use crate::analytics::GtagSink;
use crate::clock::BrowserClock;
use crate::tracker::{PageMetadata, Tracker};

pub use debounce::{BrowserScheduler, Debouncer, Scheduler};

pub type PageTracker = Tracker<GtagSink, BrowserClock>;
pub type SharedTracker = Rc<RefCell<PageTracker>>;

/// Register every observer against the current page.
pub fn install(tracker: &SharedTracker) {
    let registrations: [(&str, fn(&SharedTracker) -> Result<(), JsValue>); 18] = [
        ("visibility", listeners::visibility),
        ("unload", listeners::unload),
        ("scroll", listeners::scroll),
        ("link clicks", listeners::document_clicks),
        ("book clicks", listeners::book_clicks),
        ("navigation clicks", listeners::nav_clicks),
        ("featured project clicks", listeners::featured_project_clicks),
        ("video clicks", listeners::video_clicks),
        ("footer clicks", listeners::footer_clicks),
        ("copy", listeners::copy),
        ("context menu", listeners::context_menu),
        ("print", listeners::print),
        ("page show", listeners::page_show),
        ("orientation", listeners::orientation),
        ("sunset notices", observers::sunset_notices),
        ("sections", observers::sections),
        ("bio", observers::bio),
        ("rage clicks", listeners::rage_clicks),
    ];

    for (name, register) in registrations {
        if let Err(e) = register(tracker) {
            leptos::logging::warn!("Portfolio tracking: could not register {}: {:?}", name, e);
        }
    }
}

/// Snapshot of the page for the initial page view.
pub fn page_metadata() -> PageMetadata {
    let window = leptos::window();
    let document = leptos::document();
    let screen = window.screen().ok();
    let dimension = |v: Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).map(|v| v as i32).unwrap_or(0)
    };

    PageMetadata {
        title: document.title(),
        location: window.location().href().unwrap_or_default(),
        referrer: document.referrer(),
        screen_width: screen.as_ref().and_then(|s| s.width().ok()).unwrap_or(0),
        screen_height: screen.as_ref().and_then(|s| s.height().ok()).unwrap_or(0),
        viewport_width: dimension(window.inner_width()),
        viewport_height: dimension(window.inner_height()),
    }
}

/// Run `f` against the tracker unless a handler further up the stack
/// already holds it; in that case the event is dropped.
pub(crate) fn with_tracker(tracker: &SharedTracker, f: impl FnOnce(&mut PageTracker)) {
    match tracker.try_borrow_mut() {
        Ok(mut t) => f(&mut t),
        Err(_) => leptos::logging::warn!("Portfolio tracking: tracker busy, event dropped"),
    }
}

/// Attach `handler` for the lifetime of the page.
pub(crate) fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget(); // Listeners live as long as the page
    Ok(())
}

pub(crate) fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn select_all(selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(leptos::document().query_selector_all(selector)?))
}

pub(crate) fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

pub(crate) fn text_of(el: &Element) -> String {
    el.text_content().unwrap_or_default()
}

/// Whether the window exposes `name`, e.g. `IntersectionObserver`.
pub(crate) fn window_has(name: &str) -> bool {
    js_sys::Reflect::has(&leptos::window(), &JsValue::from_str(name)).unwrap_or(false)
}
