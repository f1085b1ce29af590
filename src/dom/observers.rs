use wasm_bindgen::prelude::*;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Node,
};

use super::{select_all, text_of, window_has, with_tracker, SharedTracker};
use crate::tracker::ElementSlot;

/// What an observer saw of one element.
#[derive(Clone, Copy)]
struct Visibility {
    intersecting: bool,
    /// Share of the element in view, zero when not intersecting.
    ratio: f64,
}

/// Observe `targets` at the given visibility ratio. `on_change` receives the
/// slot of the element within `targets`, what is visible of it, and the
/// element itself.
fn observe<F>(targets: Vec<Element>, ratio: f64, mut on_change: F) -> Result<(), JsValue>
where
    F: FnMut(ElementSlot, Visibility, &Element) + 'static,
{
    let slots = targets.clone();
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let node: &Node = &target;
            let Some(slot) = slots.iter().position(|el| el.is_same_node(Some(node))) else {
                continue;
            };
            let intersecting = entry.is_intersecting();
            let visibility = Visibility {
                intersecting,
                ratio: if intersecting { entry.intersection_ratio() } else { 0.0 },
            };
            on_change(slot, visibility, &target);
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(ratio));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for el in &targets {
        observer.observe(el);
    }
    callback.forget(); // Observers live as long as the page
    Ok(())
}

/// Elements to observe, or nothing when the browser lacks
/// `IntersectionObserver` or the page has no matching elements.
fn observable(selector: &str) -> Result<Vec<Element>, JsValue> {
    if !window_has("IntersectionObserver") {
        return Ok(Vec::new());
    }
    select_all(selector)
}

pub fn sunset_notices(tracker: &SharedTracker) -> Result<(), JsValue> {
    let (selector, ratio) = {
        let t = tracker.borrow();
        (t.config().selectors.sunset_notice.clone(), t.config().sunset_visible_ratio)
    };
    let notices = observable(&selector)?;
    if notices.is_empty() {
        return Ok(());
    }
    let tracker = tracker.clone();
    observe(notices, ratio, move |slot, visibility, el| {
        let text = text_of(el);
        with_tracker(&tracker, |t| t.sunset_notice_intersected(slot, visibility.ratio, &text));
    })
}

pub fn sections(tracker: &SharedTracker) -> Result<(), JsValue> {
    let (selector, heading_selector, ratio) = {
        let t = tracker.borrow();
        let config = t.config();
        (
            config.selectors.tracked_sections.clone(),
            config.selectors.section_heading.clone(),
            config.section_visible_ratio,
        )
    };
    let sections = observable(&selector)?;
    if sections.is_empty() {
        return Ok(());
    }
    let tracker = tracker.clone();
    observe(sections, ratio, move |slot, visibility, el| {
        let heading = if visibility.ratio >= ratio {
            el.query_selector(&heading_selector)
                .ok()
                .flatten()
                .and_then(|h| h.text_content())
        } else {
            None
        };
        with_tracker(&tracker, |t| t.section_intersected(slot, visibility.ratio, heading));
    })
}

pub fn bio(tracker: &SharedTracker) -> Result<(), JsValue> {
    let (selector, ratio) = {
        let t = tracker.borrow();
        (t.config().selectors.bio.clone(), t.config().bio_visible_ratio)
    };
    if !window_has("IntersectionObserver") {
        return Ok(());
    }
    let Some(bio) = leptos::document().query_selector(&selector)? else {
        return Ok(());
    };
    let tracker = tracker.clone();
    observe(vec![bio], ratio, move |_, visibility, _| {
        with_tracker(&tracker, |t| t.bio_intersected(visibility.intersecting));
    })
}
