use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlAnchorElement, HtmlImageElement, PageTransitionEvent};

use super::{
    elements, event_element, listen, select_all, text_of, window_has, with_tracker,
    BrowserScheduler, Debouncer, SharedTracker,
};
use crate::events::PrintAction;
use crate::tracker::{ClickTarget, ContextTarget, LinkClick, ScrollMetrics};

pub fn visibility(tracker: &SharedTracker) -> Result<(), JsValue> {
    let tracker = tracker.clone();
    listen(&leptos::document(), "visibilitychange", move |_| {
        let hidden = leptos::document().hidden();
        with_tracker(&tracker, |t| t.visibility_changed(hidden));
    })
}

pub fn unload(tracker: &SharedTracker) -> Result<(), JsValue> {
    let tracker = tracker.clone();
    listen(&leptos::window(), "beforeunload", move |_| {
        with_tracker(&tracker, |t| t.unload());
    })
}

fn scroll_metrics() -> ScrollMetrics {
    let window = leptos::window();
    let root = leptos::document().document_element();
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let scroll_top = match (&root, scroll_y) {
        (Some(root), y) if y == 0.0 => f64::from(root.scroll_top()),
        (_, y) => y,
    };
    ScrollMetrics {
        scroll_top,
        scroll_height: root.as_ref().map(|r| f64::from(r.scroll_height())).unwrap_or(0.0),
        client_height: root.as_ref().map(|r| f64::from(r.client_height())).unwrap_or(0.0),
    }
}

pub fn scroll(tracker: &SharedTracker) -> Result<(), JsValue> {
    let delay = Duration::from_millis(tracker.borrow().config().scroll_debounce_ms);
    let debouncer = Rc::new(Debouncer::new(BrowserScheduler, delay));
    let tracker = tracker.clone();
    listen(&leptos::window(), "scroll", move |_| {
        let tracker = tracker.clone();
        debouncer.trigger(move || {
            let metrics = scroll_metrics();
            with_tracker(&tracker, |t| t.scroll_settled(metrics));
        });
    })
}

pub fn document_clicks(tracker: &SharedTracker) -> Result<(), JsValue> {
    let sunset_selector = tracker.borrow().config().selectors.sunset_notice.clone();
    let tracker = tracker.clone();
    listen(&leptos::document(), "click", move |event| {
        let Some(anchor) = event_element(&event)
            .and_then(|el| el.closest("a").ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
        else {
            return;
        };
        let link = LinkClick {
            href: anchor.get_attribute("href"),
            text: text_of(&anchor),
            hostname: anchor.hostname(),
            page_hostname: leptos::window().location().hostname().unwrap_or_default(),
            target: anchor.target(),
            in_sunset_notice: matches!(anchor.closest(&sunset_selector), Ok(Some(_))),
        };
        with_tracker(&tracker, |t| t.link_clicked(link));
    })
}

/// Registered after the link listener so a click reports the link first.
pub fn rage_clicks(tracker: &SharedTracker) -> Result<(), JsValue> {
    let selector = tracker.borrow().config().selectors.rage_click_target.clone();
    let tracker = tracker.clone();
    listen(&leptos::document(), "click", move |event| {
        let Some(el) = event_element(&event).and_then(|el| el.closest(&selector).ok().flatten())
        else {
            return;
        };
        let target = ClickTarget {
            id: el.id(),
            class_name: el.class_name(),
            tag_name: el.tag_name(),
        };
        with_tracker(&tracker, |t| t.rage_candidate_clicked(target));
    })
}

/// Attach a click handler to every element matching `selector`.
fn on_each_click<F>(selector: &str, tracker: &SharedTracker, handler: F) -> Result<(), JsValue>
where
    F: Fn(&SharedTracker, &Element) + Clone + 'static,
{
    for el in select_all(selector)? {
        let tracker = tracker.clone();
        let handler = handler.clone();
        let target = el.clone();
        listen(&el, "click", move |_| handler(&tracker, &target))?;
    }
    Ok(())
}

/// Resolved `href` of an anchor, empty for anything else.
fn resolved_href(el: &Element) -> String {
    el.dyn_ref::<HtmlAnchorElement>()
        .map(|a| a.href())
        .unwrap_or_default()
}

pub fn book_clicks(tracker: &SharedTracker) -> Result<(), JsValue> {
    let selector = tracker.borrow().config().selectors.book_link.clone();
    on_each_click(&selector, tracker, |tracker, link| {
        let alt = link
            .query_selector("img")
            .ok()
            .flatten()
            .and_then(|img| img.dyn_into::<HtmlImageElement>().ok())
            .map(|img| img.alt());
        with_tracker(tracker, |t| t.book_clicked(alt));
    })
}

pub fn nav_clicks(tracker: &SharedTracker) -> Result<(), JsValue> {
    let selector = tracker.borrow().config().selectors.nav_link.clone();
    on_each_click(&selector, tracker, |tracker, link| {
        let text = text_of(link);
        let href = link.get_attribute("href");
        with_tracker(tracker, |t| t.nav_clicked(&text, href));
    })
}

pub fn featured_project_clicks(tracker: &SharedTracker) -> Result<(), JsValue> {
    let (project_selector, screenshot_selector, caption_selector) = {
        let t = tracker.borrow();
        let s = &t.config().selectors;
        (
            s.featured_project.clone(),
            s.screenshot_link.clone(),
            s.screenshot_caption.clone(),
        )
    };
    let Some(project) = leptos::document().query_selector(&project_selector)? else {
        return Ok(());
    };

    for link in elements(project.query_selector_all("a")?) {
        let tracker = tracker.clone();
        let target = link.clone();
        listen(&link, "click", move |_| {
            let text = text_of(&target);
            let url = resolved_href(&target);
            with_tracker(&tracker, |t| t.featured_project_clicked(&text, url));
        })?;
    }

    for (index, link) in elements(project.query_selector_all(&screenshot_selector)?)
        .into_iter()
        .enumerate()
    {
        let tracker = tracker.clone();
        let target = link.clone();
        let caption_selector = caption_selector.clone();
        listen(&link, "click", move |_| {
            let caption = target
                .query_selector(&caption_selector)
                .ok()
                .flatten()
                .and_then(|c| c.text_content());
            let url = resolved_href(&target);
            with_tracker(&tracker, |t| t.screenshot_clicked(caption, index, url));
        })?;
    }
    Ok(())
}

pub fn video_clicks(tracker: &SharedTracker) -> Result<(), JsValue> {
    let selector = tracker.borrow().config().selectors.video_link.clone();
    on_each_click(&selector, tracker, |tracker, link| {
        let text = text_of(link);
        let url = resolved_href(link);
        with_tracker(tracker, |t| t.video_clicked(&text, url));
    })
}

pub fn footer_clicks(tracker: &SharedTracker) -> Result<(), JsValue> {
    let selector = tracker.borrow().config().selectors.footer_link.clone();
    on_each_click(&selector, tracker, |tracker, link| {
        let text = text_of(link);
        let url = resolved_href(link);
        with_tracker(tracker, |t| t.footer_clicked(&text, url));
    })
}

pub fn copy(tracker: &SharedTracker) -> Result<(), JsValue> {
    let tracker = tracker.clone();
    listen(&leptos::document(), "copy", move |_| {
        let selection: String = match leptos::window().get_selection() {
            Ok(Some(selection)) => selection.to_string().into(),
            _ => return,
        };
        with_tracker(&tracker, |t| t.content_copied(&selection));
    })
}

pub fn context_menu(tracker: &SharedTracker) -> Result<(), JsValue> {
    let tracker = tracker.clone();
    listen(&leptos::document(), "contextmenu", move |event| {
        let Some(el) = event_element(&event) else {
            return;
        };
        let target = ContextTarget {
            tag_name: el.tag_name(),
            inside_image: matches!(el.closest("img"), Ok(Some(_))),
            inside_link: matches!(el.closest("a"), Ok(Some(_))),
        };
        with_tracker(&tracker, |t| t.context_menu_opened(target));
    })
}

pub fn print(tracker: &SharedTracker) -> Result<(), JsValue> {
    let window = leptos::window();
    for (event, action) in [
        ("beforeprint", PrintAction::Initiated),
        ("afterprint", PrintAction::Completed),
    ] {
        let tracker = tracker.clone();
        listen(&window, event, move |_| {
            with_tracker(&tracker, |t| t.print_phase(action));
        })?;
    }
    Ok(())
}

pub fn page_show(tracker: &SharedTracker) -> Result<(), JsValue> {
    let tracker = tracker.clone();
    listen(&leptos::window(), "pageshow", move |event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .map(|e| e.persisted())
            .unwrap_or(false);
        with_tracker(&tracker, |t| t.page_shown(persisted));
    })
}

/// Only on devices exposing `window.orientation`.
pub fn orientation(tracker: &SharedTracker) -> Result<(), JsValue> {
    if !window_has("orientation") {
        return Ok(());
    }
    let tracker = tracker.clone();
    listen(&leptos::window(), "orientationchange", move |_| {
        let angle = js_sys::Reflect::get(&leptos::window(), &JsValue::from_str("orientation"))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as i32;
        with_tracker(&tracker, |t| t.orientation_changed(angle));
    })
}
