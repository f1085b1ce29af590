use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = gtag, catch)]
    fn gtag_event(command: &str, event_name: &str, params: JsValue) -> Result<(), JsValue>;
}

/// Destination for analytics events.
///
/// `record` never fails from the caller's point of view: an unavailable
/// backend means the event is dropped.
pub trait AnalyticsSink {
    fn record(&self, event_name: &str, params: &Map<String, Value>);
}

/// Google Analytics 4 through the page's global `gtag` function.
#[derive(Clone, Copy, Debug)]
pub struct GtagSink {
    log_events: bool,
}

impl GtagSink {
    pub fn new(log_events: bool) -> Self {
        Self { log_events }
    }
}

/// Whether `gtag` is loaded and callable. It may be missing entirely
/// (blocked by an adblocker) or replaced by a non-function stub.
fn gtag_available() -> bool {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("gtag"))
        .map(|f| f.is_function())
        .unwrap_or(false)
}

impl AnalyticsSink for GtagSink {
    fn record(&self, event_name: &str, params: &Map<String, Value>) {
        if !gtag_available() {
            return;
        }

        let json = match serde_json::to_string(params) {
            Ok(j) => j,
            Err(e) => {
                leptos::logging::warn!("GA4: failed to serialize {} params: {}", event_name, e);
                return;
            }
        };
        let js_params = match js_sys::JSON::parse(&json) {
            Ok(v) => v,
            Err(e) => {
                leptos::logging::warn!("GA4: failed to convert {} params: {:?}", event_name, e);
                return;
            }
        };

        if let Err(e) = gtag_event("event", event_name, js_params) {
            leptos::logging::warn!("GA4: gtag threw while sending {}: {:?}", event_name, e);
            return;
        }
        if self.log_events {
            leptos::logging::log!("GA4 Event: {} {}", event_name, json);
        }
    }
}
