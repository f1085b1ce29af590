/// Source of wall-clock time in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// `Date.now()` from the host page.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Round elapsed milliseconds to whole seconds, halves rounding up like
/// the browser's `Math.round`.
pub fn elapsed_seconds(start_ms: f64, now_ms: f64) -> i64 {
    ((now_ms - start_ms) / 1000.0 + 0.5).floor() as i64
}
