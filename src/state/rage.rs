use std::collections::HashMap;

pub const DEFAULT_RAGE_WINDOW_MS: f64 = 1000.0;
pub const DEFAULT_RAGE_THRESHOLD: u32 = 3;

/// Key identifying a clicked element: its id, else its class list, else its
/// tag name. Elements sharing classes share a key.
pub fn element_key(id: &str, class_name: &str, tag_name: &str) -> String {
    [id, class_name, tag_name]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ClickBurst {
    count: u32,
    window_start: f64,
}

/// Per-element click counters for rage-click detection.
#[derive(Clone, Debug)]
pub struct ClickTracker {
    window_ms: f64,
    threshold: u32,
    bursts: HashMap<String, ClickBurst>,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(DEFAULT_RAGE_WINDOW_MS, DEFAULT_RAGE_THRESHOLD)
    }
}

impl ClickTracker {
    pub fn new(window_ms: f64, threshold: u32) -> Self {
        Self {
            window_ms,
            threshold,
            bursts: HashMap::new(),
        }
    }

    /// Register a click on `key` at `now_ms`.
    ///
    /// A click continues the current burst while it lands inside the window
    /// opened by the burst's first click; otherwise a new burst starts at 1.
    /// Returns the burst's click count once it reaches the threshold, on
    /// every click from then on.
    ///
    /// The window does not slide with each click. Steady clicks about 700 ms
    /// apart keep restarting the burst and never fire, although each gap is
    /// under the window.
    pub fn click(&mut self, key: &str, now_ms: f64) -> Option<u32> {
        let window_ms = self.window_ms;
        let burst = self
            .bursts
            .entry(key.to_string())
            .and_modify(|b| {
                if now_ms - b.window_start < window_ms {
                    b.count += 1;
                } else {
                    b.count = 1;
                    b.window_start = now_ms;
                }
            })
            .or_insert(ClickBurst {
                count: 1,
                window_start: now_ms,
            });

        (burst.count >= self.threshold).then_some(burst.count)
    }
}
