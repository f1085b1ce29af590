use std::collections::HashSet;
use std::hash::Hash;

use crate::clock::elapsed_seconds;

pub const DEFAULT_BIO_MIN_READ_MS: f64 = 3000.0;

/// One-shot `unseen -> seen` tracking, keyed by element identity.
#[derive(Clone, Debug)]
pub struct SeenOnce<K> {
    seen: HashSet<K>,
}

impl<K> Default for SeenOnce<K> {
    fn default() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }
}

impl<K: Hash + Eq> SeenOnce<K> {
    /// Returns true only on the first call for `key`.
    pub fn mark(&mut self, key: K) -> bool {
        self.seen.insert(key)
    }
}

/// Time spent with an element in view: `not-viewing` or `viewing-since-T`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DwellTimer {
    since: Option<f64>,
}

impl DwellTimer {
    /// Start timing unless a visit is already running.
    pub fn enter(&mut self, now_ms: f64) {
        if self.since.is_none() {
            self.since = Some(now_ms);
        }
    }

    /// End the current visit and return its length in ms.
    /// Leaving without having entered returns `None`.
    pub fn leave(&mut self, now_ms: f64) -> Option<f64> {
        self.since.take().map(|start| now_ms - start)
    }
}

/// Start of the current engagement stretch (page load or last re-show).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngagementTimer {
    started_at: f64,
}

impl EngagementTimer {
    pub fn new(now_ms: f64) -> Self {
        Self { started_at: now_ms }
    }

    pub fn reset(&mut self, now_ms: f64) {
        self.started_at = now_ms;
    }

    pub fn elapsed_seconds(&self, now_ms: f64) -> i64 {
        elapsed_seconds(self.started_at, now_ms)
    }
}
