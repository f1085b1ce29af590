use std::collections::BTreeSet;

pub const DEFAULT_SCROLL_MILESTONES: [u32; 6] = [10, 25, 50, 75, 90, 100];

/// Scroll depth as a whole percentage of the scrollable distance.
///
/// Returns `None` when the document does not scroll (viewport at least as
/// tall as the content) or the inputs produce a non-finite ratio.
pub fn scroll_percent(scroll_top: f64, scroll_height: f64, client_height: f64) -> Option<i64> {
    let doc_height = scroll_height - client_height;
    if doc_height.is_nan() || doc_height <= 0.0 {
        return None;
    }
    let ratio = scroll_top / doc_height * 100.0;
    if !ratio.is_finite() {
        return None;
    }
    Some((ratio + 0.5).floor() as i64)
}

/// Which scroll milestones have been reported during this page lifetime.
#[derive(Clone, Debug)]
pub struct ScrollMilestones {
    milestones: Vec<u32>,
    reported: BTreeSet<u32>,
    max_depth: i64,
}

impl Default for ScrollMilestones {
    fn default() -> Self {
        Self::new(&DEFAULT_SCROLL_MILESTONES)
    }
}

impl ScrollMilestones {
    pub fn new(milestones: &[u32]) -> Self {
        let mut milestones = milestones.to_vec();
        milestones.sort_unstable();
        milestones.dedup();
        Self {
            milestones,
            reported: BTreeSet::new(),
            max_depth: 0,
        }
    }

    /// Record a settled scroll position and return the milestones it newly
    /// crosses, ascending. Depths at or below the deepest one seen so far
    /// cannot cross anything new.
    pub fn observe(&mut self, percent: i64) -> Vec<u32> {
        if percent <= self.max_depth {
            return Vec::new();
        }
        self.max_depth = percent;

        let mut crossed = Vec::new();
        for &milestone in &self.milestones {
            if percent >= i64::from(milestone) && self.reported.insert(milestone) {
                crossed.push(milestone);
            }
        }
        crossed
    }
}
