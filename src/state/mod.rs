mod milestones;
mod rage;
mod visibility;

pub use milestones::{scroll_percent, ScrollMilestones, DEFAULT_SCROLL_MILESTONES};
pub use rage::{element_key, ClickTracker, DEFAULT_RAGE_THRESHOLD, DEFAULT_RAGE_WINDOW_MS};
pub use visibility::{DwellTimer, EngagementTimer, SeenOnce, DEFAULT_BIO_MIN_READ_MS};
