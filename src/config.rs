use serde::Deserialize;

use crate::state::{
    DEFAULT_BIO_MIN_READ_MS, DEFAULT_RAGE_THRESHOLD, DEFAULT_RAGE_WINDOW_MS,
    DEFAULT_SCROLL_MILESTONES,
};

/// Id of the optional inline JSON block that overrides the defaults:
/// `<script type="application/json" id="portfolio-tracking-config">`.
pub const CONFIG_ELEMENT_ID: &str = "portfolio-tracking-config";

/// CSS selectors for the page regions each observer attaches to.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Selectors {
    pub sunset_notice: String,
    pub tracked_sections: String,
    pub section_heading: String,
    pub book_link: String,
    pub nav_link: String,
    pub featured_project: String,
    pub screenshot_link: String,
    pub screenshot_caption: String,
    pub bio: String,
    pub video_link: String,
    pub footer_link: String,
    pub rage_click_target: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            sunset_notice: ".sunset-notice".to_string(),
            tracked_sections: ".portfolio-section, .featured-project, .portfolio-bio, .books-section"
                .to_string(),
            section_heading: "h2, h3".to_string(),
            book_link: ".book-item a".to_string(),
            nav_link: "nav a, .nav-items a".to_string(),
            featured_project: ".featured-project".to_string(),
            screenshot_link: ".screenshot-item a".to_string(),
            screenshot_caption: ".screenshot-caption".to_string(),
            bio: ".portfolio-bio".to_string(),
            video_link: r#"a[href*="youtube.com"], a[href*="youtu.be"]"#.to_string(),
            footer_link: "footer a".to_string(),
            rage_click_target: "a, button, .book-item, .screenshot-item".to_string(),
        }
    }
}

/// Tunables for the page instrumentation. Event names and attribute keys
/// are fixed and deliberately absent here.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TrackingConfig {
    #[serde(default = "default_scroll_milestones")]
    pub scroll_milestones: Vec<u32>,
    #[serde(default = "default_scroll_debounce_ms")]
    pub scroll_debounce_ms: u64,
    #[serde(default = "default_rage_click_window_ms")]
    pub rage_click_window_ms: f64,
    #[serde(default = "default_rage_click_threshold")]
    pub rage_click_threshold: u32,
    #[serde(default = "default_bio_min_read_ms")]
    pub bio_min_read_ms: f64,
    #[serde(default = "default_sunset_visible_ratio")]
    pub sunset_visible_ratio: f64,
    #[serde(default = "default_section_visible_ratio")]
    pub section_visible_ratio: f64,
    #[serde(default = "default_bio_visible_ratio")]
    pub bio_visible_ratio: f64,
    #[serde(default = "default_log_events")]
    pub log_events: bool,
    #[serde(default)]
    pub selectors: Selectors,
}

fn default_scroll_milestones() -> Vec<u32> {
    DEFAULT_SCROLL_MILESTONES.to_vec()
}

fn default_scroll_debounce_ms() -> u64 {
    100
}

fn default_rage_click_window_ms() -> f64 {
    DEFAULT_RAGE_WINDOW_MS
}

fn default_rage_click_threshold() -> u32 {
    DEFAULT_RAGE_THRESHOLD
}

fn default_bio_min_read_ms() -> f64 {
    DEFAULT_BIO_MIN_READ_MS
}

fn default_sunset_visible_ratio() -> f64 {
    0.5
}

fn default_section_visible_ratio() -> f64 {
    0.3
}

fn default_bio_visible_ratio() -> f64 {
    0.5
}

fn default_log_events() -> bool {
    true
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            scroll_milestones: default_scroll_milestones(),
            scroll_debounce_ms: default_scroll_debounce_ms(),
            rage_click_window_ms: default_rage_click_window_ms(),
            rage_click_threshold: default_rage_click_threshold(),
            bio_min_read_ms: default_bio_min_read_ms(),
            sunset_visible_ratio: default_sunset_visible_ratio(),
            section_visible_ratio: default_section_visible_ratio(),
            bio_visible_ratio: default_bio_visible_ratio(),
            log_events: default_log_events(),
            selectors: Selectors::default(),
        }
    }
}

impl TrackingConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Load the tracking config from the page.
///
/// # Fallback Behavior
///
/// Returns the defaults if:
/// - There is no config element (the normal case)
/// - The element is empty
/// - The JSON is malformed (logged as a warning)
pub fn load_config() -> TrackingConfig {
    let json = leptos::document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty());

    match json {
        Some(json) => TrackingConfig::from_json(&json).unwrap_or_else(|e| {
            leptos::logging::warn!(
                "Portfolio tracking: failed to parse #{} (using defaults): {}",
                CONFIG_ELEMENT_ID,
                e
            );
            TrackingConfig::default()
        }),
        None => TrackingConfig::default(),
    }
}
