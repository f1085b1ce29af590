//! Page instrumentation context.
//!
//! [`Tracker`] owns every piece of per-page tracking state and turns the
//! facts a browser event carries into [`TrackedEvent`]s for the sink. The
//! `dom` module extracts those facts from the live page; tests feed them
//! directly.

use crate::analytics::AnalyticsSink;
use crate::clock::{elapsed_seconds, Clock};
use crate::config::TrackingConfig;
use crate::events::*;
use crate::links::{classify_link_type, is_trackable_href, link_category, non_empty, truncate_chars};
use crate::state::{
    element_key, scroll_percent, ClickTracker, DwellTimer, EngagementTimer, ScrollMilestones,
    SeenOnce,
};

const LINK_TEXT_MAX_CHARS: usize = 100;
const COPY_PREVIEW_MAX_CHARS: usize = 50;

/// Identifies an observed element by its position in the list of elements
/// registered with an observer.
pub type ElementSlot = usize;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub location: String,
    pub referrer: String,
    pub screen_width: i32,
    pub screen_height: i32,
    pub viewport_width: i32,
    pub viewport_height: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

/// An anchor that received a click, as seen by the document-level listener.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkClick {
    /// Raw `href` attribute.
    pub href: Option<String>,
    /// Text content, untrimmed.
    pub text: String,
    /// Host the anchor resolves to (empty for `mailto:` and friends).
    pub hostname: String,
    pub page_hostname: String,
    pub target: String,
    pub in_sunset_notice: bool,
}

/// The nearest rage-click candidate (`a`, `button`, book or screenshot item).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClickTarget {
    pub id: String,
    pub class_name: String,
    pub tag_name: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContextTarget {
    pub tag_name: String,
    pub inside_image: bool,
    pub inside_link: bool,
}

pub struct Tracker<S, C> {
    config: TrackingConfig,
    sink: S,
    clock: C,
    engagement: EngagementTimer,
    milestones: ScrollMilestones,
    clicks: ClickTracker,
    seen_sunsets: SeenOnce<ElementSlot>,
    seen_sections: SeenOnce<ElementSlot>,
    bio: DwellTimer,
}

impl<S: AnalyticsSink, C: Clock> Tracker<S, C> {
    pub fn new(config: TrackingConfig, sink: S, clock: C) -> Self {
        let now = clock.now_ms();
        Self {
            milestones: ScrollMilestones::new(&config.scroll_milestones),
            clicks: ClickTracker::new(config.rage_click_window_ms, config.rage_click_threshold),
            engagement: EngagementTimer::new(now),
            seen_sunsets: SeenOnce::default(),
            seen_sections: SeenOnce::default(),
            bio: DwellTimer::default(),
            config,
            sink,
            clock,
        }
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    fn emit(&self, event: TrackedEvent) {
        self.sink.record(event.name(), &event.params());
    }

    /// Initial `portfolio_page_view`, sent once at startup.
    pub fn page_view(&self, page: PageMetadata) {
        let referrer = non_empty(Some(page.referrer)).unwrap_or_else(|| "direct".to_string());
        self.emit(TrackedEvent::PageView(PageViewProps {
            page_title: page.title,
            page_location: page.location,
            referrer,
            screen_width: page.screen_width,
            screen_height: page.screen_height,
            viewport_width: page.viewport_width,
            viewport_height: page.viewport_height,
        }));
    }

    pub fn visibility_changed(&mut self, hidden: bool) {
        let now = self.clock.now_ms();
        if hidden {
            self.emit(TrackedEvent::PageHide(PageHideProps {
                time_on_page_seconds: self.engagement.elapsed_seconds(now),
            }));
        } else {
            self.engagement.reset(now);
            self.emit(TrackedEvent::PageShow);
        }
    }

    /// Best effort: browsers skip `beforeunload` on some exit paths.
    pub fn unload(&self) {
        let now = self.clock.now_ms();
        self.emit(TrackedEvent::PageEngagement(PageEngagementProps {
            engagement_time_seconds: self.engagement.elapsed_seconds(now),
        }));
    }

    /// Evaluate milestones once scrolling has settled.
    pub fn scroll_settled(&mut self, metrics: ScrollMetrics) {
        let Some(percent) =
            scroll_percent(metrics.scroll_top, metrics.scroll_height, metrics.client_height)
        else {
            return;
        };
        for milestone in self.milestones.observe(percent) {
            self.emit(TrackedEvent::ScrollDepth(ScrollDepthProps { percent: milestone }));
        }
    }

    pub fn link_clicked(&self, link: LinkClick) {
        let Some(href) = link.href.filter(|h| is_trackable_href(Some(h.as_str()))) else {
            return;
        };
        self.emit(TrackedEvent::LinkClick(LinkClickProps {
            link_category: link_category(&link.hostname, &link.page_hostname),
            link_type: classify_link_type(&href),
            link_text: truncate_chars(link.text.trim(), LINK_TEXT_MAX_CHARS),
            link_url: href,
            is_sunset_link: link.in_sunset_notice,
            opens_new_tab: link.target == "_blank",
        }));
    }

    pub fn book_clicked(&self, image_alt: Option<String>) {
        self.emit(TrackedEvent::BookClick(BookClickProps {
            book_title: non_empty(image_alt).unwrap_or_else(|| "Unknown Book".to_string()),
        }));
    }

    /// `visible_ratio` is the share of the notice in view, zero when it is
    /// not intersecting. Below `sunset_visible_ratio` the slot stays unseen.
    pub fn sunset_notice_intersected(
        &mut self,
        slot: ElementSlot,
        visible_ratio: f64,
        text: &str,
    ) {
        if visible_ratio >= self.config.sunset_visible_ratio && self.seen_sunsets.mark(slot) {
            self.emit(TrackedEvent::SunsetNoticeView(SunsetNoticeViewProps {
                product: SunsetProduct::from_notice_text(text),
            }));
        }
    }

    pub fn section_intersected(
        &mut self,
        slot: ElementSlot,
        visible_ratio: f64,
        heading: Option<String>,
    ) {
        if visible_ratio >= self.config.section_visible_ratio && self.seen_sections.mark(slot) {
            self.emit(TrackedEvent::SectionView(SectionViewProps {
                section_name: non_empty(heading).unwrap_or_else(|| "Unknown Section".to_string()),
            }));
        }
    }

    pub fn nav_clicked(&self, text: &str, href: Option<String>) {
        let text = text.trim();
        self.emit(TrackedEvent::NavigationClick(NavigationClickProps {
            nav_item: if text.is_empty() { "Home" } else { text }.to_string(),
            nav_url: href,
        }));
    }

    pub fn featured_project_clicked(&self, text: &str, url: String) {
        self.emit(TrackedEvent::FeaturedProjectClick(FeaturedProjectClickProps {
            link_text: truncate_chars(text.trim(), LINK_TEXT_MAX_CHARS),
            link_url: url,
        }));
    }

    /// `index` is the zero-based position among the featured project's
    /// screenshot links, used to name screenshots without a caption.
    pub fn screenshot_clicked(&self, caption: Option<String>, index: usize, url: String) {
        self.emit(TrackedEvent::ScreenshotClick(ScreenshotClickProps {
            screenshot_name: non_empty(caption)
                .unwrap_or_else(|| format!("Screenshot {}", index + 1)),
            screenshot_url: url,
        }));
    }

    /// Reports a `bio_read` when the bio leaves view after a long enough
    /// visit. The visit ends on leave whether or not it was reported.
    pub fn bio_intersected(&mut self, intersecting: bool) {
        let now = self.clock.now_ms();
        if intersecting {
            self.bio.enter(now);
            return;
        }
        if let Some(dwell_ms) = self.bio.leave(now) {
            if dwell_ms >= self.config.bio_min_read_ms {
                self.emit(TrackedEvent::BioRead(BioReadProps {
                    read_time_seconds: elapsed_seconds(0.0, dwell_ms),
                }));
            }
        }
    }

    pub fn video_clicked(&self, text: &str, url: String) {
        self.emit(TrackedEvent::VideoClick(VideoClickProps {
            video_title: truncate_chars(text.trim(), LINK_TEXT_MAX_CHARS),
            video_url: url,
        }));
    }

    pub fn footer_clicked(&self, text: &str, url: String) {
        self.emit(TrackedEvent::FooterClick(FooterClickProps {
            footer_link: text.trim().to_string(),
            footer_url: url,
        }));
    }

    /// `selection` is the document selection at the time of the copy.
    pub fn content_copied(&self, selection: &str) {
        let selected = selection.trim();
        if selected.is_empty() {
            return;
        }
        self.emit(TrackedEvent::ContentCopy(ContentCopyProps {
            // Length as the browser counts it, in UTF-16 code units
            copied_text_length: selected.encode_utf16().count(),
            copied_text_preview: truncate_chars(selected, COPY_PREVIEW_MAX_CHARS),
        }));
    }

    pub fn context_menu_opened(&self, target: ContextTarget) {
        let element_type = if target.inside_image {
            "image".to_string()
        } else if target.inside_link {
            "link".to_string()
        } else {
            target.tag_name.to_lowercase()
        };
        self.emit(TrackedEvent::ContextMenu(ContextMenuProps { element_type }));
    }

    pub fn print_phase(&self, action: PrintAction) {
        self.emit(TrackedEvent::PagePrint(PagePrintProps { action }));
    }

    /// `persisted` is true when the page came back from the back/forward cache.
    pub fn page_shown(&self, persisted: bool) {
        if persisted {
            self.emit(TrackedEvent::PageCacheRestore(PageCacheRestoreProps {
                navigation_type: "back_forward_cache",
            }));
        }
    }

    pub fn orientation_changed(&self, angle: i32) {
        self.emit(TrackedEvent::OrientationChange(OrientationChangeProps {
            orientation: Orientation::from_angle(angle),
        }));
    }

    pub fn rage_candidate_clicked(&mut self, target: ClickTarget) {
        let now = self.clock.now_ms();
        let key = element_key(&target.id, &target.class_name, &target.tag_name);
        if let Some(click_count) = self.clicks.click(&key, now) {
            self.emit(TrackedEvent::RageClick(RageClickProps {
                element_type: target.tag_name.to_lowercase(),
                element_class: target.class_name,
                click_count,
            }));
        }
    }
}
