//! Event names and attribute payloads sent to GA4.
//!
//! Downstream dashboards key on these names and attribute keys, so every
//! params struct below serializes field-for-field into the `gtag` payload.

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkCategory {
    Internal,
    External,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    WaybackMachine,
    DeveloperDocs,
    HelpCenter,
    CloudDocs,
    Video,
    Github,
    BookPurchase,
    Standard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SunsetProduct {
    #[serde(rename = "Universal Analytics")]
    UniversalAnalytics,
    #[serde(rename = "Google Optimize")]
    GoogleOptimize,
}

impl SunsetProduct {
    /// Notices mentioning Universal Analytics are about UA; every other
    /// notice on the page is about Optimize.
    pub fn from_notice_text(text: &str) -> Self {
        if text.contains("Universal Analytics") {
            SunsetProduct::UniversalAnalytics
        } else {
            SunsetProduct::GoogleOptimize
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintAction {
    Initiated,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// `window.orientation` is 0 in portrait and ±90 in landscape.
    pub fn from_angle(angle: i32) -> Self {
        if angle == 0 {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageHideProps {
    pub time_on_page_seconds: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageEngagementProps {
    pub engagement_time_seconds: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScrollDepthProps {
    pub percent: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkClickProps {
    pub link_url: String,
    pub link_text: String,
    pub link_category: LinkCategory,
    pub link_type: LinkType,
    pub is_sunset_link: bool,
    pub opens_new_tab: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BookClickProps {
    pub book_title: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SunsetNoticeViewProps {
    pub product: SunsetProduct,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SectionViewProps {
    pub section_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NavigationClickProps {
    pub nav_item: String,
    pub nav_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeaturedProjectClickProps {
    pub link_text: String,
    pub link_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScreenshotClickProps {
    pub screenshot_name: String,
    pub screenshot_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BioReadProps {
    pub read_time_seconds: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VideoClickProps {
    pub video_title: String,
    pub video_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FooterClickProps {
    pub footer_link: String,
    pub footer_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContentCopyProps {
    pub copied_text_length: usize,
    pub copied_text_preview: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContextMenuProps {
    pub element_type: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PagePrintProps {
    pub action: PrintAction,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageCacheRestoreProps {
    pub navigation_type: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageViewProps {
    pub page_title: String,
    pub page_location: String,
    pub referrer: String,
    pub screen_width: i32,
    pub screen_height: i32,
    pub viewport_width: i32,
    pub viewport_height: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrientationChangeProps {
    pub orientation: Orientation,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RageClickProps {
    pub element_type: String,
    pub element_class: String,
    pub click_count: u32,
}

/// Every signal the page can emit.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackedEvent {
    PageHide(PageHideProps),
    PageShow,
    PageEngagement(PageEngagementProps),
    ScrollDepth(ScrollDepthProps),
    LinkClick(LinkClickProps),
    BookClick(BookClickProps),
    SunsetNoticeView(SunsetNoticeViewProps),
    SectionView(SectionViewProps),
    NavigationClick(NavigationClickProps),
    FeaturedProjectClick(FeaturedProjectClickProps),
    ScreenshotClick(ScreenshotClickProps),
    BioRead(BioReadProps),
    VideoClick(VideoClickProps),
    FooterClick(FooterClickProps),
    ContentCopy(ContentCopyProps),
    ContextMenu(ContextMenuProps),
    PagePrint(PagePrintProps),
    PageCacheRestore(PageCacheRestoreProps),
    PageView(PageViewProps),
    OrientationChange(OrientationChangeProps),
    RageClick(RageClickProps),
}

impl TrackedEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TrackedEvent::PageHide(_) => "page_hide",
            TrackedEvent::PageShow => "page_show",
            TrackedEvent::PageEngagement(_) => "page_engagement",
            TrackedEvent::ScrollDepth(_) => "scroll_depth",
            TrackedEvent::LinkClick(_) => "link_click",
            TrackedEvent::BookClick(_) => "book_click",
            TrackedEvent::SunsetNoticeView(_) => "sunset_notice_view",
            TrackedEvent::SectionView(_) => "section_view",
            TrackedEvent::NavigationClick(_) => "navigation_click",
            TrackedEvent::FeaturedProjectClick(_) => "featured_project_click",
            TrackedEvent::ScreenshotClick(_) => "screenshot_click",
            TrackedEvent::BioRead(_) => "bio_read",
            TrackedEvent::VideoClick(_) => "video_click",
            TrackedEvent::FooterClick(_) => "footer_click",
            TrackedEvent::ContentCopy(_) => "content_copy",
            TrackedEvent::ContextMenu(_) => "context_menu",
            TrackedEvent::PagePrint(_) => "page_print",
            TrackedEvent::PageCacheRestore(_) => "page_cache_restore",
            TrackedEvent::PageView(_) => "portfolio_page_view",
            TrackedEvent::OrientationChange(_) => "orientation_change",
            TrackedEvent::RageClick(_) => "rage_click",
        }
    }

    /// Attribute map for the event. Serializing these plain structs cannot
    /// fail, but a failure would still only yield an empty map.
    pub fn params(&self) -> Map<String, Value> {
        let value = match self {
            TrackedEvent::PageShow => return Map::new(),
            TrackedEvent::PageHide(p) => serde_json::to_value(p),
            TrackedEvent::PageEngagement(p) => serde_json::to_value(p),
            TrackedEvent::ScrollDepth(p) => serde_json::to_value(p),
            TrackedEvent::LinkClick(p) => serde_json::to_value(p),
            TrackedEvent::BookClick(p) => serde_json::to_value(p),
            TrackedEvent::SunsetNoticeView(p) => serde_json::to_value(p),
            TrackedEvent::SectionView(p) => serde_json::to_value(p),
            TrackedEvent::NavigationClick(p) => serde_json::to_value(p),
            TrackedEvent::FeaturedProjectClick(p) => serde_json::to_value(p),
            TrackedEvent::ScreenshotClick(p) => serde_json::to_value(p),
            TrackedEvent::BioRead(p) => serde_json::to_value(p),
            TrackedEvent::VideoClick(p) => serde_json::to_value(p),
            TrackedEvent::FooterClick(p) => serde_json::to_value(p),
            TrackedEvent::ContentCopy(p) => serde_json::to_value(p),
            TrackedEvent::ContextMenu(p) => serde_json::to_value(p),
            TrackedEvent::PagePrint(p) => serde_json::to_value(p),
            TrackedEvent::PageCacheRestore(p) => serde_json::to_value(p),
            TrackedEvent::PageView(p) => serde_json::to_value(p),
            TrackedEvent::OrientationChange(p) => serde_json::to_value(p),
            TrackedEvent::RageClick(p) => serde_json::to_value(p),
        };
        match value {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_click_params_use_dashboard_keys() {
        let event = TrackedEvent::LinkClick(LinkClickProps {
            link_url: "https://github.com/x".to_string(),
            link_text: "Repo".to_string(),
            link_category: LinkCategory::External,
            link_type: LinkType::Github,
            is_sunset_link: false,
            opens_new_tab: true,
        });
        assert_eq!(event.name(), "link_click");
        assert_eq!(
            Value::Object(event.params()),
            json!({
                "link_url": "https://github.com/x",
                "link_text": "Repo",
                "link_category": "external",
                "link_type": "github",
                "is_sunset_link": false,
                "opens_new_tab": true,
            })
        );
    }

    #[test]
    fn test_link_type_names() {
        let names: Vec<Value> = [
            LinkType::WaybackMachine,
            LinkType::DeveloperDocs,
            LinkType::HelpCenter,
            LinkType::CloudDocs,
            LinkType::Video,
            LinkType::Github,
            LinkType::BookPurchase,
            LinkType::Standard,
        ]
        .iter()
        .map(|t| serde_json::to_value(t).unwrap())
        .collect();
        assert_eq!(
            names,
            vec![
                json!("wayback_machine"),
                json!("developer_docs"),
                json!("help_center"),
                json!("cloud_docs"),
                json!("video"),
                json!("github"),
                json!("book_purchase"),
                json!("standard"),
            ]
        );
    }

    #[test]
    fn test_page_show_has_no_params() {
        assert_eq!(TrackedEvent::PageShow.name(), "page_show");
        assert!(TrackedEvent::PageShow.params().is_empty());
    }

    #[test]
    fn test_sunset_product_from_text() {
        assert_eq!(
            SunsetProduct::from_notice_text("Universal Analytics stopped processing data"),
            SunsetProduct::UniversalAnalytics
        );
        assert_eq!(
            SunsetProduct::from_notice_text("Optimize was sunset in 2023"),
            SunsetProduct::GoogleOptimize
        );
        assert_eq!(
            serde_json::to_value(SunsetProduct::UniversalAnalytics).unwrap(),
            json!("Universal Analytics")
        );
        assert_eq!(
            serde_json::to_value(SunsetProduct::GoogleOptimize).unwrap(),
            json!("Google Optimize")
        );
    }

    #[test]
    fn test_orientation_from_angle() {
        assert_eq!(Orientation::from_angle(0), Orientation::Portrait);
        assert_eq!(Orientation::from_angle(90), Orientation::Landscape);
        assert_eq!(Orientation::from_angle(-90), Orientation::Landscape);
        assert_eq!(Orientation::from_angle(180), Orientation::Landscape);
    }

    #[test]
    fn test_nav_url_missing_serializes_null() {
        let event = TrackedEvent::NavigationClick(NavigationClickProps {
            nav_item: "Home".to_string(),
            nav_url: None,
        });
        assert_eq!(
            Value::Object(event.params()),
            json!({ "nav_item": "Home", "nav_url": null })
        );
    }

    #[test]
    fn test_page_view_event_name() {
        let event = TrackedEvent::PageView(PageViewProps {
            page_title: "Portfolio".to_string(),
            page_location: "https://example.com/".to_string(),
            referrer: "direct".to_string(),
            screen_width: 1920,
            screen_height: 1080,
            viewport_width: 1280,
            viewport_height: 720,
        });
        assert_eq!(event.name(), "portfolio_page_view");
        let params = event.params();
        assert_eq!(params["referrer"], json!("direct"));
        assert_eq!(params["screen_width"], json!(1920));
        assert_eq!(params["viewport_height"], json!(720));
    }
}
