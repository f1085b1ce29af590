use crate::events::{LinkCategory, LinkType};

/// Ordered substring rules; the first rule with any matching pattern wins.
const LINK_TYPE_RULES: &[(&[&str], LinkType)] = &[
    (&["web.archive.org"], LinkType::WaybackMachine),
    (&["developers.google.com"], LinkType::DeveloperDocs),
    (&["support.google.com"], LinkType::HelpCenter),
    (&["cloud.google.com"], LinkType::CloudDocs),
    (&["youtube.com", "youtu.be"], LinkType::Video),
    (&["github.com"], LinkType::Github),
    (&["amazon.com", "peachpit.com"], LinkType::BookPurchase),
];

/// Classify an `href` by the domain it points at.
pub fn classify_link_type(href: &str) -> LinkType {
    LINK_TYPE_RULES
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| href.contains(p)))
        .map(|(_, link_type)| *link_type)
        .unwrap_or(LinkType::Standard)
}

/// External iff the anchor resolves to a host other than the page's.
/// Anchors without a host (`mailto:`, `javascript:`) count as internal.
pub fn link_category(link_hostname: &str, page_hostname: &str) -> LinkCategory {
    if !link_hostname.is_empty() && link_hostname != page_hostname {
        LinkCategory::External
    } else {
        LinkCategory::Internal
    }
}

/// Anchors with no `href` or a bare `#` are placeholders, not navigation.
pub fn is_trackable_href(href: Option<&str>) -> bool {
    matches!(href, Some(h) if !h.is_empty() && h != "#")
}

/// First `max_chars` characters of `s`, never splitting a character.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Some text if it is non-empty, mirroring a `text || fallback` check.
pub fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}
