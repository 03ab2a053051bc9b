pub mod html;

#[cfg(test)]
mod tests;

use crate::config::CrawlConfig;
use scraper::node::Element;

/// How a region's class attribute is compared against a marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMatch {
    /// The whitespace-normalized class attribute equals the marker
    Exact(String),
    /// The class attribute contains the marker as a substring
    Contains(String),
}

impl ClassMatch {
    fn matches(&self, class_attr: &str) -> bool {
        match self {
            ClassMatch::Exact(expected) => {
                class_attr.split_whitespace().collect::<Vec<_>>().join(" ") == *expected
            }
            ClassMatch::Contains(marker) => class_attr.contains(marker.as_str()),
        }
    }
}

/// A class-marked region of a page, optionally restricted to one tag name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    tag: Option<String>,
    class: ClassMatch,
}

impl Region {
    /// Region matching elements of any tag
    pub fn any(class: ClassMatch) -> Self {
        Self { tag: None, class }
    }

    /// Region matching only `<tag>` elements
    pub fn tagged(tag: &str, class: ClassMatch) -> Self {
        Self {
            tag: Some(tag.to_string()),
            class,
        }
    }

    /// Whether an element belongs to this region. Elements without a class
    /// attribute never match.
    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        element
            .attr("class")
            .is_some_and(|class_attr| self.class.matches(class_attr))
    }
}

/// The regions the extractors look for on the article site
#[derive(Debug, Clone)]
pub struct PageMarkers {
    /// Site-wide header, dropped before anything else is read
    pub header: Region,
    /// Anchors pointing at articles on an index page
    pub link: Region,
    /// Boilerplate callout on article pages
    pub callout: Region,
    /// Article body text blocks
    pub text: Region,
}

impl PageMarkers {
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            header: Region::tagged("header", ClassMatch::Exact(config.header_class.clone())),
            link: Region::tagged("a", ClassMatch::Contains(config.link_marker.clone())),
            callout: Region::tagged("div", ClassMatch::Contains(config.callout_marker.clone())),
            text: Region::any(ClassMatch::Contains(config.text_marker.clone())),
        }
    }
}

impl Default for PageMarkers {
    fn default() -> Self {
        Self::from_config(&CrawlConfig::default())
    }
}
