use crate::parsers::{PageMarkers, Region};
use scraper::{ElementRef, Html};

/// Collects the article links of an index page.
///
/// The site header is dropped first so navigation links are never picked
/// up. Links come back in document order, duplicates included.
pub fn collect_links(html: &str, markers: &PageMarkers) -> Vec<String> {
    let mut doc = Html::parse_document(html);
    detach_first(&mut doc, &markers.header);

    let links = matching_elements(&doc, &markers.link)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("Index page has {} article links", links.len());
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}

/// Extracts the body text of an article page.
///
/// Drops the site header and the first callout block, then concatenates
/// the text of every body-text block without a separator.
pub fn extract_content(html: &str, markers: &PageMarkers) -> String {
    let mut doc = Html::parse_document(html);
    detach_first(&mut doc, &markers.header);
    detach_first(&mut doc, &markers.callout);

    let content = matching_elements(&doc, &markers.text)
        .flat_map(|e| e.text())
        .collect::<String>();

    ::log::debug!("Extracted {} bytes of article text", content.len());
    content
}

/// Elements of `region` reachable from the document root, in document order
fn matching_elements<'a>(doc: &'a Html, region: &'a Region) -> impl Iterator<Item = ElementRef<'a>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |e| region.matches(e.value()))
}

/// Removes the first element of `region` (and its subtree) from the document
fn detach_first(doc: &mut Html, region: &Region) -> bool {
    let Some(id) = matching_elements(doc, region).next().map(|e| e.id()) else {
        return false;
    };

    match doc.tree.get_mut(id) {
        Some(mut node) => {
            node.detach();
            true
        }
        None => false,
    }
}
