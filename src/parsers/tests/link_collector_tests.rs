use crate::parsers::PageMarkers;
use crate::parsers::html::collect_links;

#[cfg(test)]
mod link_collector_tests {
    use super::*;

    const INDEX_PAGE: &str = r#"
        <html><body>
          <header class="p-header p-header--full-width">
            <a class="notion-page-link" href="/nav-home">Home</a>
          </header>
          <main>
            <a class="notion-link notion-page-link" href="/blog/first">First</a>
            <a class="plain" href="/blog/ignored">Ignored</a>
            <a class="notion-page-link" href="/blog/second">Second</a>
            <a class="notion-page-link" href="/blog/first">First again</a>
            <a class="notion-page-link">No href</a>
          </main>
        </body></html>
    "#;

    #[test]
    fn test_collects_marked_links_in_document_order() {
        let links = collect_links(INDEX_PAGE, &PageMarkers::default());
        assert_eq!(links, vec!["/blog/first", "/blog/second", "/blog/first"]);
    }

    #[test]
    fn test_header_links_are_excluded() {
        let links = collect_links(INDEX_PAGE, &PageMarkers::default());
        assert!(!links.iter().any(|l| l == "/nav-home"));
    }

    #[test]
    fn test_header_with_other_class_is_kept() {
        let html = r#"<html><body>
            <header class="p-header"><a class="notion-page-link" href="/kept">x</a></header>
        </body></html>"#;
        let links = collect_links(html, &PageMarkers::default());
        assert_eq!(links, vec!["/kept"]);
    }

    #[test]
    fn test_no_matching_links_is_empty() {
        let html = "<html><body><a href=\"/a\">a</a><p>nothing here</p></body></html>";
        assert!(collect_links(html, &PageMarkers::default()).is_empty());
        assert!(collect_links("", &PageMarkers::default()).is_empty());
    }

    #[test]
    fn test_links_are_not_filtered_by_scheme_or_extension() {
        let html = r#"<html><body>
            <a class="notion-page-link" href="https://elsewhere.example/x.pdf">pdf</a>
            <a class="notion-page-link" href="mailto:someone@example.com">mail</a>
        </body></html>"#;
        let links = collect_links(html, &PageMarkers::default());
        assert_eq!(
            links,
            vec!["https://elsewhere.example/x.pdf", "mailto:someone@example.com"]
        );
    }
}
