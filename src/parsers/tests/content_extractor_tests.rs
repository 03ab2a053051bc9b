use crate::config::CrawlConfig;
use crate::parsers::PageMarkers;
use crate::parsers::html::extract_content;

#[cfg(test)]
mod content_extractor_tests {
    use super::*;

    #[test]
    fn test_concatenates_text_blocks_without_separator() {
        let html = r#"<html><body>
            <div class="notion-text">スクラム</div>
            <p>not body text</p>
            <div class="notion-text notion-block">開発</div>
        </body></html>"#;
        assert_eq!(extract_content(html, &PageMarkers::default()), "スクラム開発");
    }

    #[test]
    fn test_header_text_is_excluded() {
        let html = r#"<html><body>
            <header class="p-header p-header--full-width">
              <div class="notion-text">ヘッダー</div>
            </header>
            <div class="notion-text">本文</div>
        </body></html>"#;
        assert_eq!(extract_content(html, &PageMarkers::default()), "本文");
    }

    #[test]
    fn test_callout_is_excluded_even_with_text_descendants() {
        let html = r#"<html><body>
            <div class="notion-callout">
              <div class="notion-text">お知らせ</div>
            </div>
            <div class="notion-text">記事</div>
        </body></html>"#;
        assert_eq!(extract_content(html, &PageMarkers::default()), "記事");
    }

    #[test]
    fn test_only_first_callout_is_removed() {
        let html = r#"<html><body>
            <div class="notion-callout"><div class="notion-text">一</div></div>
            <div class="notion-callout"><div class="notion-text">二</div></div>
        </body></html>"#;
        assert_eq!(extract_content(html, &PageMarkers::default()), "二");
    }

    #[test]
    fn test_callout_inside_text_block_is_cut_out() {
        let html = r#"<html><body>
            <div class="notion-text">前<div class="notion-callout">囲み</div>後</div>
        </body></html>"#;
        assert_eq!(extract_content(html, &PageMarkers::default()), "前後");
    }

    #[test]
    fn test_no_text_blocks_is_empty() {
        let html = "<html><body><p>plain</p></body></html>";
        assert_eq!(extract_content(html, &PageMarkers::default()), "");
    }

    #[test]
    fn test_custom_markers() {
        let config = CrawlConfig {
            text_marker: "post-body".to_string(),
            ..CrawlConfig::default()
        };
        let html = r#"<html><body>
            <section class="post-body">custom</section>
            <div class="notion-text">default</div>
        </body></html>"#;
        assert_eq!(extract_content(html, &PageMarkers::from_config(&config)), "custom");
    }
}
