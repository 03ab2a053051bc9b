// Re-export modules
pub mod cloud;
pub mod config;
pub mod crawlers;
pub mod filter;
pub mod parsers;
pub mod session;
pub mod sources;
pub mod tokenizer;

// Re-export commonly used types for convenience
pub use cloud::{FailureKind, InputSource, VisualizeError, WordCloud, WordCloudImage};
pub use crawlers::web::Progress;
pub use session::{CloudState, Session};

use config::AppConfig;
use crawlers::crawler::{CrawlError, Fetcher};
use crawlers::web::{HttpFetcher, SiteCrawler};
use sources::spreadsheet::{self, SourceError};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tokenizer::{NounTokenizer, TokenizeError};

/// Sections of the site that can be analysed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Blog articles
    Blog,
    /// Customer testimonials
    Voice,
}

impl Target {
    /// Path of the section's index page
    pub fn path(&self) -> &'static str {
        match self {
            Target::Blog => "/blog",
            Target::Voice => "/voice",
        }
    }
}

/// Where the text for a word cloud comes from
#[derive(Debug, Clone)]
pub enum Source {
    /// Scrape every article linked from a section of the site
    Scrape(Target),
    /// One column of a header-less CSV file
    Spreadsheet { path: PathBuf, column: usize },
}

impl Source {
    pub fn input(&self) -> InputSource {
        match self {
            Source::Scrape(_) => InputSource::Scrape,
            Source::Spreadsheet { .. } => InputSource::Spreadsheet,
        }
    }
}

/// Errors that abort a run before anything is rendered
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Crawl(#[from] CrawlError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
}

/// Runs text collection, noun extraction and word cloud rendering
pub struct Pipeline {
    config: AppConfig,
    font_path: PathBuf,
    delay: Option<Duration>,
}

impl Pipeline {
    /// Create a pipeline rendering with the font at `font_path`
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        Self {
            config: AppConfig::default(),
            font_path: font_path.into(),
            delay: None,
        }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the pause between article fetches
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Collects the raw text of `source`, then renders it into `session`.
    ///
    /// Fetch, spreadsheet and tokenizer errors abort the run and leave the
    /// session untouched. Rendering failures are recorded in the session.
    pub async fn run<P>(
        &self,
        source: &Source,
        session: &mut Session,
        on_progress: P,
    ) -> Result<(), PipelineError>
    where
        P: FnMut(Progress),
    {
        let text = match source {
            Source::Scrape(target) => {
                let fetcher = HttpFetcher::new(&self.config.crawl)?;
                self.scrape_with(fetcher, *target, on_progress).await?
            }
            Source::Spreadsheet { path, column } => spreadsheet::column_text(path, *column)?,
        };
        self.visualize(&text, source.input(), session)
    }

    /// Scrapes every article of `target` through `fetcher`
    pub async fn scrape_with<F, P>(
        &self,
        fetcher: F,
        target: Target,
        on_progress: P,
    ) -> Result<String, CrawlError>
    where
        F: Fetcher,
        P: FnMut(Progress),
    {
        let mut crawler = SiteCrawler::new(fetcher, &self.config.crawl)?;
        if let Some(delay) = self.delay {
            crawler = crawler.with_delay(delay);
        }
        let index_url = crawler.index_url(target);
        crawler.crawl(&index_url, on_progress).await
    }

    /// Extracts nouns from `text` and renders them into `session`
    pub fn visualize(
        &self,
        text: &str,
        input: InputSource,
        session: &mut Session,
    ) -> Result<(), PipelineError> {
        let tokens = NounTokenizer::new()?.tokenize(text)?;
        ::log::info!("Tokenized {} bytes of text into {} bytes of nouns", text.len(), tokens.len());

        let render = &self.config.render;
        let font_path = self.font_path.as_path();
        session.generate(|| WordCloud::from_config(render)?.generate(&tokens, font_path, input));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::PageMarkers;
    use crate::parsers::html::extract_content;
    use std::io::Write;

    #[test]
    fn test_target_paths() {
        assert_eq!(Target::Blog.path(), "/blog");
        assert_eq!(Target::Voice.path(), "/voice");
    }

    #[test]
    fn test_source_input() {
        assert_eq!(Source::Scrape(Target::Blog).input(), InputSource::Scrape);
        let sheet = Source::Spreadsheet {
            path: PathBuf::from("a.csv"),
            column: 0,
        };
        assert_eq!(sheet.input(), InputSource::Spreadsheet);
    }

    #[test]
    fn test_stopword_only_text_fails_as_empty_corpus() {
        let pipeline = Pipeline::new("/unused/font.ttf");
        let mut session = Session::new();
        pipeline
            .visualize("こと、こと、こと。", InputSource::Scrape, &mut session)
            .unwrap();

        match session.state() {
            CloudState::Failed(e) => assert!(matches!(
                e,
                VisualizeError::EmptyCorpus {
                    input: InputSource::Scrape
                }
            )),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_text_without_nouns_fails_without_panicking() {
        let pipeline = Pipeline::new("/unused/font.ttf");
        let mut session = Session::new();
        pipeline
            .visualize("速く走る", InputSource::Scrape, &mut session)
            .unwrap();
        assert!(matches!(session.state(), CloudState::Failed(_)));
    }

    #[tokio::test]
    async fn test_empty_spreadsheet_column_is_reported_for_spreadsheet() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1,\n2,\n").unwrap();

        let pipeline = Pipeline::new("/unused/font.ttf");
        let source = Source::Spreadsheet {
            path: file.path().to_path_buf(),
            column: 1,
        };
        let mut session = Session::new();
        pipeline.run(&source, &mut session, |_| {}).await.unwrap();

        match session.state() {
            CloudState::Failed(e) => {
                assert_eq!(e.kind(), FailureKind::EmptyCorpus);
                assert!(e.user_message().contains("CSV"));
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_extracted_article_renders_and_resets() {
        let Some(font) = crate::cloud::tests::system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };

        let html = r#"<html><body>
            <div class="notion-callout"><div class="notion-text">お知らせ</div></div>
            <div class="notion-text">スクラム開発のチームはスクラムを使う。</div>
        </body></html>"#;
        let text = extract_content(html, &PageMarkers::default());

        let pipeline = Pipeline::new(font);
        let mut session = Session::new();
        pipeline
            .visualize(&text, InputSource::Scrape, &mut session)
            .unwrap();

        let image = session.image().expect("word cloud should render");
        assert_eq!((image.width(), image.height()), (800, 400));
        assert_eq!(image.words[0].text, "スクラム");
        assert!(!image.words.iter().any(|w| w.text == "お知らせ"));

        session.reset();
        assert!(session.image().is_none());
    }
}
