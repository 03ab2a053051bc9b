use crate::Target;
use crate::config::CrawlConfig;
use crate::crawlers::crawler::{CrawlError, Fetcher};
use crate::parsers::PageMarkers;
use crate::parsers::html;
use std::time::Duration;
use url::Url;

/// Fetches pages over plain HTTP GET
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(CrawlError::Client)?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        ::log::debug!("GET {}", url);
        let request_error = |source| CrawlError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(request_error)
    }
}

/// Crawl progress, reported after every article page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Number of pages processed so far (1-based)
    pub current: usize,
    /// Number of article links found on the index page
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f64 / self.total as f64
        }
    }
}

/// Walks one index page and the articles it links to, one request at a time
pub struct SiteCrawler<F: Fetcher> {
    fetcher: F,
    origin: String,
    markers: PageMarkers,
    delay: Duration,
}

impl<F: Fetcher> SiteCrawler<F> {
    pub fn new(fetcher: F, config: &CrawlConfig) -> Result<Self, CrawlError> {
        let base = Url::parse(&config.base_url).map_err(|source| CrawlError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        Ok(Self {
            fetcher,
            origin: base.origin().ascii_serialization(),
            markers: PageMarkers::from_config(config),
            delay: Duration::from_secs(config.delay_secs),
        })
    }

    /// Override the pause between article fetches
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Absolute URL of the index page for `target`
    pub fn index_url(&self, target: Target) -> String {
        self.absolute(target.path())
    }

    /// Absolute URL of a link found on an index page
    fn absolute(&self, link: &str) -> String {
        format!("{}{}", self.origin, link)
    }

    /// Fetches the index page, then every article it links to, and returns
    /// the concatenated article text.
    ///
    /// Articles are fetched strictly in link order with `delay` between two
    /// fetches. The first failed fetch aborts the run.
    pub async fn crawl<P>(&self, index_url: &str, mut on_progress: P) -> Result<String, CrawlError>
    where
        P: FnMut(Progress),
    {
        ::log::info!("Fetching index page {}", index_url);
        let index = self.fetcher.fetch(index_url).await?;
        let links = html::collect_links(&index, &self.markers);

        let total = links.len();
        ::log::info!("Found {} article links on {}", total, index_url);

        let mut corpus = String::new();
        for (i, link) in links.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.delay).await;
            }

            let url = self.absolute(link);
            let page = self.fetcher.fetch(&url).await?;
            let content = html::extract_content(&page, &self.markers);
            ::log::debug!("{}: {} bytes of text", url, content.len());
            corpus.push_str(&content);

            on_progress(Progress {
                current: i + 1,
                total,
            });
        }

        ::log::info!(
            "Crawl complete - {} pages, {} bytes of text",
            total,
            corpus.len()
        );
        Ok(corpus)
    }
}
