use thiserror::Error;

/// Failure while fetching a page. Fatal for the current run.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Where page markup comes from
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    /// Fetch the raw markup behind `url`
    async fn fetch(&self, url: &str) -> Result<String, CrawlError>;
}
