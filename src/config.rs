use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for scraping the article site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Origin every index path and article link is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds to wait between two successive article fetches
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,

    /// Exact class attribute of the site-wide header that gets dropped
    #[serde(default = "default_header_class")]
    pub header_class: String,

    /// Class marker of anchors pointing at articles
    #[serde(default = "default_link_marker")]
    pub link_marker: String,

    /// Class marker of the boilerplate callout block
    #[serde(default = "default_callout_marker")]
    pub callout_marker: String,

    /// Class marker of article body text blocks
    #[serde(default = "default_text_marker")]
    pub text_marker: String,

    /// User agent sent with each request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Configuration for the word cloud renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Background colour as `#rrggbb`
    #[serde(default = "default_background")]
    pub background: String,

    /// Maximum number of distinct words drawn
    #[serde(default = "default_max_words")]
    pub max_words: usize,

    /// Smallest font size tried before a word is skipped
    #[serde(default = "default_min_font_size")]
    pub min_font_size: f32,

    /// Largest font size; the canvas height is used when unset
    #[serde(default)]
    pub max_font_size: Option<f32>,

    /// Blend between rank-based (0.0) and frequency-based (1.0) sizing
    #[serde(default = "default_relative_scaling")]
    pub relative_scaling: f32,

    /// Regex splitting text into countable words
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    /// Words excluded on top of the built-in stopword list
    #[serde(default = "default_extra_stopwords")]
    pub extra_stopwords: Vec<String>,

    /// Padding in pixels kept around every placed word
    #[serde(default = "default_margin")]
    pub margin: u32,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub crawl: CrawlConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

impl AppConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

fn default_base_url() -> String {
    "https://scrumsign.com".to_string()
}

fn default_delay_secs() -> u64 {
    3
}

fn default_header_class() -> String {
    "p-header p-header--full-width".to_string()
}

fn default_link_marker() -> String {
    "notion-page-link".to_string()
}

fn default_callout_marker() -> String {
    "notion-callout".to_string()
}

fn default_text_marker() -> String {
    "notion-text".to_string()
}

fn default_user_agent() -> String {
    concat!("topic-cloud/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    400
}

fn default_background() -> String {
    "#ffffff".to_string()
}

fn default_max_words() -> usize {
    200
}

fn default_min_font_size() -> f32 {
    4.0
}

fn default_relative_scaling() -> f32 {
    0.5
}

/// Words of two or more word characters; single characters are dropped
fn default_token_pattern() -> String {
    r"\w[\w']+".to_string()
}

fn default_margin() -> u32 {
    2
}

fn default_extra_stopwords() -> Vec<String> {
    crate::filter::DOMAIN_STOPWORDS
        .iter()
        .map(|w| w.to_string())
        .collect()
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            delay_secs: default_delay_secs(),
            header_class: default_header_class(),
            link_marker: default_link_marker(),
            callout_marker: default_callout_marker(),
            text_marker: default_text_marker(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
            max_words: default_max_words(),
            min_font_size: default_min_font_size(),
            max_font_size: None,
            relative_scaling: default_relative_scaling(),
            token_pattern: default_token_pattern(),
            extra_stopwords: default_extra_stopwords(),
            margin: default_margin(),
        }
    }
}
