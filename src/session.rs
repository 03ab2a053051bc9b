use crate::cloud::{VisualizeError, WordCloudImage};

/// Lifecycle of the word cloud shown to the operator
#[derive(Debug, Default)]
pub enum CloudState {
    /// Nothing generated yet, or cleared by a reset
    #[default]
    Idle,
    /// A render is in progress
    Generating,
    /// The last render succeeded
    Rendered(WordCloudImage),
    /// The last render failed; no partial image is kept
    Failed(VisualizeError),
}

/// Holds the outcome of the latest word cloud run between interactions
#[derive(Debug, Default)]
pub struct Session {
    state: CloudState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CloudState {
        &self.state
    }

    /// The rendered image, if the last run succeeded
    pub fn image(&self) -> Option<&WordCloudImage> {
        match &self.state {
            CloudState::Rendered(image) => Some(image),
            _ => None,
        }
    }

    /// Runs `render` and records its outcome, replacing any earlier image
    pub fn generate<F>(&mut self, render: F) -> &CloudState
    where
        F: FnOnce() -> Result<WordCloudImage, VisualizeError>,
    {
        self.state = CloudState::Generating;
        self.state = match render() {
            Ok(image) => {
                ::log::info!("Word cloud rendered with {} words", image.words.len());
                CloudState::Rendered(image)
            }
            Err(e) => {
                ::log::error!("Word cloud failed ({:?}): {}", e.kind(), e);
                CloudState::Failed(e)
            }
        };
        &self.state
    }

    /// Drops any rendered image or failure and returns to idle
    pub fn reset(&mut self) {
        ::log::debug!("Session reset");
        self.state = CloudState::Idle;
    }
}
