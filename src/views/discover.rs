use log::warn;

use crate::client::ChefClient;
use crate::error::ChefError;
use crate::model::Video;

/// Fixed query for the discover feed
pub const DISCOVER_QUERY: &str = "cooking recipe food shorts quick tutorial";
/// Videos requested per load
pub const DISCOVER_PAGE_SIZE: u32 = 20;

pub const DISCOVER_CONNECT_ERROR_MESSAGE: &str =
    "Server not reachable. Make sure it's running on port 3001.";
pub const DISCOVER_FAILED_MESSAGE: &str = "Could not load videos.";

/// Feed of short cooking videos. Recovery is manual: call `load` again.
#[derive(Debug, Default)]
pub struct DiscoverFeed {
    videos: Vec<Video>,
    error: Option<String>,
}

impl DiscoverFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch a fresh page, replacing the current list on success.
    /// Used for the initial load, "Retry" and "Load More".
    pub async fn load(&mut self, client: &ChefClient) {
        self.error = None;
        match client.discover(DISCOVER_QUERY, DISCOVER_PAGE_SIZE).await {
            Ok(videos) => self.videos = videos,
            Err(err) => {
                warn!("Discover feed failed: {}", err);
                self.error = Some(match err {
                    ChefError::Network(_) => DISCOVER_CONNECT_ERROR_MESSAGE.to_string(),
                    ChefError::Rejected { message, .. } if !message.is_empty() => message,
                    _ => DISCOVER_FAILED_MESSAGE.to_string(),
                });
            }
        }
    }
}
