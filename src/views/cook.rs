use log::warn;

use crate::client::ChefClient;
use crate::error::ChefError;
use crate::model::{embed_url, watch_url};
use crate::storage::{Storage, RECIPE_TITLE_KEY};

pub const NO_RECIPE_MESSAGE: &str = "No recipe generated yet. Please go to Generate page first.";
pub const SEARCH_CONNECT_ERROR_MESSAGE: &str =
    "Could not connect to the video search service. Make sure the server is running.";
pub const NO_VIDEO_MESSAGE: &str = "Could not find a cooking video for this recipe.";

const MISSING_KEY_MARKER: &str = "YouTube API key not configured";

/// Search query used to find a tutorial for a recipe title
pub fn tutorial_query(recipe_name: &str) -> String {
    format!("{} recipe cooking tutorial how to make", recipe_name)
}

/// Looks up a tutorial video for the most recently generated recipe.
pub struct CookView<T: Storage> {
    session: T,
    recipe_name: Option<String>,
    video_id: Option<String>,
    error: Option<String>,
}

impl<T: Storage> CookView<T> {
    pub fn new(session: T) -> Self {
        let recipe_name = session.get(RECIPE_TITLE_KEY).filter(|n| !n.is_empty());
        CookView {
            session,
            recipe_name,
            video_id: None,
            error: None,
        }
    }

    pub fn recipe_name(&self) -> Option<&str> {
        self.recipe_name.as_deref()
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn embed_url(&self) -> Option<String> {
        self.video_id.as_deref().map(embed_url)
    }

    pub fn watch_url(&self) -> Option<String> {
        self.video_id.as_deref().map(watch_url)
    }

    /// True when the failure is a missing video-search credential on the server
    pub fn needs_setup(&self) -> bool {
        self.error
            .as_deref()
            .map_or(false, |e| e.contains(MISSING_KEY_MARKER))
    }

    /// Search for a tutorial video for the stored recipe title.
    pub async fn load(&mut self, client: &ChefClient) {
        // re-read in case a recipe was generated since construction
        if let Some(name) = self.session.get(RECIPE_TITLE_KEY).filter(|n| !n.is_empty()) {
            self.recipe_name = Some(name);
        }

        let Some(name) = self.recipe_name.clone() else {
            self.error = Some(NO_RECIPE_MESSAGE.to_string());
            return;
        };

        self.error = None;
        self.video_id = None;
        match client.search_video(&tutorial_query(&name)).await {
            Ok(video_id) => self.video_id = Some(video_id),
            Err(err) => {
                warn!("Video search for '{}' failed: {}", name, err);
                self.error = Some(match err {
                    ChefError::Network(_) => SEARCH_CONNECT_ERROR_MESSAGE.to_string(),
                    ChefError::Rejected { message, .. } if !message.is_empty() => message,
                    ChefError::Rejected { .. } => NO_VIDEO_MESSAGE.to_string(),
                    other => other.to_string(),
                });
            }
        }
    }
}
