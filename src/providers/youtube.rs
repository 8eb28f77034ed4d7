use crate::config::ServerConfig;
use crate::error::ChefError;
use crate::model::Video;
use crate::providers::upstream_error;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Number of discover results returned when the caller does not ask for a count
pub const DEFAULT_DISCOVER_RESULTS: u32 = 12;
/// Hard cap on discover results regardless of the requested count
pub const MAX_DISCOVER_RESULTS: u32 = 20;

/// YouTube category 26 = Howto & Style (includes cooking)
const HOWTO_CATEGORY_ID: &str = "26";

pub struct YouTubeProvider {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: Option<ItemId>,
    #[serde(default)]
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    #[serde(default)]
    description: String,
    channel_title: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

fn malformed(what: &str) -> ChefError {
    error!("YouTube search result without {}", what);
    ChefError::Upstream {
        status: 502,
        message: format!("YouTube API error: search result without {}", what),
    }
}

impl SearchItem {
    fn video_id(&mut self) -> Result<String, ChefError> {
        self.id
            .take()
            .and_then(|id| id.video_id)
            .ok_or_else(|| malformed("a video id"))
    }

    fn into_video(mut self) -> Result<Video, ChefError> {
        let video_id = self.video_id()?;
        let snippet = self.snippet.ok_or_else(|| malformed("a snippet"))?;
        let thumbnail = snippet
            .thumbnails
            .and_then(|t| t.medium)
            .map(|t| t.url)
            .ok_or_else(|| malformed("a medium thumbnail"))?;

        Ok(Video {
            video_id,
            title: snippet.title.ok_or_else(|| malformed("a title"))?,
            thumbnail,
            channel_title: snippet
                .channel_title
                .ok_or_else(|| malformed("a channel title"))?,
            description: snippet.description,
        })
    }
}

impl YouTubeProvider {
    /// Create a new YouTube Data API provider from configuration
    pub fn new(config: &ServerConfig, client: Client) -> Result<Self, ChefError> {
        let api_key = config.youtube_key().ok_or_else(|| {
            error!("YOUTUBE_API_KEY not found in environment variables");
            ChefError::Configuration("YouTube API key not configured".to_string())
        })?;

        Ok(YouTubeProvider {
            client,
            base_url: config.youtube_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout: config.search_timeout(),
        })
    }

    /// Find the single most relevant HD video for `query`.
    ///
    /// Returns `Ok(None)` when the search produced no results.
    pub async fn search_one(&self, query: &str) -> Result<Option<String>, ChefError> {
        let items = self
            .search(query, 1, &[], "searching YouTube")
            .await?;

        match items.into_iter().next() {
            Some(mut item) => Ok(Some(item.video_id()?)),
            None => Ok(None),
        }
    }

    /// Fetch up to `max_results` short how-to videos for `query`.
    ///
    /// The count is capped at [`MAX_DISCOVER_RESULTS`].
    pub async fn discover(&self, query: &str, max_results: u32) -> Result<Vec<Video>, ChefError> {
        let max_results = max_results.clamp(1, MAX_DISCOVER_RESULTS);
        let items = self
            .search(
                query,
                max_results,
                &[
                    ("videoDuration", "short"),
                    ("videoCategoryId", HOWTO_CATEGORY_ID),
                ],
                "fetching discover videos",
            )
            .await?;

        items.into_iter().map(SearchItem::into_video).collect()
    }

    async fn search(
        &self,
        query: &str,
        max_results: u32,
        extra: &[(&str, &str)],
        action: &str,
    ) -> Result<Vec<SearchItem>, ChefError> {
        let max_results = max_results.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("key", self.api_key.as_str()),
            ("q", query),
            ("part", "snippet"),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
            ("order", "relevance"),
            ("videoDefinition", "high"),
            ("safeSearch", "strict"),
        ];
        params.extend_from_slice(extra);

        let response = self
            .client
            .get(format!("{}/youtube/v3/search", self.base_url))
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ChefError::transport(action, e))?;

        if !response.status().is_success() {
            return Err(upstream_error("YouTube", response).await);
        }

        let body: SearchListResponse = response
            .json()
            .await
            .map_err(|e| ChefError::transport(action, e))?;
        debug!("YouTube search returned {} items", body.items.len());

        Ok(body.items)
    }
}
