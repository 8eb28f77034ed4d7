use serde::{Deserialize, Serialize};

/// Failure half of the `{success, ...}` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorEnvelope {
            success: false,
            error: error.into(),
        }
    }
}

/// Response of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub recipe: String,
}

/// Response of `POST /api/youtube-search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSearchResponse {
    pub success: bool,
    pub video_id: String,
}

/// Response of `POST /api/youtube-discover`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub success: bool,
    pub videos: Vec<Video>,
}

/// A cooking video as presented to the client
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub thumbnail: String,
    pub channel_title: String,
    pub description: String,
}

impl Video {
    pub fn embed_url(&self) -> String {
        embed_url(&self.video_id)
    }

    pub fn watch_url(&self) -> String {
        watch_url(&self.video_id)
    }
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
