//! Client for the proxy's HTTP surface, as used by the views.

use log::{debug, error};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::error::ChefError;
use crate::model::{
    DiscoverResponse, GenerateResponse, HealthResponse, Video, VideoSearchResponse,
};

pub struct ChefClient {
    client: Client,
    base_url: String,
}

impl ChefClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ChefError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ChefError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(ChefClient {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ChefError> {
        Self::new(&ClientConfig {
            server_url: base_url.into(),
        })
    }

    /// Ask the proxy for a recipe using these ingredients
    pub async fn generate_recipe(&self, ingredients: &[String]) -> Result<String, ChefError> {
        let response: GenerateResponse = self
            .post("/api/generate", json!({ "ingredients": ingredients }))
            .await?;
        Ok(response.recipe)
    }

    /// Find a single tutorial video id for the query
    pub async fn search_video(&self, query: &str) -> Result<String, ChefError> {
        let response: VideoSearchResponse = self
            .post("/api/youtube-search", json!({ "query": query }))
            .await?;
        Ok(response.video_id)
    }

    /// Fetch a page of short cooking videos
    pub async fn discover(&self, query: &str, max_results: u32) -> Result<Vec<Video>, ChefError> {
        let response: DiscoverResponse = self
            .post(
                "/api/youtube-discover",
                json!({ "query": query, "maxResults": max_results }),
            )
            .await?;
        Ok(response.videos)
    }

    pub async fn health(&self) -> Result<HealthResponse, ChefError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(network_error)?;
        response.json().await.map_err(network_error)
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, ChefError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let envelope: Value = response.json().await.map_err(network_error)?;

        if envelope["success"].as_bool() == Some(true) {
            return serde_json::from_value(envelope).map_err(|e| ChefError::Rejected {
                status,
                message: format!("Unexpected response from server: {}", e),
            });
        }

        let message = envelope["error"]
            .as_str()
            .unwrap_or("Request failed")
            .to_string();
        Err(ChefError::Rejected { status, message })
    }
}

fn network_error(err: reqwest::Error) -> ChefError {
    error!("Error calling chef server: {}", err);
    ChefError::Network(err.to_string())
}
