use crate::config::ServerConfig;
use crate::error::ChefError;
use crate::providers::{upstream_error, LlmProvider};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub struct GoogleProvider {
    client: Client,
    base_url: String,
    api_version: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ServerConfig, client: Client) -> Result<Self, ChefError> {
        let api_key = config.gemini_key().ok_or_else(|| {
            error!("GEMINI_API_KEY not found in environment variables");
            ChefError::Configuration("API key not configured".to_string())
        })?;

        Ok(GoogleProvider {
            client,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            api_version: config.gemini_api_version.clone(),
            model: config.gemini_model.clone(),
            api_key: api_key.to_string(),
            timeout: config.generate_timeout(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, self.api_version, self.model
        )
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ChefError> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .timeout(self.timeout)
            .json(&json!({
                "contents": [{
                    "parts": [{
                        "text": prompt
                    }]
                }]
            }))
            .send()
            .await
            .map_err(|e| ChefError::transport("generating recipe", e))?;

        if !response.status().is_success() {
            return Err(upstream_error("Gemini", response).await);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ChefError::transport("generating recipe", e))?;
        debug!("Google Gemini response: {:?}", body);

        body.into_text().ok_or_else(|| ChefError::Upstream {
            status: 502,
            message: "Gemini API error: response contained no recipe text".to_string(),
        })
    }
}
