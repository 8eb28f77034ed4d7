mod google;
mod prompt;
mod youtube;

pub use google::GoogleProvider;
pub use prompt::{build_recipe_prompt, RECIPE_PROMPT_TEMPLATE};
pub use youtube::{YouTubeProvider, DEFAULT_DISCOVER_RESULTS, MAX_DISCOVER_RESULTS};

use async_trait::async_trait;
use log::error;
use serde_json::Value;

use crate::error::ChefError;

/// Unified trait for text generation providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Generate free-form text for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String, ChefError>;
}

/// Turn a non-2xx upstream response into an `Upstream` error.
///
/// The message comes from the upstream's own `error.message` when present,
/// otherwise from the HTTP status text.
pub(crate) async fn upstream_error(service: &str, response: reqwest::Response) -> ChefError {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    error!("{} API error status: {}", service, status.as_u16());
    error!("{} API error data: {}", service, body);

    let detail = body["error"]["message"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    ChefError::Upstream {
        status: status.as_u16(),
        message: format!("{} API error: {}", service, detail),
    }
}
