use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use log::info;
use serde_json::Value;

use super::AppState;
use crate::error::ChefError;
use crate::model::{DiscoverResponse, ErrorEnvelope, GenerateResponse, HealthResponse, VideoSearchResponse};
use crate::providers::{
    build_recipe_prompt, GoogleProvider, LlmProvider, YouTubeProvider, DEFAULT_DISCOVER_RESULTS,
};

pub const HEALTH_MESSAGE: &str = "Chef Claude server is running";

const NO_VIDEOS_MESSAGE: &str = "No cooking videos found for this recipe";

/// Bodies that are not JSON are treated like an empty object, so the
/// per-field validation produces the error.
fn parse_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn parse_ingredients(body: &Value) -> Result<Vec<String>, ChefError> {
    let invalid = || ChefError::InvalidRequest("ingredients array is required".to_string());

    body.get("ingredients")
        .and_then(Value::as_array)
        .ok_or_else(invalid)?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

fn parse_query(body: &Value) -> Result<String, ChefError> {
    body.get("query")
        .and_then(Value::as_str)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ChefError::InvalidRequest("search query is required".to_string()))
}

fn parse_max_results(body: &Value) -> Result<u32, ChefError> {
    match body.get("maxResults") {
        None | Some(Value::Null) => Ok(DEFAULT_DISCOVER_RESULTS),
        Some(value) => value
            .as_u64()
            .map(|n| n.min(u32::MAX as u64) as u32)
            .ok_or_else(|| {
                ChefError::InvalidRequest("maxResults must be a non-negative integer".to_string())
            }),
    }
}

/// `POST /api/generate`
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ChefError> {
    let ingredients = parse_ingredients(&parse_body(&body))?;
    let provider = GoogleProvider::new(&state.config, state.client.clone())?;

    info!("Generating recipe for ingredients: {}", ingredients.join(", "));
    let recipe = provider.generate(&build_recipe_prompt(&ingredients)).await?;
    info!("Recipe generated successfully");

    Ok(Json(GenerateResponse {
        success: true,
        recipe,
    }))
}

/// `POST /api/youtube-search`
///
/// An empty search is a valid outcome and answers 200 with `success: false`.
pub async fn youtube_search(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ChefError> {
    let query = parse_query(&parse_body(&body))?;
    let provider = YouTubeProvider::new(&state.config, state.client.clone())?;

    info!("Searching YouTube for: {}", query);
    match provider.search_one(&query).await? {
        Some(video_id) => {
            info!("Found YouTube video: {}", video_id);
            Ok(Json(VideoSearchResponse {
                success: true,
                video_id,
            })
            .into_response())
        }
        None => Ok(Json(ErrorEnvelope::new(NO_VIDEOS_MESSAGE)).into_response()),
    }
}

/// `POST /api/youtube-discover`
pub async fn youtube_discover(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DiscoverResponse>, ChefError> {
    let body = parse_body(&body);
    let query = parse_query(&body)?;
    let max_results = parse_max_results(&body)?;
    let provider = YouTubeProvider::new(&state.config, state.client.clone())?;

    info!("Discover: searching YouTube for: {} (max: {})", query, max_results);
    let videos = provider.discover(&query, max_results).await?;
    info!("Discover: found {} videos", videos.len());

    Ok(Json(DiscoverResponse {
        success: true,
        videos,
    }))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: HEALTH_MESSAGE.to_string(),
    })
}
