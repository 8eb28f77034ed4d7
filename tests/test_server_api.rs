use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chef_proxy::{build_router, AppState, ServerConfig};
use mockito::Matcher;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

fn app(config: ServerConfig) -> Router {
    build_router(AppState::new(config).unwrap())
}

fn configured(server_url: &str) -> ServerConfig {
    ServerConfig {
        gemini_api_key: Some("gemini-key".to_string()),
        youtube_api_key: Some("yt-key".to_string()),
        gemini_base_url: server_url.to_string(),
        youtube_base_url: server_url.to_string(),
        ..Default::default()
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    (status, serde_json::from_slice(&bytes).expect("Should parse JSON"))
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(app(ServerConfig::default()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Chef Claude server is running");
}

#[tokio::test]
async fn test_generate_rejects_non_array_ingredients() {
    let (status, body) = call(
        app(ServerConfig::default()),
        post_json("/api/generate", json!({"ingredients": "not-an-array"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid request: ingredients array is required");
}

#[tokio::test]
async fn test_generate_rejects_missing_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(app(ServerConfig::default()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_generate_without_credential_skips_upstream() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = ServerConfig {
        gemini_base_url: server.url(),
        ..Default::default()
    };
    let (status, body) = call(
        app(config),
        post_json("/api/generate", json!({"ingredients": ["rice"]})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Server configuration error: API key not configured"
    );
    upstream.assert_async().await;
}

#[tokio::test]
async fn test_generate_success() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/models/gemini-2.5-flash:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "gemini-key".into()))
        .match_body(Matcher::Regex("rice, tomato".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{"content": {"parts": [{"text": "# Jollof Rice\n1. Cook rice"}]}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (status, body) = call(
        app(configured(&server.url())),
        post_json("/api/generate", json!({"ingredients": ["rice", "tomato"]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["recipe"], "# Jollof Rice\n1. Cook rice");
    upstream.assert_async().await;
}

#[tokio::test]
async fn test_generate_forwards_upstream_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/models/gemini-2.5-flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#)
        .create_async()
        .await;

    let (status, body) = call(
        app(configured(&server.url())),
        post_json("/api/generate", json!({"ingredients": ["egg"]})),
    )
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Gemini API error: Resource has been exhausted");
}

#[tokio::test]
async fn test_youtube_search_rejects_missing_query() {
    let (status, body) = call(
        app(ServerConfig::default()),
        post_json("/api/youtube-search", json!({"query": 42})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request: search query is required");
}

#[tokio::test]
async fn test_youtube_search_without_credential() {
    let (status, body) = call(
        app(ServerConfig::default()),
        post_json("/api/youtube-search", json!({"query": "soup"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Server configuration error: YouTube API key not configured"
    );
}

#[tokio::test]
async fn test_youtube_search_zero_results_is_not_an_http_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/youtube/v3/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"kind":"youtube#searchListResponse","items":[]}"#)
        .create_async()
        .await;

    let (status, body) = call(
        app(configured(&server.url())),
        post_json("/api/youtube-search", json!({"query": "unknown dish"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No cooking videos found for this recipe");
}

#[tokio::test]
async fn test_youtube_search_success() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/youtube/v3/search")
        .match_query(Matcher::UrlEncoded("q".into(), "pad thai".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items":[{"id":{"kind":"youtube#video","videoId":"dQw4"},"snippet":{"title":"Pad Thai"}}]}"#)
        .create_async()
        .await;

    let (status, body) = call(
        app(configured(&server.url())),
        post_json("/api/youtube-search", json!({"query": "pad thai"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "videoId": "dQw4"}));
}

#[tokio::test]
async fn test_youtube_endpoints_forward_upstream_status() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("GET", "/youtube/v3/search")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"code":403,"message":"quotaExceeded"}}"#)
        .expect(2)
        .create_async()
        .await;

    for uri in ["/api/youtube-search", "/api/youtube-discover"] {
        let (status, body) = call(
            app(configured(&server.url())),
            post_json(uri, json!({"query": "ramen"})),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "YouTube API error: quotaExceeded");
    }
    upstream.assert_async().await;
}

#[tokio::test]
async fn test_youtube_discover_rejects_incomplete_result() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/youtube/v3/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items":[{"id":{"videoId":"v1"},"snippet":{"title":"Ramen","channelTitle":"Chef"}}]}"#)
        .create_async()
        .await;

    let (status, body) = call(
        app(configured(&server.url())),
        post_json("/api/youtube-discover", json!({"query": "ramen"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_youtube_discover_defaults_and_empty_results() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("GET", "/youtube/v3/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("maxResults".into(), "12".into()),
            Matcher::UrlEncoded("videoDuration".into(), "short".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items":[]}"#)
        .create_async()
        .await;

    let (status, body) = call(
        app(configured(&server.url())),
        post_json("/api/youtube-discover", json!({"query": "shorts"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "videos": []}));
    upstream.assert_async().await;
}

#[tokio::test]
async fn test_youtube_discover_caps_max_results() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("GET", "/youtube/v3/search")
        .match_query(Matcher::UrlEncoded("maxResults".into(), "20".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"items":[{"id":{"videoId":"v9"},"snippet":{"title":"Dumplings",
                "channelTitle":"Chef","description":"fold",
                "thumbnails":{"medium":{"url":"https://i.ytimg.com/vi/v9/mqdefault.jpg"}}}}]}"#,
        )
        .create_async()
        .await;

    let (status, body) = call(
        app(configured(&server.url())),
        post_json("/api/youtube-discover", json!({"query": "dumplings", "maxResults": 100})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["videos"][0]["videoId"], "v9");
    assert_eq!(body["videos"][0]["channelTitle"], "Chef");
    assert_eq!(
        body["videos"][0]["thumbnail"],
        "https://i.ytimg.com/vi/v9/mqdefault.jpg"
    );
    upstream.assert_async().await;
}

#[tokio::test]
async fn test_cors_allows_configured_origin_only() {
    let preflight = |origin: &str| {
        Request::builder()
            .method("OPTIONS")
            .uri("/api/generate")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    };

    let response = app(ServerConfig::default())
        .oneshot(preflight("http://localhost:5173"))
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );

    let response = app(ServerConfig::default())
        .oneshot(preflight("http://evil.example"))
        .await
        .unwrap();
    let allowed = response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN);
    assert!(allowed.is_none(), "foreign origin was answered with {:?}", allowed);
}
