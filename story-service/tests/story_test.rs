//! Integration tests for the story endpoint.
//!
//! These tests spawn the app on a random port with a scripted mock provider,
//! so no network access or API credential is required.
//! Run with: cargo test -p story-service --test story_test

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use story_service::config::{StoryConfig, DEFAULT_TEXT_MODEL};
use story_service::services::providers::mock::{MockBehavior, MockTextProvider};
use story_service::services::providers::{ContentBlock, TextProvider};
use story_service::startup::Application;

/// Spawn the application with the given provider and return the port number.
async fn spawn_app(provider: Arc<dyn TextProvider>) -> u16 {
    std::env::set_var("APP__PORT", "0"); // Random port
    std::env::remove_var("STORY_MODEL");

    let config = StoryConfig::load().expect("Failed to load config");
    let app = Application::build_with_provider(config, provider)
        .await
        .expect("Failed to build application");

    let port = app.port();

    // Spawn the server in the background
    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn post_story_returns_generated_text() {
    let port = spawn_app(Arc::new(MockTextProvider::replying("A festive deploy."))).await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/story", port))
        .header("origin", "http://example.com")
        .json(&serde_json::json!({ "teamName": "Platform", "names": ["Ann", "Bo"] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["story"], "A festive deploy.");
}

#[tokio::test]
async fn post_story_rejects_invalid_json() {
    let port = spawn_app(Arc::new(MockTextProvider::replying("unused"))).await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/story", port))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Request body must be valid JSON");
}

#[tokio::test]
async fn post_story_rejects_missing_names() {
    let port = spawn_app(Arc::new(MockTextProvider::replying("unused"))).await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/story", port))
        .json(&serde_json::json!({ "teamName": "Platform" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].as_str().unwrap().contains("'names'"));
}

#[tokio::test]
async fn post_story_rejects_too_many_names() {
    let port = spawn_app(Arc::new(MockTextProvider::replying("unused"))).await;
    let client = Client::new();

    let names: Vec<String> = (0..26).map(|i| format!("Person{}", i)).collect();
    let response = client
        .post(format!("http://localhost:{}/story", port))
        .json(&serde_json::json!({ "names": names }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].as_str().unwrap().contains("at most 25"));
}

#[tokio::test]
async fn options_story_answers_preflight_with_cors_headers() {
    let port = spawn_app(Arc::new(MockTextProvider::replying("unused"))).await;
    let client = Client::new();

    let response = client
        .request(
            reqwest::Method::OPTIONS,
            format!("http://localhost:{}/story", port),
        )
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let headers = response.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let allow_methods = headers
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(allow_methods.contains("POST"));
}

#[tokio::test]
async fn post_story_without_credential_returns_configuration_error() {
    // Build with the real provider and no credential configured.
    std::env::remove_var("ANTHROPIC_API_KEY");
    std::env::set_var("APP__PORT", "0");

    let config = StoryConfig::load().expect("Failed to load config");
    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    let port = app.port();
    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = Client::new();
    let response = client
        .post(format!("http://localhost:{}/story", port))
        .json(&serde_json::json!({ "names": ["Ann"] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn post_story_with_only_non_text_output_returns_error() {
    let provider = MockTextProvider::new()
        .with_behavior(DEFAULT_TEXT_MODEL, MockBehavior::Reply(vec![ContentBlock::Other]));
    let port = spawn_app(Arc::new(provider)).await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/story", port))
        .json(&serde_json::json!({ "names": ["Ann"] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].as_str().unwrap().contains("no usable text"));
}

#[tokio::test]
async fn post_story_surfaces_upstream_failure_detail() {
    let provider = MockTextProvider::new().with_behavior(
        DEFAULT_TEXT_MODEL,
        MockBehavior::Fail("Anthropic API error 529: overloaded".to_string()),
    );
    let port = spawn_app(Arc::new(provider)).await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/story", port))
        .json(&serde_json::json!({ "names": ["Ann"] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].as_str().unwrap().contains("overloaded"));
}
