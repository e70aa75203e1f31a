use service_core::observability::init_tracing;
use story_service::config::StoryConfig;
use story_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing; OTLP export only when a collector is configured
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("story-service", "info", otlp_endpoint.as_deref());

    let config = StoryConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    if config.anthropic.api_key.is_none() {
        tracing::warn!(
            "ANTHROPIC_API_KEY is not set; story generation will fail until it is configured"
        );
    }

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!("Story service listening on port {}", app.port());

    app.run_until_stopped().await
}
