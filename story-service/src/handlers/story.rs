use crate::models::StoryResponse;
use crate::services::{generate_with_fallback, validate};
use crate::services::prompt::build_prompt;
use crate::startup::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use service_core::error::AppError;

/// Handle `POST /story`: validate the payload, build the prompt, and run it
/// through the candidate models.
pub async fn create_story(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StoryResponse>, AppError> {
    let raw: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Request body must be valid JSON")))?;

    let input = validate(&raw)?;
    let prompt = build_prompt(&input);
    let candidates = state.config.candidate_models();

    tracing::info!(
        name_count = input.names.len(),
        has_team_name = input.team_name.is_some(),
        "Generating story"
    );

    let story = generate_with_fallback(state.text_provider.as_ref(), &prompt, &candidates).await?;

    Ok(Json(StoryResponse { story }))
}

/// Plain `OPTIONS /story` outside a CORS preflight still answers 200; the
/// CORS layer decorates the response with the shared headers.
pub async fn story_preflight() -> StatusCode {
    StatusCode::OK
}
