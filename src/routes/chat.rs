use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::dto::chat_dto::{ChatRequest, ChatResponse, ModelsResponse};
use crate::services::chat_service::{ChatService, AVAILABLE_MODELS, DEFAULT_MODEL};
use crate::AppState;

#[axum::debug_handler]
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;

    let model = ChatService::resolve_model(req.model.as_deref());
    tracing::info!(model = %model, "forwarding chat message upstream");
    let response = state.chat_service.complete(&req.message, &model).await?;

    Ok(Json(ChatResponse {
        response,
        model_used: model,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn list_models() -> crate::error::Result<Response> {
    let available_models = AVAILABLE_MODELS
        .iter()
        .map(|(alias, full)| (alias.to_string(), full.to_string()))
        .collect();
    Ok(Json(ModelsResponse {
        available_models,
        default_model: DEFAULT_MODEL.to_string(),
    })
    .into_response())
}
