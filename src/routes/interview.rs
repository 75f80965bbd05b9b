use axum::{
    extract::State,
    response::{IntoResponse, Json, Redirect, Response},
};
use validator::Validate;

use crate::dto::interview_dto::{MessageRequest, MessageResponse};
use crate::AppState;

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<MessageRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;

    let answer = state
        .interview_service
        .handle_message(&req.user_id, &req.message)
        .await;

    Ok(Json(MessageResponse { answer }).into_response())
}

#[axum::debug_handler]
pub async fn start() -> Redirect {
    Redirect::to("/chat")
}
