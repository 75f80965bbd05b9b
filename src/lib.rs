pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use reqwest::Client;

use crate::models::category::QuestionCatalog;
use crate::services::{
    chat_service::ChatService, interview_service::InterviewService,
    session_service::SessionService,
};

#[derive(Clone)]
pub struct AppState {
    pub interview_service: InterviewService,
    pub chat_service: ChatService,
}

impl AppState {
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap();

        let interview_service = InterviewService::new(catalog, SessionService::new());
        let chat_service = ChatService::new(
            config.openrouter_api_url.clone(),
            config.openrouter_api_key.clone(),
            http_client,
        );

        Self {
            interview_service,
            chat_service,
        }
    }
}
