use std::time::Duration;

use reqwest::Client;
use serde_json::Value as JsonValue;

use crate::error::Result;

/// Short aliases accepted in chat requests, mapped to full OpenRouter ids.
pub const AVAILABLE_MODELS: &[(&str, &str)] = &[
    ("deepseek", "deepseek/deepseek-chat"),
    ("llama", "meta-llama/llama-3.1-70b-instruct"),
    ("claude", "anthropic/claude-3.5-sonnet"),
    ("gemini", "google/gemini-pro-1.5"),
];

pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";

/// Single-shot relay to the upstream chat-completion API. The interview
/// flow never goes through here.
#[derive(Clone)]
pub struct ChatService {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ChatService {
    pub fn new(api_url: String, api_key: String, client: Client) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    /// Expands a short alias to its full model id; unknown names are passed
    /// through unchanged so callers can address any upstream model.
    pub fn resolve_model(model: Option<&str>) -> String {
        let requested = match model {
            Some(m) if !m.trim().is_empty() => m,
            _ => return DEFAULT_MODEL.to_string(),
        };
        AVAILABLE_MODELS
            .iter()
            .find(|(alias, _)| *alias == requested)
            .map(|(_, full)| full.to_string())
            .unwrap_or_else(|| requested.to_string())
    }

    pub async fn complete(&self, message: &str, model: &str) -> Result<String> {
        let payload = serde_json::json!({
            "model": model,
            "messages": [
                {"role": "user", "content": message}
            ],
            "max_tokens": 1000,
            "temperature": 0.7
        });

        let res = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", "http://localhost:8000")
            .header("X-Title", "Interview Chat Backend")
            .json(&payload)
            .timeout(Duration::from_secs(30))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("OpenRouter API error {}: {}", status, text).into());
        }

        let body: JsonValue = res.json().await?;
        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Invalid response format from OpenRouter").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_aliases_expand_to_full_ids() {
        assert_eq!(
            ChatService::resolve_model(Some("claude")),
            "anthropic/claude-3.5-sonnet"
        );
        assert_eq!(
            ChatService::resolve_model(Some("deepseek")),
            "deepseek/deepseek-chat"
        );
    }

    #[test]
    fn unknown_models_pass_through() {
        assert_eq!(
            ChatService::resolve_model(Some("mistralai/mistral-large")),
            "mistralai/mistral-large"
        );
    }

    #[test]
    fn missing_or_blank_model_uses_default() {
        assert_eq!(ChatService::resolve_model(None), DEFAULT_MODEL);
        assert_eq!(ChatService::resolve_model(Some("  ")), DEFAULT_MODEL);
    }
}
