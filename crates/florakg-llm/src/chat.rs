//! OpenAI-compatible chat-completion client.
//!
//! Talks to `{base_url}/chat/completions`. The default endpoint is Groq's
//! OpenAI-compatible API. Requests are bounded by the configured timeout and
//! never retried.

use std::time::Duration;

use async_trait::async_trait;
use florakg_core::completion::{CompletionRequest, CompletionService};
use florakg_core::config::LlmConfig;
use florakg_core::error::CompletionError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Chat-completion client.
#[derive(Clone)]
pub struct ChatClient {
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl ChatClient {
    /// Create a client from config. Fails when no API key is configured.
    pub fn new(config: &LlmConfig) -> Result<Self, CompletionError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(CompletionError::NotConfigured)?
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| CompletionError::Transport(e.without_url().to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            client,
        })
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl CompletionService for ChatClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let user = request.user_message();
        let body = self.body(request, &user);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %detail, "Completion API error");
            return Err(status_error(status));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.without_url().to_string()))?;

        let content = extract_content(parsed)?;
        debug!(model = %self.model, chars = content.chars().count(), "Received completion");
        Ok(content)
    }
}

fn transport_error(e: reqwest::Error) -> CompletionError {
    if e.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Transport(e.without_url().to_string())
    }
}

/// Map a non-success HTTP status to the completion error taxonomy.
fn status_error(status: StatusCode) -> CompletionError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => CompletionError::Timeout,
        other => CompletionError::Http {
            status: other.as_u16(),
        },
    }
}

fn extract_content(response: ChatResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| CompletionError::InvalidResponse("no choices in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>) -> LlmConfig {
        LlmConfig {
            api_key: key.map(str::to_string),
            base_url: "https://api.groq.com/openai/v1/".to_string(),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_requires_api_key() {
        assert!(matches!(ChatClient::new(&config(None)), Err(CompletionError::NotConfigured)));
        assert!(matches!(ChatClient::new(&config(Some("  "))), Err(CompletionError::NotConfigured)));
        let client = ChatClient::new(&config(Some("gsk_x"))).unwrap();
        assert_eq!(client.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(client.model(), "llama3-8b-8192");
    }

    #[test]
    fn test_request_body() {
        let client = ChatClient::new(&config(Some("gsk_x"))).unwrap();
        let request = CompletionRequest {
            system: "只依据已知信息作答。".to_string(),
            context: "名称：梅".to_string(),
            question: "梅的象征？".to_string(),
            max_tokens: 200,
        };
        let user = request.user_message();
        let body = serde_json::to_value(client.body(&request, &user)).unwrap();

        assert_eq!(body["model"], "llama3-8b-8192");
        assert_eq!(body["max_tokens"], 200);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert!(body["messages"][1]["content"].as_str().unwrap().contains("名称：梅"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_error(StatusCode::UNAUTHORIZED), CompletionError::Unauthorized);
        assert_eq!(status_error(StatusCode::TOO_MANY_REQUESTS), CompletionError::RateLimited);
        assert_eq!(
            status_error(StatusCode::BAD_GATEWAY),
            CompletionError::Http { status: 502 }
        );
    }

    #[test]
    fn test_extract_content() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"梅象征高洁。"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(parsed).unwrap(), "梅象征高洁。");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(extract_content(empty), Err(CompletionError::InvalidResponse(_))));
    }
}
