use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Settings;
use crate::error::{ConfigurationError, ServiceError};

/// Something that turns instruction text into generated text
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError>;
}

#[async_trait]
impl<'a, T: CompletionService + ?Sized> CompletionService for &'a T {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        (**self).complete(prompt).await
    }
}

/// Client for an OpenAI-compatible chat completions API
pub struct OpenAiClient {
    client: Client,
    settings: Settings,
}

impl OpenAiClient {
    pub fn new(settings: Settings) -> Result<Self, ConfigurationError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ConfigurationError::InvalidSetting {
                name: "http_client",
                reason: e.to_string(),
            })?;

        Ok(Self { client, settings })
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        let request = ChatRequest {
            model: &self.settings.model,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        debug!(model = %self.settings.model, "Sending completion request");

        let response = self
            .client
            .post(self.settings.completions_url())
            .bearer_auth(self.settings.api_key.expose())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, body));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        // String output parsing: the first choice's message text
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ServiceError::MalformedResponse("no text content in response".to_string()))
    }
}

fn classify_status(status: StatusCode, body: String) -> ServiceError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ServiceError::Authentication {
            status: status.as_u16(),
            body,
        },
        StatusCode::TOO_MANY_REQUESTS => ServiceError::RateLimited(body),
        _ => ServiceError::Api {
            status: status.as_u16(),
            body,
        },
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, String::new()),
            ServiceError::Authentication { status: 401, .. }
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, String::new()),
            ServiceError::Authentication { status: 403, .. }
        ));
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "quota".to_string()),
            ServiceError::RateLimited("quota".to_string())
        );
        assert_eq!(
            classify_status(StatusCode::BAD_GATEWAY, "upstream".to_string()),
            ServiceError::Api {
                status: 502,
                body: "upstream".to_string()
            }
        );
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo",
            temperature: 0.7,
            max_tokens: None,
            messages: vec![Message {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-3.5-turbo",
                "temperature": 0.7,
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }

    #[test]
    fn test_response_parsing_tolerates_null_content() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":null}}]}"#,
        )
        .unwrap();
        assert_eq!(response.choices[0].message.content, None);
    }
}
