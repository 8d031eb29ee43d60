//! Client for any endpoint speaking the OpenAI chat completions protocol.
//!
//! The default configuration targets Gemini's OpenAI-compatible surface, but
//! OpenAI itself, Ollama, and other compatible gateways work the same way.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use stockroom_core::config::LlmConfig;
use tracing::{debug, warn};

use crate::chat::{ChatRequest, ChatResponse};
use crate::llm::{LlmClient, LlmError};

const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    client: Client,
    endpoint: String,
    api_key: SecretString,
    max_retries: u32,
    retry_backoff: Duration,
}

impl OpenAiCompatibleClient {
    pub fn new(
        base_url: &str,
        api_key: SecretString,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build().map_err(LlmError::ClientBuild)?;
        Ok(Self {
            client,
            endpoint: chat_completions_endpoint(base_url),
            api_key,
            max_retries,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key.clone().ok_or(LlmError::MissingApiKey)?;
        Self::new(
            &config.base_url,
            api_key,
            Duration::from_secs(config.timeout_secs),
            config.max_retries,
        )
    }

    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_once(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(
            event_name = "llm.response.received",
            status = status.as_u16(),
            body_len = body.len(),
            "chat completion response received"
        );

        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|error| LlmError::Decode(error.to_string()))
    }
}

#[async_trait]
impl LlmClient for OpenAiCompatibleClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let mut attempt: u32 = 0;
        loop {
            match self.send_once(request).await {
                Ok(response) => return Ok(response),
                Err(error) if error.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        event_name = "llm.request.retry",
                        attempt,
                        max_retries = self.max_retries,
                        error = %error,
                        "retrying chat completion request"
                    );
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

fn chat_completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim().trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::chat::{ChatRequest, Message};
    use crate::llm::{LlmClient, LlmError};
    use crate::openai::{chat_completions_endpoint, OpenAiCompatibleClient};

    fn client(server: &MockServer, max_retries: u32) -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::new(
            &format!("{}/v1beta/openai/", server.uri()),
            "test-key".to_string().into(),
            Duration::from_secs(5),
            max_retries,
        )
        .expect("client")
        .with_retry_backoff(Duration::from_millis(1))
    }

    fn request() -> ChatRequest {
        ChatRequest {
            model: "gemini-2.5-flash".to_string(),
            messages: vec![Message::user("list the inventory")],
            tools: Vec::new(),
            tool_choice: None,
        }
    }

    fn final_answer() -> serde_json::Value {
        json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Inventory is empty."}}]
        })
    }

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        assert_eq!(
            chat_completions_endpoint("https://generativelanguage.googleapis.com/v1beta/openai/"),
            "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
        );
        assert_eq!(
            chat_completions_endpoint("http://localhost:11434/v1"),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn sends_bearer_auth_and_decodes_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/openai/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({"model": "gemini-2.5-flash"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(final_answer()))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server, 0).complete(&request()).await.expect("completion");
        let message = response.first_message().expect("message");
        assert_eq!(message.content.as_deref(), Some("Inventory is empty."));
    }

    #[tokio::test]
    async fn retries_server_errors_until_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(final_answer()))
            .mount(&server)
            .await;

        let response = client(&server, 2).complete(&request()).await.expect("completion");
        assert_eq!(response.choices.len(), 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(3)
            .mount(&server)
            .await;

        let error = client(&server, 2).complete(&request()).await.expect_err("should fail");
        assert!(matches!(error, LlmError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .expect(1)
            .mount(&server)
            .await;

        let error = client(&server, 3).complete(&request()).await.expect_err("should fail");
        match error {
            LlmError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let error = client(&server, 1).complete(&request()).await.expect_err("should fail");
        assert!(matches!(error, LlmError::Decode(_)));
    }
}
