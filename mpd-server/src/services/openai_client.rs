//! OpenAI-compatible chat completion client
//!
//! Posts a single `chat/completions` request per call. No retry: a failed
//! call is answered by the content generator's fallback payload.

use async_trait::async_trait;
use mpd_common::config::AiConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::text_generator::{CompletionPrompt, TextGenerationError, TextGenerator};

const USER_AGENT: &str = concat!("mpd-server/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Chat completion client
pub struct OpenAiClient {
    http_client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    timeout_secs: u64,
}

impl OpenAiClient {
    pub fn new(config: &AiConfig) -> Result<Self, TextGenerationError> {
        let api_key = config
            .usable_api_key()
            .ok_or(TextGenerationError::NotConfigured)?
            .to_string();

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TextGenerationError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> TextGenerationError {
        if err.is_timeout() {
            TextGenerationError::TimedOut(self.timeout_secs)
        } else {
            TextGenerationError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, TextGenerationError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &prompt.system,
                },
                Message {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: prompt.max_tokens,
            temperature: self.temperature,
        };

        tracing::debug!(
            model = %self.model,
            max_tokens = prompt.max_tokens,
            "Requesting completion"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|body| body.error.message)
                .unwrap_or(error_text);
            return Err(TextGenerationError::Api(status.as_u16(), message));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| TextGenerationError::Parse(e.to_string()))?;

        completion_text(completion)
    }
}

fn completion_text(response: CompletionResponse) -> Result<String, TextGenerationError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(TextGenerationError::EmptyResponse)
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
