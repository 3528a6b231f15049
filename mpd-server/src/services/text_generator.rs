//! Text generation seam

use async_trait::async_trait;
use thiserror::Error;

/// Text generation failures
///
/// None of these reach an HTTP caller: the content generator answers every
/// one of them with its fallback payload.
#[derive(Debug, Error)]
pub enum TextGenerationError {
    #[error("Text generation is not configured (no API key)")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Completion contained no text")]
    EmptyResponse,

    #[error("Request timed out after {0} s")]
    TimedOut(u64),
}

/// Prompt for one completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionPrompt {
    /// Framing instructions for the model
    pub system: String,
    /// The request itself
    pub user: String,
    /// Upper bound on the response size
    pub max_tokens: u32,
}

/// External text-generation service
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Service identifier for logging (e.g., "openai")
    fn name(&self) -> &'static str;

    /// Generate text for a prompt (single attempt)
    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, TextGenerationError>;
}

/// Generator used when no service is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredTextGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredTextGenerator {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    async fn complete(&self, _prompt: &CompletionPrompt) -> Result<String, TextGenerationError> {
        Err(TextGenerationError::NotConfigured)
    }
}
