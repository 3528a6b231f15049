//! External service clients
//!
//! The content generator talks to a text-generation service through the
//! [`TextGenerator`] trait so tests can substitute a scripted double.

pub mod openai_client;
pub mod text_generator;

pub use openai_client::OpenAiClient;
pub use text_generator::{
    CompletionPrompt, TextGenerationError, TextGenerator, UnconfiguredTextGenerator,
};

use std::sync::Arc;

use mpd_common::config::AiConfig;

/// Pick the text generator for a configuration
///
/// Without an API key every completion fails with `NotConfigured`, which the
/// content generator turns into its fallback payload.
pub fn text_generator_from_config(
    config: &AiConfig,
) -> Result<Arc<dyn TextGenerator>, TextGenerationError> {
    match config.usable_api_key() {
        Some(_) => Ok(Arc::new(OpenAiClient::new(config)?)),
        None => {
            tracing::warn!(
                "No AI API key configured; content generation will use fallback payloads"
            );
            Ok(Arc::new(UnconfiguredTextGenerator))
        }
    }
}
