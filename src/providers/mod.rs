/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for various LLM providers:
 * - OpenAI: OpenAI API integration, also used for LM Studio
 * - Anthropic: Anthropic API integration
 * - Ollama: Local LLM server
 * - Mock: In-process provider for tests
 */

use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

pub mod anthropic;
pub mod mock;
pub mod ollama;
pub mod openai;

/// A single translation request as sent to a provider
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Fixed instruction framing the task
    pub system_prompt: String,
    /// Text to translate
    pub text: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
}

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the translator.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a request and return the generated text
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The text produced by the provider or an error
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Build the client for the provider selected in the configuration
pub fn create_provider(config: &TranslationConfig) -> Result<Arc<dyn Provider>> {
    let timeout_secs = config.timeout_secs();
    let provider: Arc<dyn Provider> = match config.provider {
        TranslationProvider::OpenAI | TranslationProvider::LMStudio => Arc::new(openai::OpenAI::new(
            config.get_api_key(),
            config.get_endpoint(),
            config.get_model(),
            timeout_secs,
        )),
        TranslationProvider::Anthropic => Arc::new(anthropic::Anthropic::new(
            config.get_api_key(),
            config.get_endpoint(),
            config.get_model(),
            timeout_secs,
        )),
        TranslationProvider::Ollama => Arc::new(ollama::Ollama::new(
            config.get_endpoint(),
            config.get_model(),
            timeout_secs,
        )),
    };
    Ok(provider)
}
