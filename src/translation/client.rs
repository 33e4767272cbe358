/*!
 * Translation client.
 *
 * Wraps a `Provider` with the fixed translation instruction, retries and the
 * run cache. `Translator::translate` never fails: whatever goes wrong, the
 * caller gets the original text back and a warning is logged.
 */

use anyhow::Result;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::{self, CompletionRequest, Provider};
use crate::syntax::NodeKind;

use super::cache::TranslationCache;

/// Options that apply to a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Produce markers instead of calling the backend, and write nothing
    pub dry_run: bool,
}

impl RunOptions {
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }
}

/// Where a text comes from, for diagnostics and dry-run markers
#[derive(Debug, Clone)]
pub struct TranslationContext {
    pub path: PathBuf,
    pub kind: NodeKind,
}

impl TranslationContext {
    pub fn new(path: impl AsRef<Path>, kind: NodeKind) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            kind,
        }
    }
}

/// Translates single text values through a provider
#[derive(Debug, Clone)]
pub struct Translator {
    provider: Arc<dyn Provider>,
    system_prompt: String,
    temperature: f32,
    max_tokens: u32,
    retry_count: u32,
    retry_backoff_ms: u64,
    // @field: Upper bound on requests in flight for one file
    concurrency: usize,
    cache: TranslationCache,
}

impl Translator {
    /// Create a translator with default settings around `provider`
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        let defaults = TranslationConfig::default();
        Self::with_settings(provider, &defaults)
    }

    /// Create a translator for the active provider of `config`
    pub fn from_config(config: &TranslationConfig) -> Result<Self> {
        let provider = providers::create_provider(config)?;
        Ok(Self::with_settings(provider, config))
    }

    /// Create a translator around `provider` using the settings of `config`
    pub fn with_settings(provider: Arc<dyn Provider>, config: &TranslationConfig) -> Self {
        Self {
            provider,
            system_prompt: config.common.system_prompt.clone(),
            temperature: config.common.temperature,
            max_tokens: config.max_tokens(),
            retry_count: config.common.retry_count,
            retry_backoff_ms: config.common.retry_backoff_ms,
            concurrency: config.concurrent_requests(),
            cache: TranslationCache::new(config.common.cache_enabled),
        }
    }

    /// Override the retry policy
    pub fn with_retries(mut self, retry_count: u32, retry_backoff_ms: u64) -> Self {
        self.retry_count = retry_count;
        self.retry_backoff_ms = retry_backoff_ms;
        self
    }

    /// Override the in-flight request limit
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Enable or disable the run cache
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = TranslationCache::new(enabled);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Marker produced in dry-run mode instead of a translation
    pub fn dry_run_marker(kind: NodeKind, text: &str) -> String {
        format!("[DRY RUN:{}] {}", kind.label(), text)
    }

    /// Translate `text`, or return it unchanged if translation fails
    pub async fn translate(&self, text: &str, options: RunOptions, context: &TranslationContext) -> String {
        if options.dry_run {
            return Self::dry_run_marker(context.kind, text);
        }

        if let Some(cached) = self.cache.get(text) {
            return cached;
        }

        match self.request_with_retry(text).await {
            Ok(translated) => {
                self.cache.store(text, &translated);
                translated
            }
            Err(e) => {
                warn!(
                    "Translation failed for {:?} in {}: {}",
                    text,
                    context.path.display(),
                    e
                );
                text.to_string()
            }
        }
    }

    async fn request_with_retry(&self, text: &str) -> Result<String, ProviderError> {
        let request = CompletionRequest {
            system_prompt: self.system_prompt.clone(),
            text: text.to_string(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut attempt = 0;
        loop {
            let result = self
                .provider
                .complete(&request)
                .await
                .and_then(|response| clean_response(&response, text));

            match result {
                Ok(translated) => return Ok(translated),
                Err(e) if e.is_retryable() && attempt < self.retry_count => {
                    let backoff = self.retry_backoff_ms.saturating_mul(1 << attempt.min(16));
                    debug!(
                        "{} request failed (attempt {}/{}): {}; retrying in {}ms",
                        self.provider.name(),
                        attempt + 1,
                        self.retry_count + 1,
                        e,
                        backoff
                    );
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Trim a model answer and drop quotes the model added around it
fn clean_response(response: &str, original: &str) -> Result<String, ProviderError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::ParseError("Empty translation".to_string()));
    }

    for (open, close) in [('"', '"'), ('\'', '\''), ('“', '”'), ('「', '」')] {
        let wrapped = trimmed.len() > open.len_utf8() + close.len_utf8()
            && trimmed.starts_with(open)
            && trimmed.ends_with(close);
        if wrapped && !original.trim().starts_with(open) {
            let inner = &trimmed[open.len_utf8()..trimmed.len() - close.len_utf8()];
            return Ok(inner.trim().to_string());
        }
    }

    Ok(trimmed.to_string())
}
