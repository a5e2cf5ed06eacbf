use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::GatewayConfig;
use crate::core::error::{ConfigError, GatewayError};
use crate::core::traits::ProviderFactory;
use crate::core::types::{
    AUTO_SOURCE, Detection, ProviderId, TranslateRequest, TranslateResponse, is_blank,
};
use crate::handle::ProviderHandle;
use crate::providers;
use crate::retry::RetryPolicy;

const EMPTY_TRANSLATION_MESSAGE: &str = "provider returned an empty translation";

/// Validates requests, resolves the effective source language, and drives
/// provider calls under the retry policy.
pub struct TranslationGateway {
    handle: ProviderHandle,
    retry_policy: RetryPolicy,
}

struct AttemptFailure {
    generation: Option<u64>,
    message: String,
}

impl TranslationGateway {
    pub fn new(
        factory: Arc<dyn ProviderFactory>,
        retry_policy: RetryPolicy,
    ) -> Result<Self, ConfigError> {
        retry_policy.validate()?;

        Ok(Self {
            handle: ProviderHandle::new(factory),
            retry_policy,
        })
    }

    /// Builds the configured backend factory and wraps it in a gateway.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let factory = providers::build_factory(&config.provider, config.provider_timeout_ms)?;
        Self::new(factory, config.retry_policy.clone())
    }

    pub fn provider_id(&self) -> ProviderId {
        self.handle.provider_id()
    }

    /// Returns at most one detection; blank input yields an empty list
    /// without touching the provider. Failures are not retried.
    pub async fn detect_language(&self, text: &str) -> Result<Vec<Detection>, GatewayError> {
        if is_blank(text) {
            return Ok(Vec::new());
        }

        let lease = self
            .handle
            .acquire()
            .map_err(|error| GatewayError::DetectionFailed {
                message: error.to_string(),
            })?;

        match lease.provider.detect(text).await {
            Ok(detection) => {
                info!(language = %detection.language, "detected language");
                Ok(vec![detection])
            }
            Err(provider_error) => {
                warn!(error = %provider_error, "language detection failed");
                self.handle.invalidate(lease.generation);
                Err(GatewayError::DetectionFailed {
                    message: provider_error.to_string(),
                })
            }
        }
    }

    pub async fn translate(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, GatewayError> {
        if is_blank(&request.q) {
            return Ok(TranslateResponse::empty());
        }

        let target = request.target();
        info!(
            source = request.source(),
            dest = target,
            chars = request.q.chars().count(),
            "translation request"
        );

        let source = self.resolve_source(&request.q, request.source()).await;
        let translated_text = self
            .translate_with_retry(&request.q, &source, target)
            .await?;

        info!(src = %source, dest = target, "translation succeeded");
        Ok(TranslateResponse::translated(translated_text, source, target))
    }

    /// An explicit tag is used verbatim. `"auto"` is resolved by detection and
    /// falls back to `"auto"` when detection fails.
    async fn resolve_source(&self, text: &str, requested: &str) -> String {
        if requested != AUTO_SOURCE {
            return requested.to_string();
        }

        let lease = match self.handle.acquire() {
            Ok(lease) => lease,
            Err(provider_error) => {
                warn!(error = %provider_error, "source detection skipped, using auto");
                return AUTO_SOURCE.to_string();
            }
        };

        match lease.provider.detect(text).await {
            Ok(detection) if !detection.language.trim().is_empty() => detection.language,
            Ok(_) => {
                warn!("provider detected no language, using auto");
                AUTO_SOURCE.to_string()
            }
            Err(provider_error) => {
                warn!(error = %provider_error, "source detection failed, using auto");
                self.handle.invalidate(lease.generation);
                AUTO_SOURCE.to_string()
            }
        }
    }

    async fn translate_with_retry(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, GatewayError> {
        let max_attempts = self.retry_policy.max_attempts;
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.attempt_translate(text, source, target).await {
                Ok(translated) => {
                    if attempt > 1 {
                        info!(attempt, "translation recovered after retry");
                    }
                    return Ok(translated);
                }
                Err(failure) => {
                    warn!(
                        attempt,
                        max_attempts,
                        error = %failure.message,
                        "translation attempt failed"
                    );
                    if let Some(generation) = failure.generation {
                        self.handle.invalidate(generation);
                    }
                    last_error = failure.message;

                    if self.retry_policy.has_attempts_after(attempt) {
                        self.retry_policy.sleep_before_retry(attempt).await;
                    }
                }
            }
        }

        error!(
            attempts = max_attempts,
            error = %last_error,
            "translation unavailable, retries exhausted"
        );
        Err(GatewayError::TranslationUnavailable {
            attempts: max_attempts,
            last_error,
        })
    }

    async fn attempt_translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, AttemptFailure> {
        let lease = self.handle.acquire().map_err(|error| AttemptFailure {
            generation: None,
            message: error.to_string(),
        })?;

        match lease.provider.translate(text, source, target).await {
            Ok(translated) if !translated.is_empty() => Ok(translated),
            Ok(_) => Err(AttemptFailure {
                generation: Some(lease.generation),
                message: EMPTY_TRANSLATION_MESSAGE.to_string(),
            }),
            Err(error) => Err(AttemptFailure {
                generation: Some(lease.generation),
                message: error.to_string(),
            }),
        }
    }
}
