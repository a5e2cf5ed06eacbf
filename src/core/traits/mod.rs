use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::ProviderError;
use crate::core::types::{Detection, ProviderId};

/// Backend capability for language detection and text translation.
///
/// Implementations wrap a single external service and never retry on their
/// own; retry and fallback policy belong to the gateway.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Stable provider identifier for diagnostics.
    fn id(&self) -> ProviderId;

    /// Classifies `text`. `confidence` is `None` when the backend reports none.
    async fn detect(&self, text: &str) -> Result<Detection, ProviderError>;

    /// Translates `text` from `source` (a language tag or `"auto"`) to `target`.
    ///
    /// An `Ok` with empty text is allowed here; callers decide how to treat it.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError>;
}

/// Creates fresh provider handles. Called lazily on first use and again
/// whenever a handle has been invalidated after a failure.
pub trait ProviderFactory: Send + Sync {
    fn id(&self) -> ProviderId;

    fn create(&self) -> Result<Arc<dyn TranslationProvider>, ProviderError>;
}
