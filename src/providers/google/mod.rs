use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use crate::core::error::{ConfigError, ProviderError};
use crate::core::traits::{ProviderFactory, TranslationProvider};
use crate::core::types::{DEFAULT_FORMAT, Detection, ProviderId};
use crate::providers::codec_contract::{ProviderCodec, TranslateCall};
use crate::providers::google_codec::{GoogleCodec, QueryParams};
use crate::transport::http::{HttpTransport, endpoint_url};

pub const GOOGLE_DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";
const TRANSLATE_PATH: &str = "translate_a/single";

pub struct GoogleTranslateProvider {
    transport: HttpTransport,
    codec: GoogleCodec,
    endpoint: Url,
}

impl GoogleTranslateProvider {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(ProviderId::Google, timeout_ms)?;
        Ok(Self {
            transport,
            codec: GoogleCodec,
            endpoint: endpoint_url(normalize_base_url(base_url), TRANSLATE_PATH)?,
        })
    }

    fn url_with(&self, params: QueryParams) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(params);
        url
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Google
    }

    async fn detect(&self, text: &str) -> Result<Detection, ProviderError> {
        let params = self.codec.encode_detect(text)?;
        let reply: Value = self.transport.get_json(self.url_with(params)).await?;
        self.codec.decode_detect(&reply)
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let params = self.codec.encode_translate(&TranslateCall {
            text,
            source,
            target,
            format: DEFAULT_FORMAT,
        })?;
        let reply: Value = self.transport.get_json(self.url_with(params)).await?;
        self.codec.decode_translate(&reply)
    }
}

/// Builds a fresh [`GoogleTranslateProvider`], and with it a fresh connection
/// pool, for every handle the gateway requests.
#[derive(Debug, Clone)]
pub struct GoogleProviderFactory {
    base_url: String,
    timeout_ms: u64,
}

impl GoogleProviderFactory {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self, ConfigError> {
        let factory = Self {
            base_url: normalize_base_url(&base_url.into()).to_string(),
            timeout_ms,
        };
        GoogleTranslateProvider::new(&factory.base_url, factory.timeout_ms)?;
        Ok(factory)
    }
}

impl ProviderFactory for GoogleProviderFactory {
    fn id(&self) -> ProviderId {
        ProviderId::Google
    }

    fn create(&self) -> Result<Arc<dyn TranslationProvider>, ProviderError> {
        let provider = GoogleTranslateProvider::new(&self.base_url, self.timeout_ms).map_err(
            |error| ProviderError::Initialization {
                provider: ProviderId::Google,
                message: error.to_string(),
            },
        )?;
        Ok(Arc::new(provider))
    }
}

fn normalize_base_url(base_url: &str) -> &str {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        GOOGLE_DEFAULT_BASE_URL
    } else {
        trimmed
    }
}
