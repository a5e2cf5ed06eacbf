use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;

use crate::core::error::{ConfigError, ProviderError};
use crate::core::traits::{ProviderFactory, TranslationProvider};
use crate::core::types::{DEFAULT_FORMAT, Detection, ProviderId};
use crate::providers::codec_contract::{ProviderCodec, TranslateCall};
use crate::providers::libretranslate_codec::{
    LibreDetectCandidate, LibreTranslateCodec, LibreTranslateReply,
};
use crate::transport::http::{HttpTransport, endpoint_url};

pub const LIBRETRANSLATE_DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";

pub struct LibreTranslateProvider {
    transport: HttpTransport,
    codec: LibreTranslateCodec,
    translate_url: Url,
    detect_url: Url,
}

impl LibreTranslateProvider {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout_ms: u64,
    ) -> Result<Self, ConfigError> {
        if base_url.trim().is_empty() {
            return Err(ConfigError::InvalidProviderConfig {
                provider: ProviderId::Libretranslate,
                reason: "base url must not be empty".to_string(),
            });
        }

        Ok(Self {
            transport: HttpTransport::new(ProviderId::Libretranslate, timeout_ms)?,
            codec: LibreTranslateCodec::new(api_key),
            translate_url: endpoint_url(base_url, "translate")?,
            detect_url: endpoint_url(base_url, "detect")?,
        })
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslateProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Libretranslate
    }

    async fn detect(&self, text: &str) -> Result<Detection, ProviderError> {
        let payload = self.codec.encode_detect(text)?;
        let reply: Vec<LibreDetectCandidate> = self
            .transport
            .post_json(self.detect_url.clone(), &payload)
            .await?;
        self.codec.decode_detect(&reply)
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let payload = self.codec.encode_translate(&TranslateCall {
            text,
            source,
            target,
            format: DEFAULT_FORMAT,
        })?;
        let reply: LibreTranslateReply = self
            .transport
            .post_json(self.translate_url.clone(), &payload)
            .await?;
        self.codec.decode_translate(&reply)
    }
}

#[derive(Debug, Clone)]
pub struct LibreTranslateProviderFactory {
    base_url: String,
    api_key: Option<String>,
    timeout_ms: u64,
}

impl LibreTranslateProviderFactory {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_ms: u64,
    ) -> Result<Self, ConfigError> {
        let factory = Self {
            base_url: base_url.into().trim().to_string(),
            api_key,
            timeout_ms,
        };
        LibreTranslateProvider::new(&factory.base_url, factory.api_key.clone(), timeout_ms)?;
        Ok(factory)
    }
}

impl ProviderFactory for LibreTranslateProviderFactory {
    fn id(&self) -> ProviderId {
        ProviderId::Libretranslate
    }

    fn create(&self) -> Result<Arc<dyn TranslationProvider>, ProviderError> {
        let provider =
            LibreTranslateProvider::new(&self.base_url, self.api_key.clone(), self.timeout_ms)
                .map_err(|error| ProviderError::Initialization {
                    provider: ProviderId::Libretranslate,
                    message: error.to_string(),
                })?;
        Ok(Arc::new(provider))
    }
}
