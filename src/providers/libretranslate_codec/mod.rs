use serde::{Deserialize, Serialize};

use crate::core::error::ProviderError;
use crate::core::types::{Detection, ProviderId};
use crate::providers::codec_contract::{ProviderCodec, TranslateCall};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct LibreTranslateRequest {
    pub q: String,
    pub source: String,
    pub target: String,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct LibreDetectRequest {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct LibreTranslateReply {
    #[serde(rename = "translatedText", default)]
    pub translated_text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct LibreDetectCandidate {
    pub language: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Codec for LibreTranslate-compatible servers.
#[derive(Debug, Default, Clone)]
pub(crate) struct LibreTranslateCodec {
    api_key: Option<String>,
}

impl LibreTranslateCodec {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
        }
    }
}

impl ProviderCodec for LibreTranslateCodec {
    type TranslatePayload = LibreTranslateRequest;
    type TranslateReply = LibreTranslateReply;
    type DetectPayload = LibreDetectRequest;
    type DetectReply = Vec<LibreDetectCandidate>;

    fn encode_translate(
        &self,
        call: &TranslateCall<'_>,
    ) -> Result<Self::TranslatePayload, ProviderError> {
        if call.target.trim().is_empty() {
            return Err(protocol_error("target language must not be empty"));
        }

        Ok(LibreTranslateRequest {
            q: call.text.to_string(),
            source: call.source.to_string(),
            target: call.target.to_string(),
            format: call.format.to_string(),
            api_key: self.api_key.clone(),
        })
    }

    fn decode_translate(&self, reply: &Self::TranslateReply) -> Result<String, ProviderError> {
        if let Some(error) = &reply.error {
            return Err(protocol_error(error));
        }
        Ok(reply.translated_text.clone().unwrap_or_default())
    }

    fn encode_detect(&self, text: &str) -> Result<Self::DetectPayload, ProviderError> {
        Ok(LibreDetectRequest {
            q: text.to_string(),
            api_key: self.api_key.clone(),
        })
    }

    /// Candidates arrive ranked; the first one wins.
    fn decode_detect(&self, reply: &Self::DetectReply) -> Result<Detection, ProviderError> {
        let candidate = reply
            .iter()
            .find(|candidate| !candidate.language.trim().is_empty())
            .ok_or_else(|| protocol_error("detection returned no candidates"))?;

        Ok(Detection {
            language: candidate.language.clone(),
            confidence: candidate.confidence,
        })
    }
}

fn protocol_error(message: &str) -> ProviderError {
    ProviderError::Protocol {
        provider: ProviderId::Libretranslate,
        request_id: None,
        message: message.to_string(),
    }
}
