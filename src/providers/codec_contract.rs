use crate::core::error::ProviderError;
use crate::core::types::Detection;

/// Arguments of one provider translate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TranslateCall<'a> {
    pub text: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub format: &'a str,
}

/// Internal wire contract for provider backends.
///
/// `TranslationProvider` is the gateway-facing extension point. This contract
/// is crate-private and keeps each backend's payload encoding and response
/// decoding separate from transport so it can be tested without a network.
pub(crate) trait ProviderCodec {
    type TranslatePayload;
    type TranslateReply;
    type DetectPayload;
    type DetectReply;

    fn encode_translate(
        &self,
        call: &TranslateCall<'_>,
    ) -> Result<Self::TranslatePayload, ProviderError>;

    /// Returns the translated text, which may be empty.
    fn decode_translate(&self, reply: &Self::TranslateReply) -> Result<String, ProviderError>;

    fn encode_detect(&self, text: &str) -> Result<Self::DetectPayload, ProviderError>;

    fn decode_detect(&self, reply: &Self::DetectReply) -> Result<Detection, ProviderError>;
}
