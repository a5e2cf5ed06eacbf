use serde_json::Value;

use crate::core::error::ProviderError;
use crate::core::types::{AUTO_SOURCE, Detection, ProviderId};
use crate::providers::codec_contract::{ProviderCodec, TranslateCall};

/// Target used for detection-only calls; the endpoint has no detect route.
const DETECT_PROBE_TARGET: &str = "en";

pub(crate) type QueryParams = Vec<(&'static str, String)>;

/// Codec for the `translate_a/single?client=gtx` web endpoint.
///
/// Responses are positional JSON arrays: index 0 holds the translated
/// segments (`[translated, original, ..]`), index 2 the detected source
/// language. The endpoint reports no detection confidence.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct GoogleCodec;

impl ProviderCodec for GoogleCodec {
    type TranslatePayload = QueryParams;
    type TranslateReply = Value;
    type DetectPayload = QueryParams;
    type DetectReply = Value;

    fn encode_translate(
        &self,
        call: &TranslateCall<'_>,
    ) -> Result<Self::TranslatePayload, ProviderError> {
        validate_tag("target", call.target)?;
        validate_tag("source", call.source)?;
        Ok(query(call.source, call.target, call.text))
    }

    fn decode_translate(&self, reply: &Self::TranslateReply) -> Result<String, ProviderError> {
        let segments = match reply.get(0) {
            Some(Value::Array(segments)) => segments,
            Some(Value::Null) | None => return Ok(String::new()),
            Some(_) => return Err(protocol_error("translation segments are not an array")),
        };

        Ok(segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect())
    }

    fn encode_detect(&self, text: &str) -> Result<Self::DetectPayload, ProviderError> {
        Ok(query(AUTO_SOURCE, DETECT_PROBE_TARGET, text))
    }

    fn decode_detect(&self, reply: &Self::DetectReply) -> Result<Detection, ProviderError> {
        let language = reply
            .get(2)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|language| !language.is_empty())
            .ok_or_else(|| protocol_error("response carries no detected language"))?;

        Ok(Detection {
            language: language.to_string(),
            confidence: None,
        })
    }
}

fn query(source: &str, target: &str, text: &str) -> QueryParams {
    vec![
        ("client", "gtx".to_string()),
        ("sl", source.to_string()),
        ("tl", target.to_string()),
        ("dt", "t".to_string()),
        ("q", text.to_string()),
    ]
}

fn validate_tag(field: &str, tag: &str) -> Result<(), ProviderError> {
    if tag.trim().is_empty() {
        return Err(protocol_error(&format!("{field} language must not be empty")));
    }
    Ok(())
}

fn protocol_error(message: &str) -> ProviderError {
    ProviderError::Protocol {
        provider: ProviderId::Google,
        request_id: None,
        message: message.to_string(),
    }
}
