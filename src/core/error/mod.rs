use crate::core::types::ProviderId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown translation provider: {name}")]
    UnknownProvider { name: String },
    #[error("invalid provider config for {provider:?}: {reason}")]
    InvalidProviderConfig {
        provider: ProviderId,
        reason: String,
    },
    #[error("invalid timeout: {timeout_ms} ms")]
    InvalidTimeout { timeout_ms: u64 },
    #[error("invalid retry policy: {reason}")]
    InvalidRetryPolicy { reason: String },
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error(
        "provider transport error{context}: {message}",
        context = format_context(Some(.provider), .request_id.as_deref(), None)
    )]
    Transport {
        provider: ProviderId,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "provider status error{context}: {message}",
        context = format_context(Some(.provider), .request_id.as_deref(), Some(*.status_code))
    )]
    Status {
        provider: ProviderId,
        status_code: u16,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "provider protocol error{context}: {message}",
        context = format_context(Some(.provider), .request_id.as_deref(), None)
    )]
    Protocol {
        provider: ProviderId,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "provider serialization error{context}: {message}",
        context = format_context(Some(.provider), .request_id.as_deref(), None)
    )]
    Serialization {
        provider: ProviderId,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "provider initialization error{context}: {message}",
        context = format_context(Some(.provider), None, None)
    )]
    Initialization {
        provider: ProviderId,
        message: String,
    },
}

impl ProviderError {
    pub fn provider(&self) -> &ProviderId {
        match self {
            Self::Transport { provider, .. }
            | Self::Status { provider, .. }
            | Self::Protocol { provider, .. }
            | Self::Serialization { provider, .. }
            | Self::Initialization { provider, .. } => provider,
        }
    }
}

/// Failure taxonomy surfaced by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("language detection failed: {message}")]
    DetectionFailed { message: String },
    #[error("translation unavailable after {attempts} attempts: {last_error}")]
    TranslationUnavailable { attempts: u32, last_error: String },
    #[error("{message}")]
    Unexpected { message: String },
}

impl GatewayError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

fn format_context(
    provider: Option<&ProviderId>,
    request_id: Option<&str>,
    status_code: Option<u16>,
) -> String {
    let mut context = Vec::new();

    if let Some(provider) = provider {
        context.push(format!("provider={}", provider.as_str()));
    }
    if let Some(request_id) = request_id {
        context.push(format!("request_id={request_id}"));
    }
    if let Some(status_code) = status_code {
        context.push(format!("status_code={status_code}"));
    }

    if context.is_empty() {
        String::new()
    } else {
        format!(" [{}]", context.join(", "))
    }
}
