use serde::{Deserialize, Deserializer, Serialize};

/// Source-language sentinel meaning "resolve via detection".
pub const AUTO_SOURCE: &str = "auto";
pub const DEFAULT_TARGET: &str = "en";
pub const DEFAULT_FORMAT: &str = "text";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    Google,
    Libretranslate,
    Custom(String),
}

impl ProviderId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Google => "google",
            Self::Libretranslate => "libretranslate",
            Self::Custom(name) => name.as_str(),
        }
    }
}

/// Inbound `POST /translate` body.
///
/// `source` is kept as an `Option` so that an absent, `null`, or empty value
/// can be told apart from an explicit tag; use [`TranslateRequest::source`]
/// to read the effective value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub q: String,
    #[serde(
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
    #[serde(
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub target: Option<String>,
    #[serde(
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub format: Option<String>,
}

impl TranslateRequest {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            source: None,
            target: None,
            format: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(AUTO_SOURCE)
    }

    pub fn target(&self) -> &str {
        self.target.as_deref().unwrap_or(DEFAULT_TARGET)
    }

    /// Accepted for compatibility; no provider consumes it beyond passthrough.
    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }
}

/// Outbound `POST /translate` body. The empty-input short-circuit carries
/// only `translatedText`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,
}

impl TranslateResponse {
    pub fn empty() -> Self {
        Self {
            translated_text: String::new(),
            src: None,
            dest: None,
        }
    }

    pub fn translated(
        translated_text: impl Into<String>,
        src: impl Into<String>,
        dest: impl Into<String>,
    ) -> Self {
        Self {
            translated_text: translated_text.into(),
            src: Some(src.into()),
            dest: Some(dest.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectRequest {
    pub q: String,
}

/// One detection candidate. `confidence` serializes as `null` when the
/// provider does not report one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub language: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub provider: String,
}

impl HealthStatus {
    pub fn ok(provider: &ProviderId) -> Self {
        Self {
            status: "ok".to_string(),
            service: "translator".to_string(),
            provider: provider.as_str().to_string(),
        }
    }
}

/// Returns true when `text` has nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.trim().is_empty()))
}
