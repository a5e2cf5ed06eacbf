use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::error::{ConfigError, ProviderError};
use crate::core::types::ProviderId;

const DEFAULT_REQUEST_ID_HEADER: &str = "x-request-id";
const DEFAULT_USER_AGENT: &str = concat!("translation-gateway/", env!("CARGO_PKG_VERSION"));

/// Single-shot JSON transport for provider backends.
///
/// Every failure is mapped to a [`ProviderError`] and returned immediately;
/// retry decisions are made above this layer.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    provider: ProviderId,
    client: reqwest::Client,
    timeout_ms: u64,
    default_headers: HeaderMap,
    request_id_header: HeaderName,
}

impl HttpTransport {
    pub fn new(provider: ProviderId, timeout_ms: u64) -> Result<Self, ConfigError> {
        Self::validate_timeout(timeout_ms)?;

        let client = reqwest::Client::builder().build().map_err(|error| {
            ConfigError::InvalidProviderConfig {
                provider: provider.clone(),
                reason: format!("failed to build http client: {error}"),
            }
        })?;

        Ok(Self::with_client(provider, client, timeout_ms))
    }

    pub fn with_client(provider: ProviderId, client: reqwest::Client, timeout_ms: u64) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        Self {
            provider,
            client,
            timeout_ms,
            default_headers,
            request_id_header: HeaderName::from_static(DEFAULT_REQUEST_ID_HEADER),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub async fn get_json<TResp>(&self, url: Url) -> Result<TResp, ProviderError>
    where
        TResp: DeserializeOwned,
    {
        self.execute_json_request(Method::GET, url, None).await
    }

    pub async fn post_json<TReq, TResp>(&self, url: Url, body: &TReq) -> Result<TResp, ProviderError>
    where
        TReq: Serialize + ?Sized,
        TResp: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(|error| ProviderError::Serialization {
            provider: self.provider.clone(),
            request_id: None,
            message: error.to_string(),
        })?;

        self.execute_json_request(Method::POST, url, Some(payload))
            .await
    }

    async fn execute_json_request<TResp>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<TResp, ProviderError>
    where
        TResp: DeserializeOwned,
    {
        let mut request_builder = self
            .client
            .request(method, url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .headers(self.default_headers.clone());

        if let Some(payload) = body {
            request_builder = request_builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(payload);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|error| ProviderError::Transport {
                provider: self.provider.clone(),
                request_id: None,
                message: error.to_string(),
            })?;

        let status_code = response.status().as_u16();
        let request_id = extract_request_id(response.headers(), &self.request_id_header);

        if !response.status().is_success() {
            return Err(self
                .build_status_error(status_code, request_id, response)
                .await);
        }

        response
            .json::<TResp>()
            .await
            .map_err(|error| ProviderError::Serialization {
                provider: self.provider.clone(),
                request_id,
                message: error.to_string(),
            })
    }

    async fn build_status_error(
        &self,
        status_code: u16,
        request_id: Option<String>,
        response: Response,
    ) -> ProviderError {
        let message = match response.text().await {
            Ok(body) if !body.trim().is_empty() => body,
            Ok(_) => format!("http status {status_code}"),
            Err(error) => {
                format!("http status {status_code}; failed to read response body: {error}")
            }
        };

        ProviderError::Status {
            provider: self.provider.clone(),
            status_code,
            request_id,
            message,
        }
    }

    fn validate_timeout(timeout_ms: u64) -> Result<(), ConfigError> {
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout { timeout_ms });
        }
        Ok(())
    }
}

/// Joins `path` onto a base URL, keeping any path prefix the base carries.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url, ConfigError> {
    let joined = format!(
        "{}/{}",
        base_url.trim().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|error| ConfigError::InvalidValue {
        key: "base_url".to_string(),
        reason: format!("{joined}: {error}"),
    })
}

fn extract_request_id(headers: &HeaderMap, request_id_header: &HeaderName) -> Option<String> {
    headers
        .get(request_id_header)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
