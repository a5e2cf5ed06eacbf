use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::core::error::ConfigError;
use crate::core::types::ProviderId;
use crate::providers::google::GOOGLE_DEFAULT_BASE_URL;
use crate::providers::libretranslate::LIBRETRANSLATE_DEFAULT_BASE_URL;
use crate::retry::RetryPolicy;

pub const HOST_ENV: &str = "GATEWAY_HOST";
pub const PORT_ENV: &str = "GATEWAY_PORT";
pub const PROVIDER_ENV: &str = "TRANSLATOR_PROVIDER";
pub const GOOGLE_BASE_URL_ENV: &str = "GOOGLE_TRANSLATE_BASE_URL";
pub const LIBRETRANSLATE_URL_ENV: &str = "LIBRETRANSLATE_URL";
pub const LIBRETRANSLATE_API_KEY_ENV: &str = "LIBRETRANSLATE_API_KEY";
pub const TIMEOUT_ENV: &str = "PROVIDER_TIMEOUT_MS";
pub const MAX_ATTEMPTS_ENV: &str = "TRANSLATE_MAX_ATTEMPTS";
pub const RETRY_DELAY_ENV: &str = "TRANSLATE_RETRY_DELAY_MS";

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSettings {
    Google {
        base_url: String,
    },
    Libretranslate {
        base_url: String,
        api_key: Option<String>,
    },
}

impl ProviderSettings {
    pub fn id(&self) -> ProviderId {
        match self {
            Self::Google { .. } => ProviderId::Google,
            Self::Libretranslate { .. } => ProviderId::Libretranslate,
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self::Google {
            base_url: GOOGLE_DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub listen_addr: SocketAddr,
    pub provider: ProviderSettings,
    pub provider_timeout_ms: u64,
    pub retry_policy: RetryPolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT),
            provider: ProviderSettings::default(),
            provider_timeout_ms: DEFAULT_TIMEOUT_MS,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from a key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host: IpAddr = parse_or(get(HOST_ENV), HOST_ENV, || Ok(DEFAULT_HOST))?;
        let port: u16 = parse_or(get(PORT_ENV), PORT_ENV, || Ok(DEFAULT_PORT))?;

        let provider = match get(PROVIDER_ENV)
            .map(|name| name.to_ascii_lowercase())
            .as_deref()
        {
            None | Some("google") => ProviderSettings::Google {
                base_url: get(GOOGLE_BASE_URL_ENV)
                    .unwrap_or_else(|| GOOGLE_DEFAULT_BASE_URL.to_string()),
            },
            Some("libretranslate") => ProviderSettings::Libretranslate {
                base_url: get(LIBRETRANSLATE_URL_ENV)
                    .unwrap_or_else(|| LIBRETRANSLATE_DEFAULT_BASE_URL.to_string()),
                api_key: get(LIBRETRANSLATE_API_KEY_ENV),
            },
            Some(other) => {
                return Err(ConfigError::UnknownProvider {
                    name: other.to_string(),
                });
            }
        };

        let provider_timeout_ms = parse_or(get(TIMEOUT_ENV), TIMEOUT_ENV, || {
            Ok(DEFAULT_TIMEOUT_MS)
        })?;
        if provider_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout {
                timeout_ms: provider_timeout_ms,
            });
        }

        let defaults = RetryPolicy::default();
        let max_attempts = parse_or(get(MAX_ATTEMPTS_ENV), MAX_ATTEMPTS_ENV, || {
            Ok(defaults.max_attempts)
        })?;
        let delay_ms = parse_or(get(RETRY_DELAY_ENV), RETRY_DELAY_ENV, || {
            Ok(defaults.initial_backoff_ms)
        })?;
        let retry_policy = RetryPolicy::fixed(max_attempts, delay_ms);
        retry_policy.validate()?;

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            provider,
            provider_timeout_ms,
            retry_policy,
        })
    }
}

fn parse_or<T, D>(raw: Option<String>, key: &str, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    D: FnOnce() -> Result<T, String>,
{
    let parsed = match raw {
        Some(value) => value.parse::<T>().map_err(|error| error.to_string()),
        None => default(),
    };
    parsed.map_err(|reason| ConfigError::InvalidValue {
        key: key.to_string(),
        reason,
    })
}
