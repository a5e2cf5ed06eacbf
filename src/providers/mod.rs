use std::sync::Arc;

use crate::config::ProviderSettings;
use crate::core::error::ConfigError;
use crate::core::traits::ProviderFactory;

pub(crate) mod codec_contract;
pub mod google;
pub(crate) mod google_codec;
pub mod libretranslate;
pub(crate) mod libretranslate_codec;

/// Builds the factory for the configured backend, validating its settings.
pub fn build_factory(
    settings: &ProviderSettings,
    timeout_ms: u64,
) -> Result<Arc<dyn ProviderFactory>, ConfigError> {
    let factory: Arc<dyn ProviderFactory> = match settings {
        ProviderSettings::Google { base_url } => Arc::new(
            google::GoogleProviderFactory::new(base_url.clone(), timeout_ms)?,
        ),
        ProviderSettings::Libretranslate { base_url, api_key } => Arc::new(
            libretranslate::LibreTranslateProviderFactory::new(
                base_url.clone(),
                api_key.clone(),
                timeout_ms,
            )?,
        ),
    };
    Ok(factory)
}
