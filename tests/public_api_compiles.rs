use std::sync::Arc;

use translation_gateway::config::ProviderSettings;
use translation_gateway::core::error::{ConfigError, GatewayError, ProviderError};
use translation_gateway::core::traits::{ProviderFactory, TranslationProvider};
use translation_gateway::handle::ProviderHandle;
use translation_gateway::providers::build_factory;
use translation_gateway::retry::RetryPolicy;
use translation_gateway::server::{ApiError, UNAVAILABLE_MESSAGE};
use translation_gateway::{
    AUTO_SOURCE, Detection, GatewayConfig, TranslateRequest, TranslateResponse,
    TranslationGateway,
};

#[test]
fn test_public_api_compiles() {
    let config = GatewayConfig::default();
    let gateway = TranslationGateway::from_config(&config).expect("default config builds");
    let _provider_id = gateway.provider_id();
    let _router = translation_gateway::server::router(Arc::new(gateway));

    let factory: Arc<dyn ProviderFactory> = build_factory(
        &ProviderSettings::Libretranslate {
            base_url: "http://127.0.0.1:5001".to_string(),
            api_key: None,
        },
        1_000,
    )
    .expect("factory builds");
    let handle = ProviderHandle::new(factory);
    let lease = handle.acquire().expect("handle creates provider");
    let _provider: &Arc<dyn TranslationProvider> = &lease.provider;

    let _request = TranslateRequest::new("hola").with_source(AUTO_SOURCE);
    let _response = TranslateResponse::empty();
    let _detection = Detection {
        language: "es".to_string(),
        confidence: None,
    };
    let _policy = RetryPolicy::default();
    let _api_error = ApiError::from(GatewayError::invalid_input("bad"));
    let _unavailable = UNAVAILABLE_MESSAGE;
    let _config_error: Option<ConfigError> = None;
    let _provider_error: Option<ProviderError> = None;
}
