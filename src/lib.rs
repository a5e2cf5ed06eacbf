pub mod config;
pub mod core;
pub mod gateway;
pub mod handle;
pub mod providers;
pub mod retry;
pub mod server;
pub mod transport;

pub use crate::config::GatewayConfig;
pub use crate::core::types::*;
pub use crate::gateway::TranslationGateway;
