use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::core::error::GatewayError;
use crate::core::types::{
    DetectRequest, Detection, HealthStatus, TranslateRequest, TranslateResponse,
};
use crate::gateway::TranslationGateway;

/// Body returned for exhausted retries; provider details stay in the logs.
pub const UNAVAILABLE_MESSAGE: &str = "Translation service unavailable";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            GatewayError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            GatewayError::DetectionFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::TranslationUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let error = match &self.0 {
            GatewayError::TranslationUnavailable { .. } => UNAVAILABLE_MESSAGE.to_string(),
            other => other.to_string(),
        };
        ErrorBody { error }
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

pub fn router(gateway: Arc<TranslationGateway>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/detect", post(detect))
        .route("/translate", post(translate))
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}

/// Serves the gateway on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    gateway: Arc<TranslationGateway>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health(State(gateway): State<Arc<TranslationGateway>>) -> Json<HealthStatus> {
    Json(HealthStatus::ok(&gateway.provider_id()))
}

async fn detect(
    State(gateway): State<Arc<TranslationGateway>>,
    body: Bytes,
) -> Result<Json<Vec<Detection>>, ApiError> {
    let request: DetectRequest = parse_body(&body)?;
    let detections =
        run_to_completion(async move { gateway.detect_language(&request.q).await }).await?;
    Ok(Json(detections))
}

async fn translate(
    State(gateway): State<Arc<TranslationGateway>>,
    body: Bytes,
) -> Result<Json<TranslateResponse>, ApiError> {
    let request: TranslateRequest = parse_body(&body)?;
    let response = run_to_completion(async move { gateway.translate(&request).await }).await?;
    Ok(Json(response))
}

/// Bodies are read as JSON whatever the declared content type.
fn parse_body<T>(body: &[u8]) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|error| GatewayError::invalid_input(error.to_string()))
}

/// Runs gateway work on its own task so a dropped connection does not cancel
/// a request mid-retry.
async fn run_to_completion<T, Fut>(work: Fut) -> Result<T, GatewayError>
where
    Fut: Future<Output = Result<T, GatewayError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work).await.unwrap_or_else(|join_error| {
        error!(error = %join_error, "request task failed");
        Err(GatewayError::Unexpected {
            message: join_error.to_string(),
        })
    })
}
