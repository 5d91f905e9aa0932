//! Admin endpoints: /health, /check-health

use crate::settings::{PluginContext, PluginSettings};
use crate::state::AppState;
use crate::telemetry::{extract_request_id, mask_sensitive_data};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
///
/// GET /health
///
/// Returns a simple health check response to verify the server is running.
pub async fn health() -> Json<HealthResponse> {
    tracing::debug!("health check requested");
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Data source check request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckHealthRequest {
    #[serde(default)]
    pub plugin_context: PluginContext,
}

/// Data source check outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Ok,
    Error,
}

/// Data source check response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckHealthResult {
    pub status: HealthStatus,
    pub message: String,
}

impl CheckHealthResult {
    fn error(message: &str) -> Self {
        Self {
            status: HealthStatus::Error,
            message: message.to_string(),
        }
    }
}

/// Data source check endpoint
///
/// POST /check-health
///
/// Verifies that the data source settings load and carry an access key pair.
/// Does not contact DynamoDB. Always answers 200; the outcome is in the body.
pub async fn check_health(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<CheckHealthResult> {
    let request_id = extract_request_id(&headers, &state.telemetry_config);
    let span = tracing::info_span!("check_health", request_id = request_id.as_deref());
    let _guard = span.enter();

    let settings = serde_json::from_slice::<CheckHealthRequest>(&body)
        .ok()
        .and_then(|req| PluginSettings::from_context(&req.plugin_context).ok());

    let Some(settings) = settings else {
        tracing::warn!("data source settings did not load");
        return Json(CheckHealthResult::error("Unable to load settings"));
    };

    if settings.secrets.access_key_id.is_empty() {
        return Json(CheckHealthResult::error("AWS Access Key ID is missing"));
    }
    if settings.secrets.secret_access_key.is_empty() {
        return Json(CheckHealthResult::error("AWS Secret Access Key is missing"));
    }

    tracing::info!(
        access_key_id = %mask_sensitive_data(
            &settings.secrets.access_key_id,
            &state.telemetry_config.sensitive_data,
        ),
        "data source check passed"
    );
    Json(CheckHealthResult {
        status: HealthStatus::Ok,
        message: "Data source is working".to_string(),
    })
}
