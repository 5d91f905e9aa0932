//! Query endpoint: /query
//!
//! One request carries the data source context and any number of queries.
//! Each query names a table; the table is scanned, the records are turned
//! into a table, and the table is returned as one frame keyed by the
//! query's `refId`. Failures are reported per query.

use crate::error::{QueryError, Result, ServerError};
use crate::frame::Frame;
use crate::settings::{PluginContext, PluginSettings};
use crate::state::AppState;
use crate::telemetry::{create_query_span, extract_request_id, set_span_error_code};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use dynamo_frames_tabular::extract_table;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::Instrument;

/// Query request envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDataRequest {
    #[serde(default)]
    pub plugin_context: PluginContext,
    #[serde(default)]
    pub queries: Vec<DataQuery>,
}

/// One query as sent by the client
///
/// Everything but `refId` is kept raw and decoded per query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuery {
    #[serde(default)]
    pub ref_id: String,
    #[serde(flatten)]
    pub json: Map<String, JsonValue>,
}

/// Decoded query model
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryModel {
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub region: Option<String>,
}

/// Result of one query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<Frame>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl DataResponse {
    fn frame(frame: Frame) -> Self {
        Self {
            frames: Some(vec![frame]),
            ..Default::default()
        }
    }

    fn error(err: &QueryError) -> Self {
        Self {
            frames: None,
            error: Some(err.to_string()),
            status: Some(err.status_code().as_u16()),
        }
    }
}

/// Query response: results keyed by refId
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDataResponse {
    pub results: BTreeMap<String, DataResponse>,
}

/// Query endpoint
///
/// POST /query
///
/// Queries of one request run concurrently. When two queries share a refId,
/// the later one's result is kept.
pub async fn query(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<QueryDataResponse>> {
    let request: QueryDataRequest = serde_json::from_slice(&body).map_err(ServerError::from)?;
    let request_id = extract_request_id(&headers, &state.telemetry_config);

    tracing::debug!(
        request_id = request_id.as_deref(),
        queries = request.queries.len(),
        "query request received"
    );

    let ctx = &request.plugin_context;
    let runs = request.queries.iter().map(|q| {
        let model = decode_model(q);
        let span = create_query_span(
            request_id.as_deref(),
            &q.ref_id,
            model.as_ref().ok().map(|m| m.table_name.as_str()),
            model.as_ref().ok().and_then(|m| m.region.as_deref()),
        );
        let state = &state;
        async move {
            let outcome = match model {
                Ok(model) => run_query(state, ctx, &q.ref_id, model).await,
                Err(e) => Err(e),
            };
            let response = match outcome {
                Ok(frame) => DataResponse::frame(frame),
                Err(e) => {
                    set_span_error_code(&tracing::Span::current(), e.code());
                    tracing::warn!(error = %e, "query failed");
                    DataResponse::error(&e)
                }
            };
            (q.ref_id.clone(), response)
        }
        .instrument(span)
    });

    let results = join_all(runs).await.into_iter().collect();
    Ok(Json(QueryDataResponse { results }))
}

fn decode_model(query: &DataQuery) -> std::result::Result<QueryModel, QueryError> {
    serde_json::from_value(JsonValue::Object(query.json.clone())).map_err(QueryError::Unmarshal)
}

async fn run_query(
    state: &AppState,
    ctx: &PluginContext,
    ref_id: &str,
    model: QueryModel,
) -> std::result::Result<Frame, QueryError> {
    let settings = PluginSettings::from_context(ctx)?;

    if model.table_name.is_empty() {
        return Err(QueryError::MissingTableName);
    }

    let region = settings.resolve_region(model.region.as_deref(), &state.config.default_region);
    let source = state
        .sources
        .connect(&settings, region)
        .await
        .map_err(QueryError::Session)?;

    let batch = source
        .scan(&model.table_name)
        .await
        .map_err(|source| QueryError::Scan {
            table: model.table_name.clone(),
            source,
        })?;

    let table = extract_table(&batch);
    tracing::info!(
        region,
        rows = table.num_rows(),
        columns = table.num_columns(),
        "query completed"
    );
    Ok(Frame::from_table(ref_id, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_query_keeps_raw_fields() {
        let q: DataQuery = serde_json::from_value(json!({
            "refId": "A",
            "tableName": "users",
            "hide": false
        }))
        .unwrap();
        assert_eq!(q.ref_id, "A");
        assert_eq!(q.json.get("tableName"), Some(&json!("users")));
        assert!(!q.json.contains_key("refId"));

        let model = decode_model(&q).unwrap();
        assert_eq!(model.table_name, "users");
        assert_eq!(model.region, None);
    }

    #[test]
    fn test_bad_model_is_unmarshal_error() {
        let q: DataQuery =
            serde_json::from_value(json!({"refId": "A", "tableName": 5})).unwrap();
        let err = decode_model(&q).unwrap_err();
        assert!(matches!(err, QueryError::Unmarshal(_)));
        assert!(err.to_string().starts_with("json unmarshal: "));
    }

    #[test]
    fn test_data_response_shapes() {
        let ok = DataResponse::frame(Frame {
            name: "A".to_string(),
            fields: vec![],
        });
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"frames": [{"name": "A", "fields": []}]})
        );

        let err = DataResponse::error(&QueryError::MissingTableName);
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"error": "tableName is required in the query", "status": 400})
        );
    }
}
