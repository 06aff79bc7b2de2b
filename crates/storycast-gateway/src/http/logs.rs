use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use storycast_core::StorycastError;

use crate::app::AppState;
use crate::http::error_response;

/// The dashboard shows at most this many rows.
const MAX_ROWS: usize = 100;

#[derive(Deserialize)]
pub struct LogsQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    MAX_ROWS
}

/// GET /api/logs?limit=100 — latest attempt rows, newest first.
pub async fn recent_logs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let limit = query.limit.min(MAX_ROWS);
    let rows = state.logs.recent(limit).map_err(|e| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &StorycastError::Database(e.to_string()),
        )
    })?;
    Ok(Json(json!({ "logs": rows })))
}
