use axum::Json;
use serde_json::{json, Value};
use tracing::info;

/// POST /api/stop — terminate the whole process.
///
/// No graceful drain: an in-flight posting pass is abandoned mid-file, which
/// may leave the current upload without a log row. The short delay only lets
/// this response reach the browser first.
pub async fn stop_application() -> Json<Value> {
    info!("stop requested, terminating process");
    tokio::spawn(async {
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        std::process::exit(0);
    });
    Json(json!({ "ok": true, "stopping": true }))
}
