//! Scheduler start endpoint.
//!
//! `POST /api/scheduler/start` takes the panel's weekly grid, snapshots the
//! account list and day config, and launches the polling engine as a
//! background task. The snapshot is fixed at this moment — panel changes
//! made afterwards require a process restart to take effect.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::watch;
use tracing::{info, warn};

use storycast_client::{HttpPlatform, SessionStore};
use storycast_core::types::{DayConfig, Meridiem, Weekday};
use storycast_core::StorycastError;
use storycast_logs::LogStore;
use storycast_poster::{MarkerStore, PostJob};
use storycast_scheduler::SchedulerEngine;

use crate::app::AppState;
use crate::http::error_response;

/// One row of the panel's weekly grid.
#[derive(Deserialize)]
pub struct DayRow {
    pub day: Weekday,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub folder: String,
    pub hour: u8,
    pub minute: u8,
    pub meridiem: Meridiem,
}

#[derive(Deserialize)]
pub struct StartRequest {
    pub days: Vec<DayRow>,
}

/// POST /api/scheduler/start
pub async fn start_scheduler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let accounts = state.accounts.lock().unwrap().clone();
    if accounts.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            &StorycastError::NoAccounts,
        ));
    }

    let mut config: BTreeMap<Weekday, DayConfig> = BTreeMap::new();
    for row in &req.days {
        let built = DayConfig::from_panel(
            row.day,
            row.enabled,
            &row.folder,
            row.hour,
            row.minute,
            row.meridiem,
        )
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e))?;
        if let Some(day_config) = built {
            config.insert(day_config.day, day_config);
        }
    }
    if config.is_empty() {
        warn!("scheduler started with no enabled days");
    }

    let mut shutdown_slot = state.scheduler_shutdown.lock().unwrap();
    if shutdown_slot.is_some() {
        return Err(error_response(
            StatusCode::CONFLICT,
            &StorycastError::Internal("scheduler is already running".to_string()),
        ));
    }

    // The engine gets its own log connection; the panel keeps reading
    // through its own without contending on a shared one.
    let conn = rusqlite::Connection::open(&state.config.database.path)
        .map_err(internal)?;
    let logs = Arc::new(LogStore::new(conn).map_err(internal)?);
    let sessions = SessionStore::new(&state.config.storage.sessions_dir).map_err(internal)?;
    let markers = MarkerStore::new(&state.config.storage.markers_dir).map_err(internal)?;
    let platform = Arc::new(HttpPlatform::new(state.config.platform.base_url.clone()));

    let job = PostJob::new(accounts, config.clone(), platform, sessions, markers, logs);
    let engine = SchedulerEngine::new(&config, job);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(engine.run(shutdown_rx));
    *shutdown_slot = Some(shutdown_tx);

    info!(days = config.len(), "scheduler started");
    Ok(Json(json!({ "ok": true, "days": config.len() })))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, Json<Value>) {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &StorycastError::Internal(e.to_string()),
    )
}
