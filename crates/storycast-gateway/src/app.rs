use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Mutex;
use tokio::sync::watch;

use storycast_core::config::StorycastConfig;
use storycast_core::types::Account;
use storycast_logs::LogStore;

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: StorycastConfig,
    /// Accounts added through the panel. In-memory only; the scheduler gets
    /// a clone at start time, so later edits don't reach a running engine.
    pub accounts: Mutex<Vec<Account>>,
    /// The panel's own read connection to the attempt log.
    pub logs: LogStore,
    /// Shutdown sender of the running engine, if one was started. Kept so a
    /// future "stop scheduler" action (distinct from stopping the process)
    /// has something to signal.
    pub scheduler_shutdown: Mutex<Option<watch::Sender<bool>>>,
}

impl AppState {
    pub fn new(config: StorycastConfig, logs: LogStore) -> Self {
        Self {
            config,
            accounts: Mutex::new(Vec::new()),
            logs,
            scheduler_shutdown: Mutex::new(None),
        }
    }

    pub fn scheduler_running(&self) -> bool {
        self.scheduler_shutdown.lock().unwrap().is_some()
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: std::sync::Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(crate::http::panel::panel_handler))
        .route("/health", get(crate::http::health::health_handler))
        .route(
            "/api/accounts",
            get(crate::http::accounts::list_accounts).post(crate::http::accounts::add_account),
        )
        .route(
            "/api/scheduler/start",
            post(crate::http::scheduler::start_scheduler),
        )
        .route("/api/logs", get(crate::http::logs::recent_logs))
        .route("/api/stop", post(crate::http::stop::stop_application))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
