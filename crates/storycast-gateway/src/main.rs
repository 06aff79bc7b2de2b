use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod app;
mod http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storycast_gateway=info,tower_http=debug".into()),
        )
        .init();

    // load config: explicit path > STORYCAST_CONFIG env > ~/.storycast/storycast.toml
    let config_path = std::env::var("STORYCAST_CONFIG").ok();
    let config = storycast_core::config::StorycastConfig::load(config_path.as_deref())
        .unwrap_or_else(|e| {
            tracing::warn!("Config load failed ({}), using defaults", e);
            storycast_core::config::StorycastConfig::default()
        });

    // Must outlive the server or pending error reports are dropped.
    let _telemetry_guard = storycast_core::telemetry::init(&config.telemetry);

    let bind = config.gateway.bind.clone();
    let port = config.gateway.port;

    // initialize the SQLite attempt log
    let db_path = &config.database.path;
    ensure_parent_dir(db_path);
    info!(path = %db_path, "opening SQLite database");

    let db = rusqlite::Connection::open(db_path)?;
    db.execute_batch("PRAGMA journal_mode=WAL;")?;
    let logs = storycast_logs::LogStore::new(db)?;
    info!("database migrations complete");

    let state = Arc::new(app::AppState::new(config, logs));
    let router = app::build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("Storycast panel listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Create the database's parent directory if it doesn't exist yet.
fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
}
