use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Fixed pause after every upload attempt — rate limiting against the
/// platform's abuse detection. Deliberately not configurable.
pub const UPLOAD_PACING_SECS: u64 = 10;

/// Scheduler polling cadence. Minute-level trigger granularity only needs a
/// coarse poll.
pub const POLL_INTERVAL_SECS: u64 = 20;

/// Top-level config (storycast.toml + STORYCAST_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorycastConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Default for StorycastConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            database: DatabaseConfig::default(),
            platform: PlatformConfig::default(),
            storage: StorageConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Endpoint of the story-platform API the upload client talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_platform_base_url")]
    pub base_url: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: default_platform_base_url(),
        }
    }
}

/// Where session blobs and posting markers live on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_sessions_dir")]
    pub sessions_dir: String,
    #[serde(default = "default_markers_dir")]
    pub markers_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            sessions_dir: default_sessions_dir(),
            markers_dir: default_markers_dir(),
        }
    }
}

/// Error-reporting sink. Disabled unless a DSN is set.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelemetryConfig {
    pub dsn: Option<String>,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_platform_base_url() -> String {
    "https://api.storyplatform.example".to_string()
}
fn default_environment() -> String {
    "production".to_string()
}
fn default_db_path() -> String {
    format!("{}/storycast.db", base_dir())
}
fn default_sessions_dir() -> String {
    format!("{}/sessions", base_dir())
}
fn default_markers_dir() -> String {
    format!("{}/markers", base_dir())
}
fn base_dir() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{home}/.storycast")
}

impl StorycastConfig {
    /// Load config from a TOML file with STORYCAST_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.storycast/storycast.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: StorycastConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("STORYCAST_").split("_"))
            .extract()
            .map_err(|e| crate::error::StorycastError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    format!("{}/storycast.toml", base_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = StorycastConfig::default();
        assert_eq!(cfg.gateway.port, DEFAULT_PORT);
        assert_eq!(cfg.gateway.bind, "127.0.0.1");
        assert!(cfg.telemetry.dsn.is_none());
        assert!(cfg.database.path.ends_with("storycast.db"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = StorycastConfig::load(Some("/nonexistent/storycast.toml")).expect("load");
        assert_eq!(cfg.gateway.port, DEFAULT_PORT);
    }
}
