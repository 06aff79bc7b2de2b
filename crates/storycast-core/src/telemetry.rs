//! Fire-and-forget error reporting via Sentry.
//!
//! Error monitoring only — no performance traces, no PII. Every helper is a
//! no-op when no DSN is configured, so call sites never need to branch.

use std::error::Error;

use tracing::info;

use crate::config::TelemetryConfig;

/// Initialise the Sentry client. The returned guard must stay alive for the
/// lifetime of the process; dropping it flushes pending events.
pub fn init(config: &TelemetryConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.dsn.as_deref()?;
    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            environment: Some(config.environment.clone().into()),
            traces_sample_rate: 0.0,
            send_default_pii: false,
            ..Default::default()
        },
    ));
    info!(environment = %config.environment, "telemetry enabled");
    Some(guard)
}

/// Report an error to the sink. Never blocks, never fails.
pub fn report<E: Error + ?Sized>(err: &E) {
    sentry::capture_error(err);
}

/// Attach a tag to subsequent reports (e.g. the account and weekday a post
/// job is currently working on).
pub fn tag(key: &str, value: &str) {
    let value = value.to_string();
    let key = key.to_string();
    sentry::configure_scope(move |scope| scope.set_tag(&key, value));
}
