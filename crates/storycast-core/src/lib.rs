//! `storycast-core` — shared types, configuration and error taxonomy.
//!
//! Everything the other crates agree on lives here: the weekday/post-time
//! domain types, the account record, the figment-backed config loader and
//! the Sentry-backed telemetry helpers.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::StorycastConfig;
pub use error::{Result, StorycastError};
pub use types::{Account, DayConfig, Meridiem, PostTime, Weekday};
