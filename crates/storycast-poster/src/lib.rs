//! `storycast-poster` — the posting workflow.
//!
//! [`PostJob`] is what a scheduler trigger fires: for one weekday it walks
//! the configured accounts, uploads every eligible file in the day's folder
//! in natural-sort order, writes one attempt-log row per upload, and sets
//! the posting marker that keeps the day idempotent.
//!
//! # Failure contract
//!
//! | failure                    | effect                                     |
//! |----------------------------|--------------------------------------------|
//! | marker already set         | account skipped, no rows                   |
//! | folder missing / no media  | account skipped, no rows, no marker        |
//! | login rejected             | account aborted, no rows, no marker        |
//! | single upload fails        | FAIL row, batch continues, marker still set|

pub mod convert;
pub mod error;
pub mod job;
pub mod marker;
pub mod media;

pub use error::{PosterError, Result};
pub use job::PostJob;
pub use marker::MarkerStore;
