//! `storycast-scheduler` — Tokio-based weekly trigger loop.
//!
//! # Overview
//!
//! Triggers live in memory: one per enabled weekday, captured (together
//! with the accounts/config snapshot inside the posting job) when the
//! panel starts the scheduler. The [`engine::SchedulerEngine`] polls every
//! 20 seconds and fires any trigger whose `next_run` has arrived, then
//! advances it one week.
//!
//! Coarse polling is deliberate — trigger granularity is minute-level, and
//! a poll that raises is reported and swallowed so the loop itself never
//! dies. Restarting the process is the only way to pick up panel changes
//! made after the loop started.

pub mod engine;
pub mod schedule;
pub mod types;

pub use engine::SchedulerEngine;
pub use schedule::next_occurrence;
pub use types::WeeklyTrigger;
