use std::collections::BTreeMap;

use chrono::Local;
use tokio::sync::watch;
use tracing::{error, info, warn};

use storycast_core::config::POLL_INTERVAL_SECS;
use storycast_core::telemetry;
use storycast_core::types::{DayConfig, Weekday};
use storycast_poster::PostJob;

use crate::schedule::next_occurrence;
use crate::types::WeeklyTrigger;

/// Drives registered weekly triggers against the posting job.
///
/// Owns its snapshot completely: the trigger list is built from the config
/// handed over at start, and the job inside carries the account copy. The
/// panel keeps no channel to a running engine other than the shutdown
/// signal.
pub struct SchedulerEngine {
    triggers: Vec<WeeklyTrigger>,
    job: PostJob,
}

impl SchedulerEngine {
    /// Register one trigger per configured day, starting from now.
    pub fn new(config: &BTreeMap<Weekday, DayConfig>, job: PostJob) -> Self {
        let now = Local::now();
        let triggers = config
            .values()
            .filter_map(|cfg| match next_occurrence(cfg.day, cfg.time, now) {
                Some(next_run) => {
                    info!(day = %cfg.day, at = %cfg.time, next = %next_run, "trigger registered");
                    Some(WeeklyTrigger {
                        day: cfg.day,
                        at: cfg.time,
                        next_run,
                    })
                }
                None => {
                    warn!(day = %cfg.day, at = %cfg.time, "no local occurrence, trigger dropped");
                    None
                }
            })
            .collect();
        Self { triggers, job }
    }

    /// Main loop. Polls every 20 s until `shutdown` broadcasts `true`.
    ///
    /// The loop must never terminate because of a single job's failure —
    /// that is the system's primary resilience guarantee.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(triggers = self.triggers.len(), "scheduler engine started");

        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(POLL_INTERVAL_SECS));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick().await;
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("scheduler engine shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// Fire every due trigger, then advance it one week.
    async fn tick(&mut self) {
        let now = Local::now();
        for trigger in self.triggers.iter_mut() {
            if !trigger.is_due(now) {
                continue;
            }

            info!(day = %trigger.day, "trigger fired");
            if let Err(e) = self.job.run(trigger.day).await {
                error!(day = %trigger.day, "post job failed: {e}");
                telemetry::report(&e);
            }

            match next_occurrence(trigger.day, trigger.at, Local::now()) {
                Some(next) => trigger.next_run = next,
                None => {
                    // DST gap; leave next_run alone and let the next poll retry.
                    warn!(day = %trigger.day, "could not advance trigger");
                }
            }
        }
    }
}
