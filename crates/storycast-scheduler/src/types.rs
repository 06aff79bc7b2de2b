use chrono::{DateTime, Local};

use storycast_core::types::{PostTime, Weekday};

/// A registered weekly firing slot.
///
/// `next_run` is local wall-clock time — the panel collects times the way
/// people read them off their own clock.
#[derive(Debug, Clone)]
pub struct WeeklyTrigger {
    pub day: Weekday,
    pub at: PostTime,
    pub next_run: DateTime<Local>,
}

impl WeeklyTrigger {
    pub fn is_due(&self, now: DateTime<Local>) -> bool {
        now >= self.next_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn due_exactly_at_and_after_next_run() {
        let at = Local.with_ymd_and_hms(2026, 8, 3, 9, 0, 0).unwrap();
        let trigger = WeeklyTrigger {
            day: Weekday::Monday,
            at: PostTime::new(9, 0).unwrap(),
            next_run: at,
        };

        assert!(!trigger.is_due(at - Duration::seconds(1)));
        assert!(trigger.is_due(at));
        assert!(trigger.is_due(at + Duration::minutes(5)));
    }
}
