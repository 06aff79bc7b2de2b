use chrono::{DateTime, Datelike, Duration, Local, TimeZone};

use storycast_core::types::{PostTime, Weekday};

/// Compute the next local occurrence of `day` at `at`, strictly after `from`.
///
/// A later time on the same weekday fires today; an earlier one waits for
/// next week. Returns `None` only when the candidate wall-clock time does
/// not exist locally (DST gap) — the caller skips the slot and the next
/// poll recomputes.
pub fn next_occurrence(
    day: Weekday,
    at: PostTime,
    from: DateTime<Local>,
) -> Option<DateTime<Local>> {
    let days_ahead = day.days_from(from.weekday());
    let candidate_day = from + Duration::days(days_ahead);

    let candidate = Local
        .with_ymd_and_hms(
            candidate_day.year(),
            candidate_day.month(),
            candidate_day.day(),
            at.hour as u32,
            at.minute as u32,
            0,
        )
        .single()?;

    if candidate > from {
        Some(candidate)
    } else {
        // Today's slot already passed — push a full week.
        Some(candidate + Duration::days(7))
    }
}
