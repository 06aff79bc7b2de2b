use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, StorycastError};

/// Days of the week, Monday-first.
///
/// The lowercase English name ("monday") is the canonical storage form —
/// it keys posting-marker files and the `day` column of the attempt log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days in panel display order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }

    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }

    /// Days until the next occurrence of `self`, seen from `from` (0–6).
    pub fn days_from(self, from: chrono::Weekday) -> i64 {
        let target = self.to_chrono().num_days_from_monday() as i64;
        let current = from.num_days_from_monday() as i64;
        (target - current).rem_euclid(7)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Weekday {
    type Err = StorycastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            other => Err(StorycastError::Validation(format!("unknown weekday: {other}"))),
        }
    }
}

/// AM/PM selector value from the panel's 12-hour time inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    Am,
    Pm,
}

impl std::str::FromStr for Meridiem {
    type Err = StorycastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "AM" => Ok(Meridiem::Am),
            "PM" => Ok(Meridiem::Pm),
            other => Err(StorycastError::Validation(format!("unknown meridiem: {other}"))),
        }
    }
}

/// A wall-clock posting time, 24-hour. Displays as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTime {
    pub hour: u8,
    pub minute: u8,
}

impl PostTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(StorycastError::Validation(format!(
                "invalid time {hour:02}:{minute:02}"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Convert the panel's 12-hour selectors to 24-hour.
    ///
    /// Noon rule: 12 PM → 12:MM, 12 AM → 00:MM. Other PM hours gain 12.
    pub fn from_12h(hour: u8, minute: u8, meridiem: Meridiem) -> Result<Self> {
        if !(1..=12).contains(&hour) {
            return Err(StorycastError::Validation(format!(
                "hour must be 1-12, got {hour}"
            )));
        }
        let hour24 = match meridiem {
            Meridiem::Pm if hour != 12 => hour + 12,
            Meridiem::Am if hour == 12 => 0,
            _ => hour,
        };
        Self::new(hour24, minute)
    }
}

impl fmt::Display for PostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A configured social-media account.
///
/// Held in process memory only — accounts are never written to durable
/// storage and die with the process.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
}

impl Account {
    /// Validate and build an account from panel input.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        if username.trim().is_empty() || password.is_empty() {
            return Err(StorycastError::Validation(
                "username and password are required".to_string(),
            ));
        }
        Ok(Self {
            username: username.trim().to_string(),
            password,
        })
    }
}

// Manual Debug so passwords never end up in log output.
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Folder and posting time for one enabled weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayConfig {
    pub day: Weekday,
    pub folder: PathBuf,
    pub time: PostTime,
}

impl DayConfig {
    /// Build a `DayConfig` from one row of the panel's weekly grid.
    ///
    /// Returns `Ok(None)` when the day is not enabled. The folder string is
    /// trimmed but not checked for existence — a missing folder is skipped
    /// at posting time, not rejected here.
    pub fn from_panel(
        day: Weekday,
        enabled: bool,
        folder: &str,
        hour: u8,
        minute: u8,
        meridiem: Meridiem,
    ) -> Result<Option<Self>> {
        if !enabled {
            return Ok(None);
        }
        let folder = folder.trim();
        if folder.is_empty() {
            return Err(StorycastError::Validation(format!(
                "no folder configured for {day}"
            )));
        }
        Ok(Some(Self {
            day,
            folder: PathBuf::from(folder),
            time: PostTime::from_12h(hour, minute, meridiem)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn weekday_display_parse_roundtrip() {
        for day in Weekday::ALL {
            let parsed = Weekday::from_str(&day.to_string()).expect("parse");
            assert_eq!(parsed, day);
        }
    }

    #[test]
    fn weekday_parse_is_case_insensitive() {
        assert_eq!(Weekday::from_str("Friday").unwrap(), Weekday::Friday);
        assert!(Weekday::from_str("frday").is_err());
    }

    #[test]
    fn midnight_rule() {
        let t = PostTime::from_12h(12, 30, Meridiem::Am).unwrap();
        assert_eq!(t.to_string(), "00:30");
    }

    #[test]
    fn noon_rule() {
        let t = PostTime::from_12h(12, 5, Meridiem::Pm).unwrap();
        assert_eq!(t.to_string(), "12:05");
    }

    #[test]
    fn am_hours_unchanged_pm_hours_shifted() {
        for hour in 1..=11u8 {
            for minute in [0u8, 59] {
                let am = PostTime::from_12h(hour, minute, Meridiem::Am).unwrap();
                assert_eq!(am.hour, hour);
                assert_eq!(am.minute, minute);
                let pm = PostTime::from_12h(hour, minute, Meridiem::Pm).unwrap();
                assert_eq!(pm.hour, hour + 12);
            }
        }
    }

    #[test]
    fn out_of_range_hour_rejected() {
        assert!(PostTime::from_12h(0, 0, Meridiem::Am).is_err());
        assert!(PostTime::from_12h(13, 0, Meridiem::Pm).is_err());
        assert!(PostTime::from_12h(3, 60, Meridiem::Am).is_err());
    }

    #[test]
    fn empty_credentials_rejected() {
        assert!(Account::new("", "secret").is_err());
        assert!(Account::new("alice", "").is_err());
        assert!(Account::new("  ", "secret").is_err());
        let acc = Account::new(" alice ", "secret").unwrap();
        assert_eq!(acc.username, "alice");
    }

    #[test]
    fn account_debug_redacts_password() {
        let acc = Account::new("alice", "hunter2").unwrap();
        let dump = format!("{acc:?}");
        assert!(!dump.contains("hunter2"));
    }

    #[test]
    fn disabled_day_builds_nothing() {
        let cfg =
            DayConfig::from_panel(Weekday::Monday, false, "/media", 9, 0, Meridiem::Am).unwrap();
        assert!(cfg.is_none());
    }

    #[test]
    fn enabled_day_converts_time() {
        let cfg = DayConfig::from_panel(Weekday::Friday, true, " /media/friday ", 7, 45, Meridiem::Pm)
            .unwrap()
            .expect("enabled");
        assert_eq!(cfg.folder, PathBuf::from("/media/friday"));
        assert_eq!(cfg.time.to_string(), "19:45");
    }

    #[test]
    fn enabled_day_without_folder_is_an_error() {
        assert!(DayConfig::from_panel(Weekday::Monday, true, "  ", 9, 0, Meridiem::Am).is_err());
    }
}
