//! Minute-of-day time values.
//!
//! Every time inside the engine is a same-day wall-clock minute in
//! `0..=1440`. At the boundary times travel as `HH:MM` strings; `24:00` is
//! accepted as the end-of-day sentinel so a block may run until midnight.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A wall-clock minute of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Minutes in one day.
    pub const MINUTES_PER_DAY: i64 = 1440;
    /// 00:00
    pub const MIDNIGHT: Self = Self(0);
    /// 24:00, the end-of-day sentinel.
    pub const END_OF_DAY: Self = Self(1440);

    /// Build from hour and minute. Values past 24:00 saturate at the end of
    /// the day; use [`TimeOfDay::from_minutes`] for checked construction.
    pub const fn from_hm(hour: u16, minute: u16) -> Self {
        let total = hour as u32 * 60 + minute as u32;
        if total > 1440 {
            Self(1440)
        } else {
            Self(total as u16)
        }
    }

    /// Build from a minute offset, rejecting anything outside the day.
    pub fn from_minutes(minutes: i64) -> Result<Self, ValidationError> {
        if (0..=Self::MINUTES_PER_DAY).contains(&minutes) {
            Ok(Self(minutes as u16))
        } else {
            Err(ValidationError::OutOfDay { minutes })
        }
    }

    /// Parse a strict `HH:MM` string.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidTime {
            value: value.to_string(),
        };

        let bytes = value.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        if value == "24:00" {
            return Ok(Self::END_OF_DAY);
        }

        let time = NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| invalid())?;
        Ok(Self((time.hour() * 60 + time.minute()) as u16))
    }

    pub fn minutes(self) -> i64 {
        self.0 as i64
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Shift by a signed number of minutes, `None` if the result leaves the day.
    pub fn checked_add(self, delta: i64) -> Option<Self> {
        self.minutes()
            .checked_add(delta)
            .and_then(|m| Self::from_minutes(m).ok())
    }

    /// Signed minutes from `self` to `later`.
    pub fn minutes_until(self, later: Self) -> i64 {
        later.minutes() - self.minutes()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hh_mm() {
        let t = TimeOfDay::parse("09:30").unwrap();
        assert_eq!(t.minutes(), 570);
        assert_eq!(t.to_string(), "09:30");
        assert_eq!(TimeOfDay::parse("00:00").unwrap(), TimeOfDay::MIDNIGHT);
        assert_eq!(TimeOfDay::parse("24:00").unwrap(), TimeOfDay::END_OF_DAY);
        assert_eq!(TimeOfDay::END_OF_DAY.to_string(), "24:00");
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["9:30", "09:3", "0930", "25:00", "12:60", "24:01", "ab:cd", ""] {
            assert!(TimeOfDay::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn checked_add_stays_within_day() {
        let t = TimeOfDay::from_hm(23, 30);
        assert_eq!(t.checked_add(30), Some(TimeOfDay::END_OF_DAY));
        assert_eq!(t.checked_add(31), None);
        assert_eq!(TimeOfDay::MIDNIGHT.checked_add(-1), None);
        assert_eq!(t.checked_add(-30), Some(TimeOfDay::from_hm(23, 0)));
        assert_eq!(t.checked_add(i64::MAX), None);
        assert_eq!(t.checked_add(i64::MIN), None);
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&TimeOfDay::from_hm(17, 5)).unwrap();
        assert_eq!(json, "\"17:05\"");
        let parsed: TimeOfDay = serde_json::from_str("\"08:15\"").unwrap();
        assert_eq!(parsed, TimeOfDay::from_hm(8, 15));
        assert!(serde_json::from_str::<TimeOfDay>("\"8:15\"").is_err());
    }

    #[test]
    fn from_hm_saturates() {
        assert_eq!(TimeOfDay::from_hm(30, 0), TimeOfDay::END_OF_DAY);
    }
}
