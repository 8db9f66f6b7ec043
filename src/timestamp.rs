//! Wire timestamps.
//!
//! The Zentral API encodes date-times as `YYYY-MM-DDTHH:MM:SS.ffffff`:
//! microsecond precision and no timezone suffix. Values are UTC. This is not
//! RFC 3339, so `chrono`'s default serde encoding cannot be used directly.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// `strftime` layout of timestamps on the wire.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A UTC instant with microsecond precision, (de)serialized in the API's
/// fixed layout.
///
/// Construction truncates to whole microseconds, so formatting and parsing
/// a `Timestamp` always reproduces the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wraps `instant`, dropping sub-microsecond precision.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Timestamp(instant.trunc_subsecs(6))
    }

    /// The current time.
    pub fn now() -> Self {
        Timestamp::new(Utc::now())
    }

    /// Parses a timestamp in [`TIMESTAMP_FORMAT`].
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let naive = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)?;
        Ok(Timestamp::new(naive.and_utc()))
    }

    /// The wrapped instant.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Timestamp::new(instant)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Timestamp::parse(&s)
            .map_err(|e| de::Error::custom(format!("invalid timestamp {s:?}: {e}")))
    }
}
