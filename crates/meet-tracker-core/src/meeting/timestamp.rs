use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Milliseconds since the Unix epoch.
///
/// This is the only persisted form of a meeting time. Display strings are
/// derived from it at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Wrap a raw epoch-millisecond value.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Raw epoch-millisecond value.
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Convert to a UTC datetime, or `None` if out of chrono's range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Whole seconds elapsed from `self` to `later`, rounded to nearest.
    ///
    /// Returns 0 when `later` is not after `self`.
    pub fn seconds_until(self, later: Timestamp) -> u64 {
        let millis = later.0.saturating_sub(self.0);
        if millis <= 0 {
            return 0;
        }
        ((millis as u64) + 500) / 1000
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reads an optional timestamp, treating a non-positive value as unset.
///
/// The extension sends `endTime: 0` for meetings that have not ended yet.
pub(crate) fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.filter(|millis| *millis > 0).map(Timestamp))
}
