use crate::meeting::{MeetingStatus, Timestamp, timestamp::deserialize_optional_timestamp};

use serde::{Deserialize, Serialize};

/// Placeholder title for meetings whose name could not be scraped.
pub const UNTITLED_MEETING: &str = "Untitled meeting";

/// One tracked occurrence of a video call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    /// `{meetingCode}-{dateStamp}`.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub title: String,
    /// Display-formatted creation date, used to group history.
    #[serde(default)]
    pub date: String,
    /// First join. Never changes once the record exists.
    pub start_time: Timestamp,
    /// Most recent leave.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<Timestamp>,
    /// Seconds in the most recent join/leave cycle.
    #[serde(default)]
    pub duration: u64,
    /// Seconds across every join/leave cycle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cumulative_duration: Option<u64>,
    /// Every rejoin instant, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejoin_times: Vec<Timestamp>,
    /// Set once the user renames the meeting; lifecycle updates then keep the title.
    #[serde(default, skip_serializing_if = "is_false")]
    pub title_locked: bool,
    /// Lifecycle status.
    pub status: MeetingStatus,
}

impl MeetingRecord {
    /// A freshly joined meeting.
    pub fn started(
        id: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
        start_time: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date: date.into(),
            start_time,
            end_time: None,
            duration: 0,
            cumulative_duration: None,
            rejoin_times: Vec::new(),
            title_locked: false,
            status: MeetingStatus::InProgress,
        }
    }

    /// The "meeting ended" form of this message: completed at `end_time`
    /// after `duration` seconds in the call.
    pub fn ended(mut self, end_time: Timestamp, duration: u64) -> Self {
        self.end_time = Some(end_time);
        self.duration = duration;
        self.status = MeetingStatus::Completed;
        self
    }

    /// The "meeting started" form of this message for a rejoin at `at`.
    pub fn rejoined(mut self, at: Timestamp) -> Self {
        self.start_time = at;
        self.duration = 0;
        self.status = MeetingStatus::InProgress;
        self
    }

    /// Whether the user is still in the call.
    pub fn is_in_progress(&self) -> bool {
        self.status == MeetingStatus::InProgress
    }

    /// Whether the user has left the call.
    pub fn is_completed(&self) -> bool {
        self.status == MeetingStatus::Completed
    }

    /// Total attended seconds, falling back to the last cycle when no
    /// cumulative total has been recorded.
    pub fn attended_seconds(&self) -> u64 {
        self.cumulative_duration.unwrap_or(self.duration)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
