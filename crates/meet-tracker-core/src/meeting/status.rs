use serde::{Deserialize, Serialize};

/// Lifecycle status of a meeting record.
///
/// Serialized as `"in-progress"` / `"completed"` to stay wire-compatible with
/// the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeetingStatus {
    /// The user is currently in the call.
    InProgress,
    /// The user has left the call.
    Completed,
}

/// What an incoming lifecycle message does to the stored record.
///
/// Status only moves `InProgress -> Completed`. A start message for a record
/// that already exists is a rejoin (a self-transition into `InProgress`),
/// never a second record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No record with this id exists yet.
    Create,
    /// The user joined a meeting that is already on record.
    Rejoin,
    /// The user left an in-progress meeting.
    Complete,
    /// An end message for a meeting that is already completed.
    DuplicateEnd,
}

impl Transition {
    /// Classify an incoming status against the stored one (if any).
    pub fn between(existing: Option<MeetingStatus>, incoming: MeetingStatus) -> Self {
        match (existing, incoming) {
            (None, _) => Transition::Create,
            (Some(_), MeetingStatus::InProgress) => Transition::Rejoin,
            (Some(MeetingStatus::InProgress), MeetingStatus::Completed) => Transition::Complete,
            (Some(MeetingStatus::Completed), MeetingStatus::Completed) => {
                Transition::DuplicateEnd
            }
        }
    }
}
