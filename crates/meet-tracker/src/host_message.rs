use meet_tracker_core::{Badge, HistoryView, MeetingRecord};

use serde::{Deserialize, Serialize};

/// Messages the extension sends to the host, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostMessage {
    /// A "meeting started" or "meeting ended" lifecycle event.
    SaveMeeting {
        /// The meeting as the recorder currently sees it.
        meeting: MeetingRecord,
    },
    /// A user rename from the popup.
    #[serde(rename_all = "camelCase")]
    UpdateTitle {
        /// Record to rename.
        meeting_id: String,
        /// New title.
        new_title: String,
    },
    /// Delete one record.
    #[serde(rename_all = "camelCase")]
    DeleteMeeting {
        /// Record to delete.
        meeting_id: String,
    },
    /// Clear history, keeping in-progress meetings.
    ClearCompleted,
    /// Read the collection.
    GetMeetings,
    /// Read the collection arranged for the popup.
    GetHistory,
}

impl HostMessage {
    /// Short name for logs.
    pub fn action(&self) -> &'static str {
        match self {
            HostMessage::SaveMeeting { .. } => "saveMeeting",
            HostMessage::UpdateTitle { .. } => "updateTitle",
            HostMessage::DeleteMeeting { .. } => "deleteMeeting",
            HostMessage::ClearCompleted => "clearCompleted",
            HostMessage::GetMeetings => "getMeetings",
            HostMessage::GetHistory => "getHistory",
        }
    }
}

/// A frame as the extension sends it: the message plus an optional
/// `requestId` the extension uses to match the reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundFrame {
    /// Correlation id chosen by the extension.
    #[serde(default)]
    pub request_id: Option<String>,
    /// The message itself.
    #[serde(flatten)]
    pub message: HostMessage,
}

/// Frame sent back to the extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostResponse {
    /// The `requestId` of the frame this answers. Absent for unsolicited
    /// updates and for requests that carried none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Badge to draw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    /// Collection after the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meetings: Option<Vec<MeetingRecord>>,
    /// Popup arrangement of the collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoryView>,
    /// Why the request failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HostResponse {
    /// Failure reply for `request_id`.
    pub fn failure(request_id: Option<String>, error: impl Into<String>) -> Self {
        Self {
            request_id,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}
