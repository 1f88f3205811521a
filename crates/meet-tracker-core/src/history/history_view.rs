use crate::{
    MeetingRecord,
    history::{format_clock_time, format_duration, format_time_range},
};

use chrono::TimeZone;
use serde::Serialize;

/// One row of the history list, ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Record id, used for rename and delete.
    pub id: String,
    /// Meeting title.
    pub title: String,
    /// Clock range, e.g. `10:30 AM - 11:05 AM`. In-progress entries show
    /// only the join time.
    pub time_range: String,
    /// Attended time, e.g. `35m 0s`. Absent while the meeting is in progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_label: Option<String>,
}

/// Completed meetings sharing one `date` label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateGroup {
    /// The shared date label.
    pub date: String,
    /// Meetings in collection order.
    pub meetings: Vec<HistoryEntry>,
}

/// The collection arranged for the popup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    /// Meetings the user is currently in.
    pub in_progress: Vec<HistoryEntry>,
    /// Completed meetings grouped by date, groups in first-seen order.
    pub completed: Vec<DateGroup>,
}

impl HistoryView {
    /// Arrange `meetings`, rendering clock times in `tz`.
    pub fn from_meetings<Tz>(meetings: &[MeetingRecord], tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut view = HistoryView::default();

        for meeting in meetings {
            if meeting.is_in_progress() {
                // A leave from before a rejoin is not an end time for the live call.
                view.in_progress.push(HistoryEntry {
                    id: meeting.id.clone(),
                    title: meeting.title.clone(),
                    time_range: format_clock_time(meeting.start_time, tz),
                    duration_label: None,
                });
                continue;
            }

            let entry = HistoryEntry {
                id: meeting.id.clone(),
                title: meeting.title.clone(),
                time_range: format_time_range(meeting.start_time, meeting.end_time, tz),
                duration_label: Some(format_duration(meeting.attended_seconds())),
            };

            match view.completed.iter_mut().find(|g| g.date == meeting.date) {
                Some(group) => group.meetings.push(entry),
                None => view.completed.push(DateGroup {
                    date: meeting.date.clone(),
                    meetings: vec![entry],
                }),
            }
        }

        view
    }

    /// Number of completed meetings across all groups.
    pub fn completed_count(&self) -> usize {
        self.completed.iter().map(|g| g.meetings.len()).sum()
    }
}
