use crate::{
    HistoryView, MeetingRecord,
    tests::{T0, at, started},
};

use chrono::Utc;

fn completed_on(id: &str, date: &str, seconds: u64) -> MeetingRecord {
    let mut record = started(id, id, T0).ended(at(seconds as i64), seconds);
    record.date = date.to_string();
    record.cumulative_duration = Some(seconds);
    record
}

/// WHAT: Completed meetings group by date in first-seen order
/// WHY: The popup lists history day by day
#[test]
fn given_meetings_on_two_days_when_building_view_then_grouped_in_order() {
    // Given: Completed meetings across two dates plus a live one
    let meetings = vec![
        completed_on("a", "Monday, January 1", 60),
        completed_on("b", "Tuesday, January 2", 90),
        started("live", "Live", T0),
        completed_on("c", "Monday, January 1", 3900),
    ];

    // When: Building the view
    let view = HistoryView::from_meetings(&meetings, &Utc);

    // Then: One live entry, two ordered groups
    assert_eq!(view.in_progress.len(), 1);
    assert_eq!(view.in_progress[0].id, "live");
    assert_eq!(view.completed.len(), 2);
    assert_eq!(view.completed[0].date, "Monday, January 1");
    assert_eq!(view.completed[0].meetings.len(), 2);
    assert_eq!(view.completed[0].meetings[1].duration_label.as_deref(), Some("1h 5m"));
    assert_eq!(view.completed[1].date, "Tuesday, January 2");
    assert_eq!(view.completed_count(), 3);
}

/// WHAT: Entries show cumulative time, not just the last cycle
/// WHY: After a rejoin the user attended more than the last segment
#[test]
fn given_rejoined_meeting_when_building_view_then_cumulative_shown() {
    // Given: Last cycle 120s, total 420s
    let mut record = completed_on("m", "Monday, January 1", 120);
    record.cumulative_duration = Some(420);

    // When: Building the view
    let view = HistoryView::from_meetings(&[record], &Utc);

    // Then: Total shown
    assert_eq!(view.completed[0].meetings[0].duration_label.as_deref(), Some("7m 0s"));
}

/// WHAT: A live meeting shows only when it was joined
/// WHY: After a rejoin the stored end time and totals belong to the earlier stint
#[test]
fn given_rejoined_live_meeting_when_building_view_then_join_time_only() {
    // Given: Joined at T0, left after 5 minutes, rejoined at +10 minutes
    let mut record = started("m", "Standup", T0).ended(at(300), 300);
    record.cumulative_duration = Some(300);
    record.rejoin_times.push(at(600));
    record.status = crate::MeetingStatus::InProgress;

    // When: Building the view in UTC
    let view = HistoryView::from_meetings(&[record], &Utc);

    // Then: Start clock only, no duration
    let entry = &view.in_progress[0];
    assert_eq!(entry.time_range, "10:30 AM");
    assert!(entry.duration_label.is_none());
}
