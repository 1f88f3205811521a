//! Pure collection rules. The ledger wraps each of these in a
//! load/persist cycle; they never touch storage themselves.

use crate::meeting::{MeetingRecord, Transition, UNTITLED_MEETING};

/// Merge one lifecycle message into the collection.
///
/// - Unknown id: the message becomes a new record, appended at the end.
/// - Rejoin: the incoming start time is appended to `rejoin_times`.
/// - Complete: the incoming cycle's `duration` is added to `cumulative_duration`.
/// - Duplicate end: the record is left as it is.
///
/// In every merge the stored `start_time` is kept, and a locked title wins
/// over the incoming one. The merged record keeps its position.
pub fn reconcile_into(meetings: &mut Vec<MeetingRecord>, incoming: MeetingRecord) -> Transition {
    let Some(index) = meetings.iter().position(|m| m.id == incoming.id) else {
        meetings.push(new_record(incoming));
        return Transition::Create;
    };

    let existing = &mut meetings[index];
    let transition = Transition::between(Some(existing.status), incoming.status);

    if transition != Transition::DuplicateEnd {
        *existing = merge(existing, incoming, transition);
    }

    transition
}

/// Rename one record and lock its title against lifecycle updates.
///
/// Returns `false` (and changes nothing) when the id is unknown or the new
/// title is blank.
pub fn apply_title(meetings: &mut [MeetingRecord], id: &str, new_title: &str) -> bool {
    let new_title = new_title.trim();
    if new_title.is_empty() {
        return false;
    }

    match meetings.iter_mut().find(|m| m.id == id) {
        Some(meeting) => {
            meeting.title = new_title.to_string();
            meeting.title_locked = true;
            true
        }
        None => false,
    }
}

/// Drop every completed record, keeping in-progress ones in order.
pub fn clear_completed(meetings: Vec<MeetingRecord>) -> Vec<MeetingRecord> {
    meetings.into_iter().filter(|m| m.is_in_progress()).collect()
}

/// Drop the record with `id`, leaving every other record untouched.
pub fn delete_one(id: &str, meetings: Vec<MeetingRecord>) -> Vec<MeetingRecord> {
    meetings.into_iter().filter(|m| m.id != id).collect()
}

fn new_record(mut incoming: MeetingRecord) -> MeetingRecord {
    if incoming.title.trim().is_empty() {
        incoming.title = UNTITLED_MEETING.to_string();
    }
    if incoming.is_completed() && incoming.cumulative_duration.is_none() {
        incoming.cumulative_duration = Some(incoming.duration);
    }
    // Only an explicit rename may lock a title.
    incoming.title_locked = false;
    incoming
}

fn merge(existing: &MeetingRecord, incoming: MeetingRecord, transition: Transition) -> MeetingRecord {
    let mut cumulative_duration = existing.cumulative_duration;
    let mut rejoin_times = existing.rejoin_times.clone();

    match transition {
        Transition::Complete => {
            cumulative_duration = Some(
                existing
                    .cumulative_duration
                    .unwrap_or(0)
                    .saturating_add(incoming.duration),
            );
        }
        Transition::Rejoin => rejoin_times.push(incoming.start_time),
        Transition::Create | Transition::DuplicateEnd => {}
    }

    let title = if existing.title_locked || incoming.title.trim().is_empty() {
        existing.title.clone()
    } else {
        incoming.title
    };

    let date = if incoming.date.trim().is_empty() {
        existing.date.clone()
    } else {
        incoming.date
    };

    MeetingRecord {
        id: existing.id.clone(),
        title,
        date,
        start_time: existing.start_time,
        end_time: incoming.end_time.or(existing.end_time),
        duration: incoming.duration,
        cumulative_duration,
        rejoin_times,
        title_locked: existing.title_locked,
        status: incoming.status,
    }
}
