mod meeting_id;
mod record;
mod status;
mod timestamp;

pub use {
    meeting_id::{derive_meeting_id, display_date, meeting_code_from_url},
    record::{MeetingRecord, UNTITLED_MEETING},
    status::{MeetingStatus, Transition},
    timestamp::Timestamp,
};
