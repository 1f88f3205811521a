use crate::MeetingRecord;

/// What the toolbar badge should signal for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeState {
    /// At least one meeting is in progress. Always wins over completed counts.
    Active {
        /// Number of in-progress meetings.
        in_progress: usize,
    },
    /// Nothing in progress, some meetings completed.
    Completed {
        /// Number of completed meetings.
        count: usize,
    },
    /// Nothing to show.
    Cleared,
}

impl BadgeState {
    /// Reduce a collection to its badge signal.
    pub fn from_meetings(meetings: &[MeetingRecord]) -> Self {
        let in_progress = meetings.iter().filter(|m| m.is_in_progress()).count();
        if in_progress > 0 {
            return BadgeState::Active { in_progress };
        }

        match meetings.iter().filter(|m| m.is_completed()).count() {
            0 => BadgeState::Cleared,
            count => BadgeState::Completed { count },
        }
    }
}
