//! Meet Tracker Core Library
//!
//! Meeting lifecycle reconciliation over a persisted collection: merges
//! "started"/"ended" messages into one record per meeting, protects start
//! times and user-set titles, accumulates attended time across rejoins and
//! derives the toolbar badge.
//!
//! # Example
//!
//! ```no_run
//! use meet_tracker_core::{
//!     BadgeStyle, CoreResult, MeetingLedger, MeetingRecord, MemoryStore, Timestamp,
//!     derive_badge,
//! };
//!
//! # async fn run() -> CoreResult<()> {
//! let ledger = MeetingLedger::new(MemoryStore::new(), "allMeetings");
//!
//! let joined = Timestamp::now();
//! let started = MeetingRecord::started("abc-defg-hij-041724", "Standup", "Wednesday, April 17", joined);
//! ledger.reconcile(started.clone()).await?;
//!
//! let meetings = ledger.reconcile(started.ended(Timestamp::now(), 300)).await?;
//! let badge = derive_badge(&meetings, &BadgeStyle::default());
//! println!("Badge: {}", badge.text);
//! # Ok(())
//! # }
//! ```

mod badge;
mod error;
mod history;
mod ledger;
mod meeting;

pub use {
    badge::{
        Badge, BadgeState, BadgeStyle, DEFAULT_ACTIVE_COLOR, DEFAULT_COMPLETED_COLOR, derive_badge,
    },
    error::{LedgerError, Result as CoreResult},
    history::{
        DateGroup, HistoryEntry, HistoryView, format_clock_time, format_duration,
        format_time_range,
    },
    ledger::{
        DEFAULT_MAX_WRITE_ATTEMPTS, DEFAULT_STORAGE_KEY, KeyValueStore, LedgerSnapshot,
        MeetingLedger, MemoryStore, SCHEMA_VERSION, apply_title, clear_completed, delete_one,
        reconcile_into,
    },
    meeting::{
        MeetingRecord, MeetingStatus, Timestamp, Transition, UNTITLED_MEETING, derive_meeting_id,
        display_date, meeting_code_from_url,
    },
};
