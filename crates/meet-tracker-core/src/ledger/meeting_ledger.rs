use crate::{
    CoreResult, LedgerError, MeetingRecord,
    ledger::{KeyValueStore, LedgerSnapshot, reconcile},
};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Storage key the extension has always used for the collection.
pub const DEFAULT_STORAGE_KEY: &str = "allMeetings";

/// Read-modify-write cycles attempted before giving up on a contended write.
pub const DEFAULT_MAX_WRITE_ATTEMPTS: u32 = 3;

/// Owns the persisted meeting collection.
///
/// Every mutation goes through one of the public operations, which run a
/// full load/modify/persist cycle while holding `write_lock`. Two ledgers in
/// the same process must not share a store; across processes the stored
/// `revision` detects interleaved writers and the cycle is retried.
pub struct MeetingLedger<S> {
    store: S,
    key: String,
    max_write_attempts: u32,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> MeetingLedger<S> {
    /// Create a ledger over `store`, persisting under `key`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            max_write_attempts: DEFAULT_MAX_WRITE_ATTEMPTS,
            write_lock: Mutex::new(()),
        }
    }

    /// Override how many times a contended write is retried (minimum 1).
    pub fn with_max_write_attempts(mut self, attempts: u32) -> Self {
        self.max_write_attempts = attempts.max(1);
        self
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current collection. A missing or unreadable value reads as empty.
    #[instrument(skip(self))]
    pub async fn meetings(&self) -> Vec<MeetingRecord> {
        self.load().await.meetings
    }

    /// Merge a lifecycle message into the collection and persist it.
    ///
    /// Returns the collection as written so callers can derive the badge
    /// without a second read.
    #[instrument(skip(self, incoming), fields(meeting_id = %incoming.id, status = ?incoming.status))]
    pub async fn reconcile(&self, incoming: MeetingRecord) -> CoreResult<Vec<MeetingRecord>> {
        self.mutate(|meetings| {
            let transition = reconcile::reconcile_into(meetings, incoming.clone());
            debug!(meeting_id = %incoming.id, ?transition, "Meeting reconciled");
            true
        })
        .await
    }

    /// Rename a meeting. Unknown ids and blank titles are ignored.
    #[instrument(skip(self))]
    pub async fn update_title(&self, id: &str, new_title: &str) -> CoreResult<Vec<MeetingRecord>> {
        self.mutate(|meetings| {
            let updated = reconcile::apply_title(meetings, id, new_title);
            if !updated {
                debug!(meeting_id = %id, "No meeting to rename");
            }
            updated
        })
        .await
    }

    /// Remove every completed meeting, keeping in-progress ones.
    #[instrument(skip(self))]
    pub async fn clear_completed(&self) -> CoreResult<Vec<MeetingRecord>> {
        self.mutate(|meetings| {
            let before = meetings.len();
            *meetings = reconcile::clear_completed(std::mem::take(meetings));
            info!(removed = before - meetings.len(), "Completed meetings cleared");
            true
        })
        .await
    }

    /// Remove one meeting. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub async fn delete_one(&self, id: &str) -> CoreResult<Vec<MeetingRecord>> {
        self.mutate(|meetings| {
            let before = meetings.len();
            *meetings = reconcile::delete_one(id, std::mem::take(meetings));
            let removed = before != meetings.len();
            if !removed {
                debug!(meeting_id = %id, "No meeting to delete");
            }
            removed
        })
        .await
    }

    /// Run one read-modify-write cycle under the write lock.
    ///
    /// `apply` edits the loaded collection and reports whether it changed
    /// anything; unchanged collections are not written back.
    async fn mutate<F>(&self, mut apply: F) -> CoreResult<Vec<MeetingRecord>>
    where
        F: FnMut(&mut Vec<MeetingRecord>) -> bool,
    {
        let _guard = self.write_lock.lock().await;

        for attempt in 1..=self.max_write_attempts {
            let snapshot = self.load_for_write().await?;
            let mut meetings = snapshot.meetings.clone();

            if !apply(&mut meetings) {
                return Ok(meetings);
            }

            let current_revision = self.load_for_write().await?.revision;
            if current_revision != snapshot.revision {
                warn!(
                    attempt,
                    expected = snapshot.revision,
                    found = current_revision,
                    "Collection changed during update, retrying"
                );
                continue;
            }

            let next = snapshot.next(meetings);
            self.persist(&next).await?;

            debug!(
                revision = next.revision,
                meeting_count = next.meetings.len(),
                "Collection persisted"
            );

            return Ok(next.meetings);
        }

        Err(LedgerError::ConcurrentModification {
            attempts: self.max_write_attempts,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Load the stored snapshot, degrading every failure to an empty one.
    ///
    /// First run and a broken store look the same to callers.
    async fn load(&self) -> LedgerSnapshot {
        match self.try_load().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, key = %self.key, "Stored collection unavailable, using empty collection");
                LedgerSnapshot::empty()
            }
        }
    }

    /// Like [`load`](Self::load), except a collection from a newer schema is
    /// an error. Writing over it would lose data this build cannot read.
    async fn load_for_write(&self) -> CoreResult<LedgerSnapshot> {
        match self.try_load().await {
            Ok(snapshot) => Ok(snapshot),
            Err(e @ LedgerError::UnsupportedSchema { .. }) => Err(e),
            Err(e) => {
                warn!(error = %e, key = %self.key, "Stored collection unavailable, using empty collection");
                Ok(LedgerSnapshot::empty())
            }
        }
    }

    async fn try_load(&self) -> CoreResult<LedgerSnapshot> {
        match self.store.get(&self.key).await? {
            Some(raw) => LedgerSnapshot::decode(&raw),
            None => Ok(LedgerSnapshot::empty()),
        }
    }

    async fn persist(&self, snapshot: &LedgerSnapshot) -> CoreResult<()> {
        let encoded = snapshot.encode()?;
        self.store.set(&self.key, encoded).await
    }
}
