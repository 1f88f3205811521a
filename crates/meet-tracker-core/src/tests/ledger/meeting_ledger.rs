use crate::{
    CoreResult, DEFAULT_STORAGE_KEY, KeyValueStore, LedgerError, LedgerSnapshot, MeetingLedger,
    MeetingStatus, MemoryStore,
    tests::{T0, at, started},
};

use std::{
    panic::Location,
    sync::atomic::{AtomicUsize, Ordering},
};

use error_location::ErrorLocation;

/// Store whose reads or writes always fail, delegating the rest to memory.
struct FailingStore {
    inner: MemoryStore,
    fail_reads: bool,
    fail_writes: bool,
}

impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        if self.fail_reads {
            return Err(LedgerError::StoreRead {
                key: key.to_string(),
                reason: "storage unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> CoreResult<()> {
        if self.fail_writes {
            return Err(LedgerError::StoreWrite {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.inner.set(key, value).await
    }
}

/// Store that simulates another process writing between the ledger's load
/// and its revision check.
///
/// Every `interfere_every`-th read first writes a foreign snapshot with a
/// fresh revision and an extra "foreign" meeting.
struct InterleavingStore {
    inner: MemoryStore,
    reads: AtomicUsize,
    interfere_every: usize,
    max_interferences: usize,
}

impl KeyValueStore for InterleavingStore {
    #[allow(clippy::unwrap_used)]
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let read = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
        let interference = read / self.interfere_every;

        if read % self.interfere_every == 0 && interference <= self.max_interferences {
            let current = match self.inner.peek(key) {
                Some(raw) => LedgerSnapshot::decode(&raw).unwrap(),
                None => LedgerSnapshot::empty(),
            };
            let mut meetings = current.meetings.clone();
            meetings.push(started(&format!("foreign-{interference}"), "Other tab", T0));
            let foreign = current.next(meetings);
            self.inner.put(key, foreign.encode().unwrap());
        }

        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> CoreResult<()> {
        self.inner.set(key, value).await
    }
}

fn ledger() -> MeetingLedger<MemoryStore> {
    MeetingLedger::new(MemoryStore::new(), DEFAULT_STORAGE_KEY)
}

/// WHAT: The join/leave/rejoin/leave scenario persists through the ledger
/// WHY: Each step must be durable, not only correct in memory
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_full_lifecycle_when_reconciling_through_ledger_then_store_holds_final_state() {
    // Given: An empty ledger
    let ledger = ledger();
    let id = "abc-010124";

    // When: Join, leave after 300s, rejoin, leave after 120s
    ledger.reconcile(started(id, "Standup", T0)).await.unwrap();
    ledger
        .reconcile(started(id, "Standup", T0).ended(at(300), 300))
        .await
        .unwrap();
    ledger.reconcile(started(id, "Standup", at(600))).await.unwrap();
    let returned = ledger
        .reconcile(started(id, "Standup", at(600)).ended(at(720), 120))
        .await
        .unwrap();

    // Then: Returned and stored collections agree on the final record
    let stored = ledger.meetings().await;
    assert_eq!(returned, stored);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, MeetingStatus::Completed);
    assert_eq!(stored[0].start_time, T0);
    assert_eq!(stored[0].rejoin_times, vec![at(600)]);
    assert_eq!(stored[0].cumulative_duration, Some(420));

    let raw = ledger.store().peek(DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(LedgerSnapshot::decode(&raw).unwrap().revision, 4);
}

/// WHAT: Renames persist and survive later lifecycle messages
/// WHY: The rename path is what makes a title authoritative
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_renamed_meeting_when_meeting_ends_then_user_title_kept() {
    // Given: A meeting renamed by the user
    let ledger = ledger();
    ledger.reconcile(started("m", "Scraped", T0)).await.unwrap();
    ledger.update_title("m", "Renamed").await.unwrap();

    // When: The recorder ends the meeting with its own title
    let meetings = ledger
        .reconcile(started("m", "Scraped", T0).ended(at(60), 60))
        .await
        .unwrap();

    // Then: The user's title stands
    assert_eq!(meetings[0].title, "Renamed");
}

/// WHAT: No-op operations do not write
/// WHY: Missing targets are already satisfied and need no new revision
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_unknown_id_when_renaming_or_deleting_then_store_untouched() {
    // Given: A ledger with one write
    let ledger = ledger();
    ledger.reconcile(started("m", "Standup", T0)).await.unwrap();

    // When: Renaming and deleting an unknown id
    let renamed = ledger.update_title("missing", "New").await.unwrap();
    let deleted = ledger.delete_one("missing").await.unwrap();

    // Then: Same collection, still revision 1
    assert_eq!(renamed.len(), 1);
    assert_eq!(deleted.len(), 1);
    let raw = ledger.store().peek(DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(LedgerSnapshot::decode(&raw).unwrap().revision, 1);
}

/// WHAT: Clearing and deleting persist their results
/// WHY: The popup re-reads the store after each action
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_mixed_meetings_when_clearing_and_deleting_then_store_updated() {
    // Given: 3 completed + 1 in-progress
    let ledger = ledger();
    for id in ["a", "b", "c"] {
        ledger
            .reconcile(started(id, id, T0).ended(at(60), 60))
            .await
            .unwrap();
    }
    ledger.reconcile(started("live", "Live", T0)).await.unwrap();

    // When: Deleting one completed meeting, then clearing the rest
    let after_delete = ledger.delete_one("b").await.unwrap();
    let after_clear = ledger.clear_completed().await.unwrap();

    // Then: Delete removed one, clear left only the live meeting
    assert_eq!(after_delete.len(), 3);
    assert_eq!(after_clear.len(), 1);
    assert_eq!(ledger.meetings().await[0].id, "live");
}

/// WHAT: Unreadable storage is treated as empty
/// WHY: A load failure must never block meeting tracking
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_failing_reads_when_reconciling_then_treated_as_empty_and_written() {
    // Given: A store that cannot be read but accepts writes
    let ledger = MeetingLedger::new(
        FailingStore {
            inner: MemoryStore::new(),
            fail_reads: true,
            fail_writes: false,
        },
        DEFAULT_STORAGE_KEY,
    );

    // When: A start message arrives
    let meetings = ledger.reconcile(started("m", "Standup", T0)).await.unwrap();

    // Then: The collection starts from empty and is written
    assert_eq!(meetings.len(), 1);
    assert!(ledger.meetings().await.is_empty());
    assert!(ledger.store().inner.peek(DEFAULT_STORAGE_KEY).is_some());
}

/// WHAT: Write failures surface as StoreWrite and leave storage as it was
/// WHY: The next message re-derives state from what was durably stored
#[tokio::test]
async fn given_failing_writes_when_reconciling_then_store_write_error() {
    // Given: A store that rejects writes
    let ledger = MeetingLedger::new(
        FailingStore {
            inner: MemoryStore::new(),
            fail_reads: false,
            fail_writes: true,
        },
        DEFAULT_STORAGE_KEY,
    );

    // When: Reconciling
    let result = ledger.reconcile(started("m", "Standup", T0)).await;

    // Then: Error returned, nothing stored
    assert!(matches!(result, Err(LedgerError::StoreWrite { .. })));
    assert!(ledger.meetings().await.is_empty());
}

/// WHAT: Corrupt stored data reads as an empty collection
/// WHY: First run and broken storage are handled the same way
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_corrupt_store_when_reconciling_then_starts_fresh() {
    // Given: Garbage under the storage key
    let ledger = MeetingLedger::new(
        MemoryStore::with_entry(DEFAULT_STORAGE_KEY, "{broken"),
        DEFAULT_STORAGE_KEY,
    );

    // When: Reconciling
    let meetings = ledger.reconcile(started("m", "Standup", T0)).await.unwrap();

    // Then: Fresh collection with the new record
    assert_eq!(meetings.len(), 1);
    assert_eq!(ledger.meetings().await.len(), 1);
}

/// WHAT: A collection from a newer schema is read as empty but never overwritten
/// WHY: Downgrading the host must not destroy history it cannot read
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_newer_schema_when_reconciling_then_unsupported_schema_and_store_untouched() {
    // Given: A collection written by a future version
    let raw = r#"{"schemaVersion":99,"revision":7,"meetings":[]}"#;
    let ledger = MeetingLedger::new(
        MemoryStore::with_entry(DEFAULT_STORAGE_KEY, raw),
        DEFAULT_STORAGE_KEY,
    );

    // When: Reading, then reconciling
    let read = ledger.meetings().await;
    let result = ledger.reconcile(started("m", "Standup", T0)).await;

    // Then: Reads see nothing, the write is refused, and the stored value survives
    assert!(read.is_empty());
    assert!(matches!(
        result,
        Err(LedgerError::UnsupportedSchema { found: 99, .. })
    ));
    assert_eq!(ledger.store().peek(DEFAULT_STORAGE_KEY).unwrap(), raw);
}

/// WHAT: Legacy stored arrays are upgraded on the next write
/// WHY: Existing users keep their history after versioning was added
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_legacy_array_when_reconciling_then_upgraded_to_envelope() {
    // Given: An unversioned collection
    let legacy = serde_json::to_string(&vec![started("old", "Old meeting", T0).ended(at(60), 60)]).unwrap();
    let ledger = MeetingLedger::new(
        MemoryStore::with_entry(DEFAULT_STORAGE_KEY, legacy),
        DEFAULT_STORAGE_KEY,
    );

    // When: A new meeting starts
    ledger.reconcile(started("new", "New meeting", T0)).await.unwrap();

    // Then: Both meetings stored in the versioned envelope
    let raw = ledger.store().peek(DEFAULT_STORAGE_KEY).unwrap();
    let snapshot = LedgerSnapshot::decode(&raw).unwrap();
    assert_eq!(snapshot.schema_version, crate::SCHEMA_VERSION);
    assert_eq!(snapshot.revision, 1);
    assert_eq!(snapshot.meetings.len(), 2);
}

/// WHAT: An interleaved foreign write triggers a retry instead of being lost
/// WHY: Last-write-wins would silently discard the other writer's meeting
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_foreign_write_during_update_when_reconciling_then_both_updates_kept() {
    // Given: A store where another writer lands once, between load and write
    let ledger = MeetingLedger::new(
        InterleavingStore {
            inner: MemoryStore::new(),
            reads: AtomicUsize::new(0),
            interfere_every: 2,
            max_interferences: 1,
        },
        DEFAULT_STORAGE_KEY,
    );

    // When: Reconciling a start message
    let meetings = ledger.reconcile(started("mine", "Mine", T0)).await.unwrap();

    // Then: The foreign meeting and ours are both present
    let ids: Vec<&str> = meetings.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["foreign-1", "mine"]);
    let raw = ledger.store().inner.peek(DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(LedgerSnapshot::decode(&raw).unwrap().revision, 2);
}

/// WHAT: Constant interference eventually fails with ConcurrentModification
/// WHY: The ledger must not spin forever against a busy writer
#[tokio::test]
async fn given_constant_foreign_writes_when_reconciling_then_concurrent_modification() {
    // Given: Another writer landing on every revision check
    let ledger = MeetingLedger::new(
        InterleavingStore {
            inner: MemoryStore::new(),
            reads: AtomicUsize::new(0),
            interfere_every: 2,
            max_interferences: usize::MAX,
        },
        DEFAULT_STORAGE_KEY,
    )
    .with_max_write_attempts(2);

    // When: Reconciling
    let result = ledger.reconcile(started("mine", "Mine", T0)).await;

    // Then: Gives up after the configured attempts
    assert!(matches!(
        result,
        Err(LedgerError::ConcurrentModification { attempts: 2, .. })
    ));
}
