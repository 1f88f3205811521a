mod meeting_ledger;
mod reconcile;
mod snapshot;
mod store;

pub use {
    meeting_ledger::{DEFAULT_MAX_WRITE_ATTEMPTS, DEFAULT_STORAGE_KEY, MeetingLedger},
    reconcile::{apply_title, clear_completed, delete_one, reconcile_into},
    snapshot::{LedgerSnapshot, SCHEMA_VERSION},
    store::{KeyValueStore, MemoryStore},
};
