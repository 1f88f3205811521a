use crate::{CoreResult, LedgerError, MeetingRecord};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// The persisted form of the meeting collection.
///
/// `revision` increases by one on every successful write and is how the
/// ledger notices that another writer got in between its load and its write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    /// Layout version of this envelope.
    pub schema_version: u32,
    /// Write counter.
    pub revision: u64,
    /// The collection, in insertion order.
    pub meetings: Vec<MeetingRecord>,
}

/// Everything that may be found under the storage key.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLedger {
    Versioned(LedgerSnapshot),
    /// Unversioned layout: a bare array of records.
    Legacy(Vec<MeetingRecord>),
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl LedgerSnapshot {
    /// An empty collection that has never been written.
    pub fn empty() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            revision: 0,
            meetings: Vec::new(),
        }
    }

    /// Parse a stored value, accepting the legacy bare-array layout as schema 0.
    #[track_caller]
    pub fn decode(raw: &str) -> CoreResult<Self> {
        let stored: StoredLedger =
            serde_json::from_str(raw).map_err(|source| LedgerError::Serialization {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        match stored {
            StoredLedger::Versioned(snapshot) if snapshot.schema_version > SCHEMA_VERSION => {
                Err(LedgerError::UnsupportedSchema {
                    found: snapshot.schema_version,
                    supported: SCHEMA_VERSION,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            StoredLedger::Versioned(snapshot) => Ok(snapshot),
            StoredLedger::Legacy(meetings) => Ok(Self {
                schema_version: 0,
                revision: 0,
                meetings,
            }),
        }
    }

    /// Serialize for storage.
    #[track_caller]
    pub fn encode(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|source| LedgerError::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// The snapshot that replaces this one once `meetings` is written.
    pub fn next(&self, meetings: Vec<MeetingRecord>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            revision: self.revision.wrapping_add(1),
            meetings,
        }
    }
}
