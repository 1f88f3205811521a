use error_location::ErrorLocation;
use thiserror::Error;

/// Meeting ledger errors with source location tracking.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The backing store could not be read.
    #[error("Store read failed for key {key:?}: {reason} {location}")]
    StoreRead {
        /// Storage key being read.
        key: String,
        /// Description of the read failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The backing store rejected a write.
    #[error("Store write failed for key {key:?}: {reason} {location}")]
    StoreWrite {
        /// Storage key being written.
        key: String,
        /// Description of the write failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Stored or outgoing data could not be (de)serialized.
    #[error("Serialization failed: {source} {location}")]
    Serialization {
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The stored collection was written by a newer schema.
    #[error("Unsupported schema version {found} (supported up to {supported}) {location}")]
    UnsupportedSchema {
        /// Schema version found in storage.
        found: u32,
        /// Highest schema version this build understands.
        supported: u32,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Another writer kept changing the collection between load and write.
    #[error("Collection changed concurrently after {attempts} attempts {location}")]
    ConcurrentModification {
        /// Number of read-modify-write attempts made.
        attempts: u32,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`LedgerError`].
pub type Result<T> = std::result::Result<T, LedgerError>;
