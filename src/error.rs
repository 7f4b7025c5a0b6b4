//! Error types
//!
//! Three layers: the store (`StorageError`), the reservation state machine
//! of a single resource (`ReservationError`) and the administration surface
//! (`ApiError`) that the CLI maps to user-facing messages.

use thiserror::Error;

/// Errors raised by fleet persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Sled(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid record for key {key}: {reason}")]
    InvalidRecord { key: String, reason: String },

    #[error("Save rejected: {0}")]
    Injected(String),
}

/// Rejected transitions of the reserve/release state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReservationError {
    #[error("Resource {id} is disabled and cannot be reserved")]
    ResourceDisabled { id: String },

    #[error("Resource {id} is already reserved by {holder}")]
    AlreadyReserved { id: String, holder: String },

    #[error("Resource {id} is not reserved")]
    NotReserved { id: String },

    #[error("Key does not match the reservation of resource {id}")]
    KeyMismatch { id: String },
}

/// Errors surfaced by reservation administration and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No node with name {0} exists in the fleet.")]
    NodeNotFound(String),

    #[error("No resource with id {resource_id} exists on node {node}.")]
    ResourceNotFound { node: String, resource_id: String },

    #[error(transparent)]
    Reservation(#[from] ReservationError),

    /// The in-memory change was applied but the fleet could not be saved.
    #[error("Resource {resource_id} on node {node} was updated but the fleet could not be saved: {source}")]
    NotPersisted {
        node: String,
        resource_id: String,
        #[source]
        source: StorageError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    /// True for failures where the fleet state on disk may be stale.
    pub fn is_io(&self) -> bool {
        matches!(self, ApiError::NotPersisted { .. } | ApiError::Storage(_))
    }
}
