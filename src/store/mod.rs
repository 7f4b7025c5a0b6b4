//! Fleet Store
//!
//! Persistence port for the fleet. The in-memory fleet is the source of truth
//! within a process; the store makes it survive restarts.

pub mod memory;
pub mod persistence;

pub use memory::MemoryFleetStore;
pub use persistence::SledFleetStore;

use crate::error::StorageError;
use crate::fleet::Node;

/// Fleet Store interface
pub trait FleetStore: Send + Sync {
    /// Every node saved last time, in name order
    fn load(&self) -> Result<Vec<Node>, StorageError>;

    /// Replace the stored fleet with `nodes`
    fn save(&self, nodes: &[Node]) -> Result<(), StorageError>;
}
