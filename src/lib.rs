//! Resource Dispatcher: external resources on worker fleets
//!
//! Discovers the external resources (test devices, licenses, rigs) described
//! in each node's metadata tree, tells which of them can be allocated, and
//! administers their reservation leases.

pub mod admin;
pub mod config;
pub mod error;
pub mod filter;
pub mod fleet;
pub mod logging;
pub mod resource;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;

pub use admin::{ReleaseOutcome, ReservationAdmin, ReserveRequest};
pub use error::{ApiError, ReservationError, StorageError};
pub use filter::AvailabilityFilter;
pub use fleet::{Fleet, Node};
pub use resource::{ExternalResource, Lease, Reservation, StashInfo, StashType};
pub use tree::{MetadataParent, MetadataTree, MetadataValue};
