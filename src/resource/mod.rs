//! External resources
//!
//! An external resource is an allocatable asset attached to a node (test
//! device, license, hardware rig). It sits in the node's metadata tree as a
//! branch and carries its own reservation state machine:
//!
//! ```text
//! Unreserved --reserve--> Reserved
//! Reserved --release(key) | force_release--> Unreserved
//! ```
//!
//! A reserved resource must be released before it can be reserved again.

pub mod lease;

pub use lease::{Lease, StashInfo, StashType};

use crate::error::ReservationError;
use crate::tree::MetadataValue;
use serde::{Deserialize, Serialize};

/// Reservation state of a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Reservation {
    #[default]
    Unreserved,
    Reserved(StashInfo),
}

impl Reservation {
    pub fn is_reserved(&self) -> bool {
        matches!(self, Reservation::Reserved(_))
    }

    pub fn stash(&self) -> Option<&StashInfo> {
        match self {
            Reservation::Reserved(stash) => Some(stash),
            Reservation::Unreserved => None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// One allocatable asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalResource {
    id: String,
    #[serde(default)]
    description: String,
    device_id: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    reserved: Reservation,
    #[serde(default)]
    children: Vec<MetadataValue>,
}

impl ExternalResource {
    /// Enabled, unreserved resource with no description or children
    pub fn new(id: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            device_id: device_id.into(),
            enabled: true,
            reserved: Reservation::Unreserved,
            children: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_children(mut self, children: Vec<MetadataValue>) -> Self {
        self.children = children;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn reservation(&self) -> &Reservation {
        &self.reserved
    }

    pub fn stash(&self) -> Option<&StashInfo> {
        self.reserved.stash()
    }

    pub fn is_reserved(&self) -> bool {
        self.reserved.is_reserved()
    }

    /// Enabled and not reserved
    pub fn is_available(&self) -> bool {
        self.enabled && !self.reserved.is_reserved()
    }

    pub fn children(&self) -> &[MetadataValue] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<MetadataValue> {
        &mut self.children
    }

    /// Move from `Unreserved` to `Reserved(stash)`.
    pub fn reserve(&mut self, stash: StashInfo) -> Result<(), ReservationError> {
        if !self.enabled {
            return Err(ReservationError::ResourceDisabled {
                id: self.id.clone(),
            });
        }
        if let Reservation::Reserved(current) = &self.reserved {
            return Err(ReservationError::AlreadyReserved {
                id: self.id.clone(),
                holder: current.holder_id().to_string(),
            });
        }
        self.reserved = Reservation::Reserved(stash);
        Ok(())
    }

    /// Voluntary release by the holder; the key must match.
    pub fn release(&mut self, key: &str) -> Result<StashInfo, ReservationError> {
        match std::mem::take(&mut self.reserved) {
            Reservation::Unreserved => Err(ReservationError::NotReserved {
                id: self.id.clone(),
            }),
            Reservation::Reserved(stash) if stash.key() != key => {
                self.reserved = Reservation::Reserved(stash);
                Err(ReservationError::KeyMismatch {
                    id: self.id.clone(),
                })
            }
            Reservation::Reserved(stash) => Ok(stash),
        }
    }

    /// Clear the reservation without any key check. Returns the cleared record.
    pub fn force_release(&mut self) -> Option<StashInfo> {
        match std::mem::take(&mut self.reserved) {
            Reservation::Reserved(stash) => Some(stash),
            Reservation::Unreserved => None,
        }
    }
}
