//! Lease and reservation record types

use crate::types::ReservationKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time window of a reservation.
///
/// `expires` is an opaque label (e.g. "end-of-build", "2h") recorded as the
/// holder supplied it. Deciding whether a lease has lapsed belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    created_at: DateTime<Utc>,
    expires: String,
}

impl Lease {
    pub fn new(created_at: DateTime<Utc>, expires: impl Into<String>) -> Self {
        Self {
            created_at,
            expires: expires.into(),
        }
    }

    /// Lease created at the current instant
    pub fn starting_now(expires: impl Into<String>) -> Self {
        Self::new(Utc::now(), expires)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires(&self) -> &str {
        &self.expires
    }
}

/// Who made a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StashType {
    /// Reserved by the scheduler itself, e.g. for the duration of a build
    Internal,
    /// Claimed out-of-band by a third party
    External,
}

impl fmt::Display for StashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StashType::Internal => write!(f, "internal"),
            StashType::External => write!(f, "external"),
        }
    }
}

/// Reservation record held by a reserved resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StashInfo {
    stash_type: StashType,
    holder_id: String,
    lease: Lease,
    key: ReservationKey,
}

impl StashInfo {
    pub fn new(
        stash_type: StashType,
        holder_id: impl Into<String>,
        lease: Lease,
        key: impl Into<ReservationKey>,
    ) -> Self {
        Self {
            stash_type,
            holder_id: holder_id.into(),
            lease,
            key: key.into(),
        }
    }

    pub fn stash_type(&self) -> StashType {
        self.stash_type
    }

    pub fn holder_id(&self) -> &str {
        &self.holder_id
    }

    pub fn lease(&self) -> &Lease {
        &self.lease
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Derive a release key from the reservation's identity.
    ///
    /// BLAKE3 over holder, node, resource id and lease creation time; the first
    /// 16 bytes hex-encoded.
    pub fn derive_key(
        holder_id: &str,
        node: &str,
        resource_id: &str,
        lease: &Lease,
    ) -> ReservationKey {
        let mut hasher = blake3::Hasher::new();
        for part in [holder_id, node, resource_id] {
            hasher.update(part.as_bytes());
            hasher.update(&[0]);
        }
        hasher.update(lease.created_at().to_rfc3339().as_bytes());
        hex::encode(&hasher.finalize().as_bytes()[..16])
    }
}
