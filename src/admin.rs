//! Reservation Administration
//!
//! Looks up a resource on a named node and changes its reservation state. Every
//! mutation follows the same two steps: apply the change under the node's
//! write lock, release the lock, then save the fleet. A failure in the first
//! step means nothing changed; a failure in the second is reported as
//! [`ApiError::NotPersisted`] and the in-memory change stands.

use crate::error::ApiError;
use crate::filter::AvailabilityFilter;
use crate::fleet::{Fleet, Node};
use crate::resource::{ExternalResource, Lease, StashInfo, StashType};
use crate::types::{NodeName, ReservationKey, ResourceId};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Parameters for granting a reservation
#[derive(Debug, Clone)]
pub struct ReserveRequest {
    pub stash_type: StashType,
    pub holder_id: String,
    /// Opaque expiry label stored on the lease
    pub expires: String,
    /// Release key; derived from the reservation when absent
    pub key: Option<ReservationKey>,
}

/// Result of a release
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseOutcome {
    pub node: NodeName,
    pub resource_id: ResourceId,
    /// Reservation that was cleared, if the resource was reserved
    pub previous: Option<StashInfo>,
}

pub struct ReservationAdmin {
    fleet: Arc<Fleet>,
    filter: AvailabilityFilter,
}

impl ReservationAdmin {
    pub fn new(fleet: Arc<Fleet>, filter: AvailabilityFilter) -> Self {
        Self { fleet, filter }
    }

    pub fn fleet(&self) -> &Arc<Fleet> {
        &self.fleet
    }

    fn node(&self, node_name: &str) -> Result<Arc<RwLock<Node>>, ApiError> {
        self.fleet
            .get_node(node_name)
            .ok_or_else(|| ApiError::NodeNotFound(node_name.to_string()))
    }

    /// Snapshot of the resource `id` on `node_name`
    pub fn find_resource(&self, node_name: &str, id: &str) -> Result<ExternalResource, ApiError> {
        let node = self.node(node_name)?;
        let guard = node.read();
        self.filter
            .find_by_id(&guard, id)
            .cloned()
            .ok_or_else(|| resource_not_found(node_name, id))
    }

    /// Snapshots of the node's resources in traversal order
    pub fn list_resources(
        &self,
        node_name: &str,
        available_only: bool,
    ) -> Result<Vec<ExternalResource>, ApiError> {
        let node = self.node(node_name)?;
        let guard = node.read();
        let mut resources = self.filter.collect_resources(&guard);
        if available_only {
            resources = self.filter.filter_enabled_and_available(resources);
        }
        Ok(resources.into_iter().cloned().collect())
    }

    /// Clear a reservation without checking the key.
    ///
    /// Administrative override for leases that lapsed without being released.
    pub fn force_release(&self, node_name: &str, id: &str) -> Result<ReleaseOutcome, ApiError> {
        let previous = self.mutate(node_name, id, |resource| Ok(resource.force_release()))?;
        info!(
            node = node_name,
            resource_id = id,
            holder = previous.as_ref().map(|s| s.holder_id()),
            "reservation force-released"
        );
        Ok(ReleaseOutcome {
            node: node_name.to_string(),
            resource_id: id.to_string(),
            previous,
        })
    }

    /// Voluntary release by the holder presenting its key
    pub fn release(&self, node_name: &str, id: &str, key: &str) -> Result<ReleaseOutcome, ApiError> {
        let stash = self.mutate(node_name, id, |resource| Ok(resource.release(key)?))?;
        info!(
            node = node_name,
            resource_id = id,
            holder = stash.holder_id(),
            "reservation released"
        );
        Ok(ReleaseOutcome {
            node: node_name.to_string(),
            resource_id: id.to_string(),
            previous: Some(stash),
        })
    }

    /// Reserve the resource; the lease starts now
    pub fn reserve(
        &self,
        node_name: &str,
        id: &str,
        request: ReserveRequest,
    ) -> Result<StashInfo, ApiError> {
        let lease = Lease::starting_now(request.expires);
        let key = request
            .key
            .unwrap_or_else(|| StashInfo::derive_key(&request.holder_id, node_name, id, &lease));
        let stash = StashInfo::new(request.stash_type, request.holder_id, lease, key);

        let granted = stash.clone();
        self.mutate(node_name, id, move |resource| Ok(resource.reserve(stash)?))?;
        info!(
            node = node_name,
            resource_id = id,
            holder = granted.holder_id(),
            stash_type = %granted.stash_type(),
            "resource reserved"
        );
        Ok(granted)
    }

    pub fn set_enabled(&self, node_name: &str, id: &str, enabled: bool) -> Result<(), ApiError> {
        self.mutate(node_name, id, |resource| {
            resource.set_enabled(enabled);
            Ok(())
        })?;
        info!(node = node_name, resource_id = id, enabled, "resource enabled flag set");
        Ok(())
    }

    /// Apply `change` to one resource under the node's write lock, then save.
    fn mutate<T, F>(&self, node_name: &str, id: &str, change: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut ExternalResource) -> Result<T, ApiError>,
    {
        let node = self.node(node_name)?;
        let outcome = {
            let mut guard = node.write();
            let resource = self
                .filter
                .find_by_id_mut(&mut guard, id)
                .ok_or_else(|| resource_not_found(node_name, id))?;
            change(resource)
        };
        let value = outcome.map_err(|e| {
            warn!(node = node_name, resource_id = id, error = %e, "change rejected");
            e
        })?;

        self.fleet.save().map_err(|source| {
            error!(node = node_name, resource_id = id, error = %source, "fleet save failed");
            ApiError::NotPersisted {
                node: node_name.to_string(),
                resource_id: id.to_string(),
                source,
            }
        })?;
        Ok(value)
    }
}

fn resource_not_found(node_name: &str, id: &str) -> ApiError {
    ApiError::ResourceNotFound {
        node: node_name.to_string(),
        resource_id: id.to_string(),
    }
}
