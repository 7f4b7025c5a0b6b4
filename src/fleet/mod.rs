//! Fleet registry
//!
//! Named worker nodes, each behind its own read-write lock. Readers of one node
//! never wait on each other; writers exclude everyone on that node only, so
//! reservations on different nodes proceed independently.

pub mod node;

pub use node::Node;

use crate::error::StorageError;
use crate::store::FleetStore;
use crate::types::NodeName;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Fleet {
    /// Map from node name to that node's lock
    nodes: RwLock<BTreeMap<NodeName, Arc<RwLock<Node>>>>,
    store: Arc<dyn FleetStore>,
    /// Orders concurrent saves; never held together with a node lock
    save_lock: Mutex<()>,
}

impl Fleet {
    /// Empty fleet backed by `store`
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self {
            nodes: RwLock::new(BTreeMap::new()),
            store,
            save_lock: Mutex::new(()),
        }
    }

    /// Fleet populated from what `store` last saved
    pub fn open(store: Arc<dyn FleetStore>) -> Result<Self, StorageError> {
        let loaded = store.load()?;
        let fleet = Self::new(store);
        {
            let mut map = fleet.nodes.write();
            for node in loaded {
                map.insert(node.name().to_string(), Arc::new(RwLock::new(node)));
            }
            info!(nodes = map.len(), "fleet loaded");
        }
        Ok(fleet)
    }

    /// Lock handle for the named node
    pub fn get_node(&self, name: &str) -> Option<Arc<RwLock<Node>>> {
        self.nodes.read().get(name).cloned()
    }

    /// Add a node, replacing the contents of any node with the same name.
    /// Returns true on replace.
    ///
    /// A replaced node keeps its lock, so handles already returned by
    /// [`Fleet::get_node`] see the new contents.
    pub fn insert_node(&self, node: Node) -> bool {
        let name = node.name().to_string();
        if let Some(existing) = self.get_node(&name) {
            *existing.write() = node;
            debug!(node = %name, replaced = true, "node registered");
            return true;
        }

        // Node locks are never held while waiting on the map lock.
        let mut map = self.nodes.write();
        let replaced = match map.get(&name) {
            Some(existing) => {
                *existing.write() = node;
                true
            }
            None => {
                map.insert(name.clone(), Arc::new(RwLock::new(node)));
                false
            }
        };
        debug!(node = %name, replaced, "node registered");
        replaced
    }

    pub fn remove_node(&self, name: &str) -> bool {
        self.nodes.write().remove(name).is_some()
    }

    /// Node names in sorted order
    pub fn node_names(&self) -> Vec<NodeName> {
        self.nodes.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }

    /// Copy of every node, each taken under its own short read lock
    pub fn snapshot(&self) -> Vec<Node> {
        let handles: Vec<Arc<RwLock<Node>>> = self.nodes.read().values().cloned().collect();
        handles.iter().map(|node| node.read().clone()).collect()
    }

    /// Persist the current fleet state through the store
    pub fn save(&self) -> Result<(), StorageError> {
        let _ordered = self.save_lock.lock();
        let snapshot = self.snapshot();
        self.store.save(&snapshot)?;
        debug!(nodes = snapshot.len(), "fleet saved");
        Ok(())
    }
}
