//! Sled-backed fleet store.
//!
//! One sled tree `nodes`: key is the node name, value the node as JSON.

use super::FleetStore;
use crate::error::StorageError;
use crate::fleet::Node;
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

const NODES_TREE: &str = "nodes";

pub struct SledFleetStore {
    nodes: sled::Tree,
    db: sled::Db,
}

impl SledFleetStore {
    /// Open (or create) a store at `path`
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = sled::open(path)?;
        let nodes = db.open_tree(NODES_TREE)?;
        Ok(Self { nodes, db })
    }

    fn decode(key: &[u8], value: &[u8]) -> Result<Node, StorageError> {
        let name = String::from_utf8_lossy(key).into_owned();
        let node: Node = serde_json::from_slice(value)?;
        if node.name() != name {
            return Err(StorageError::InvalidRecord {
                key: name,
                reason: format!("record holds node {}", node.name()),
            });
        }
        Ok(node)
    }
}

impl FleetStore for SledFleetStore {
    fn load(&self) -> Result<Vec<Node>, StorageError> {
        let mut nodes = Vec::new();
        for entry in self.nodes.iter() {
            let (key, value) = entry?;
            nodes.push(Self::decode(&key, &value)?);
        }
        Ok(nodes)
    }

    fn save(&self, nodes: &[Node]) -> Result<(), StorageError> {
        let mut batch = sled::Batch::default();
        let mut keep = HashSet::with_capacity(nodes.len());
        for node in nodes {
            batch.insert(node.name().as_bytes(), serde_json::to_vec(node)?);
            keep.insert(node.name().as_bytes().to_vec());
        }
        for key in self.nodes.iter().keys() {
            let key = key?;
            if !keep.contains(&key[..]) {
                warn!(node = %String::from_utf8_lossy(&key), "dropping stale node record");
                batch.remove(key);
            }
        }
        self.nodes.apply_batch(batch)?;
        self.db.flush()?;
        Ok(())
    }
}
