//! In-memory fleet store for tests and ephemeral runs.

use super::FleetStore;
use crate::error::StorageError;
use crate::fleet::Node;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
pub struct MemoryFleetStore {
    saved: Mutex<Vec<Node>>,
    saves: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that starts out holding `nodes`
    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        Self {
            saved: Mutex::new(nodes),
            ..Self::default()
        }
    }

    /// Make every following save fail (or succeed again)
    pub fn fail_saves(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Last saved snapshot
    pub fn saved(&self) -> Vec<Node> {
        self.saved.lock().clone()
    }
}

impl FleetStore for MemoryFleetStore {
    fn load(&self) -> Result<Vec<Node>, StorageError> {
        let mut nodes = self.saved.lock().clone();
        nodes.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(nodes)
    }

    fn save(&self, nodes: &[Node]) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Injected("memory store set to fail".to_string()));
        }
        *self.saved.lock() = nodes.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
