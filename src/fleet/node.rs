//! Worker node

use crate::tree::MetadataTree;
use serde::{Deserialize, Serialize};

/// A named worker node and its optional metadata tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<MetadataTree>,
}

impl Node {
    /// Node without metadata
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(name: impl Into<String>, metadata: MetadataTree) -> Self {
        Self {
            name: name.into(),
            metadata: Some(metadata),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> Option<&MetadataTree> {
        self.metadata.as_ref()
    }

    pub fn metadata_mut(&mut self) -> Option<&mut MetadataTree> {
        self.metadata.as_mut()
    }
}
