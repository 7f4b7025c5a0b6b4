//! Metadata value types

use crate::resource::ExternalResource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single named value in a node's metadata tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetadataValue {
    String {
        name: String,
        value: String,
    },
    Number {
        name: String,
        value: i64,
    },
    Date {
        name: String,
        value: DateTime<Utc>,
    },
    Tree {
        name: String,
        #[serde(default)]
        children: Vec<MetadataValue>,
    },
    Resource(ExternalResource),
}

impl MetadataValue {
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        MetadataValue::String {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn number(name: impl Into<String>, value: i64) -> Self {
        MetadataValue::Number {
            name: name.into(),
            value,
        }
    }

    pub fn date(name: impl Into<String>, value: DateTime<Utc>) -> Self {
        MetadataValue::Date {
            name: name.into(),
            value,
        }
    }

    /// Empty named branch
    pub fn tree(name: impl Into<String>) -> Self {
        MetadataValue::Tree {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Name of the value; a resource is named by its id
    pub fn name(&self) -> &str {
        match self {
            MetadataValue::String { name, .. }
            | MetadataValue::Number { name, .. }
            | MetadataValue::Date { name, .. }
            | MetadataValue::Tree { name, .. } => name,
            MetadataValue::Resource(resource) => resource.id(),
        }
    }

    /// Whether this value can hold children
    pub fn is_branch(&self) -> bool {
        matches!(self, MetadataValue::Tree { .. } | MetadataValue::Resource(_))
    }

    /// Children of a branch; leaves have none
    pub fn children(&self) -> &[MetadataValue] {
        match self {
            MetadataValue::Tree { children, .. } => children,
            MetadataValue::Resource(resource) => resource.children(),
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<MetadataValue>> {
        match self {
            MetadataValue::Tree { children, .. } => Some(children),
            MetadataValue::Resource(resource) => Some(resource.children_mut()),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&ExternalResource> {
        match self {
            MetadataValue::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    pub fn as_resource_mut(&mut self) -> Option<&mut ExternalResource> {
        match self {
            MetadataValue::Resource(resource) => Some(resource),
            _ => None,
        }
    }
}

impl From<ExternalResource> for MetadataValue {
    fn from(resource: ExternalResource) -> Self {
        MetadataValue::Resource(resource)
    }
}

/// Anything that owns an ordered list of metadata children
pub trait MetadataParent {
    fn children(&self) -> &[MetadataValue];
    fn children_mut(&mut self) -> &mut Vec<MetadataValue>;

    fn add_child(&mut self, value: MetadataValue) {
        self.children_mut().push(value);
    }
}

/// Root of a node's metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataTree {
    #[serde(default)]
    children: Vec<MetadataValue>,
}

impl MetadataTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(children: Vec<MetadataValue>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl MetadataParent for MetadataTree {
    fn children(&self) -> &[MetadataValue] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<MetadataValue> {
        &mut self.children
    }
}

impl MetadataParent for ExternalResource {
    fn children(&self) -> &[MetadataValue] {
        ExternalResource::children(self)
    }

    fn children_mut(&mut self) -> &mut Vec<MetadataValue> {
        ExternalResource::children_mut(self)
    }
}
