//! Availability Filter
//!
//! Stateless queries over a node's metadata tree: collect every external
//! resource, narrow a list down to the ones that can be allocated, and find a
//! resource by id. The filter holds no state, so callers keep their own copy
//! (it is `Copy`) instead of sharing a process-wide instance.

use crate::fleet::Node;
use crate::resource::ExternalResource;
use crate::tree::{MetadataParent, MetadataValue};

#[derive(Debug, Default, Clone, Copy)]
pub struct AvailabilityFilter;

impl AvailabilityFilter {
    pub fn new() -> Self {
        AvailabilityFilter
    }

    /// All resources reachable from the node's metadata, in pre-order.
    ///
    /// A resource is listed before its own children, and resources nested in
    /// resources are listed too. A node without metadata yields nothing.
    pub fn collect_resources<'a>(&self, node: &'a Node) -> Vec<&'a ExternalResource> {
        let mut found = Vec::new();
        if let Some(tree) = node.metadata() {
            for value in tree.children() {
                collect(value, &mut found);
            }
        }
        found
    }

    /// Resources that are enabled and unreserved, input order kept.
    pub fn filter_enabled_and_available<'a, I>(&self, resources: I) -> Vec<&'a ExternalResource>
    where
        I: IntoIterator<Item = &'a ExternalResource>,
    {
        resources
            .into_iter()
            .filter(|resource| resource.is_available())
            .collect()
    }

    /// First resource with `id` in traversal order
    pub fn find_by_id<'a>(&self, node: &'a Node, id: &str) -> Option<&'a ExternalResource> {
        node.metadata()?
            .children()
            .iter()
            .find_map(|value| find(value, id))
    }

    /// Mutable counterpart of [`find_by_id`](Self::find_by_id); same order.
    pub fn find_by_id_mut<'a>(
        &self,
        node: &'a mut Node,
        id: &str,
    ) -> Option<&'a mut ExternalResource> {
        node.metadata_mut()?
            .children_mut()
            .iter_mut()
            .find_map(|value| find_mut(value, id))
    }
}

fn collect<'a>(value: &'a MetadataValue, found: &mut Vec<&'a ExternalResource>) {
    if let MetadataValue::Resource(resource) = value {
        found.push(resource);
    }
    for child in value.children() {
        collect(child, found);
    }
}

fn find<'a>(value: &'a MetadataValue, id: &str) -> Option<&'a ExternalResource> {
    if let MetadataValue::Resource(resource) = value {
        if resource.id() == id {
            return Some(resource);
        }
    }
    value.children().iter().find_map(|child| find(child, id))
}

fn find_mut<'a>(value: &'a mut MetadataValue, id: &str) -> Option<&'a mut ExternalResource> {
    if value.as_resource().is_some_and(|resource| resource.id() == id) {
        return value.as_resource_mut();
    }
    value
        .children_mut()?
        .iter_mut()
        .find_map(|child| find_mut(child, id))
}
