//! Path-based insertion into a metadata tree.
//!
//! Walks a sequence of branch names below a parent, creating `Tree` branches
//! for missing segments, and appends the value to the last branch. An existing
//! resource with a matching name counts as a branch and is descended into.

use super::node::{MetadataParent, MetadataValue};

/// Append `value` beneath `path` under `parent`
pub fn add_value<P>(parent: &mut P, value: MetadataValue, path: &[&str])
where
    P: MetadataParent + ?Sized,
{
    let mut children = parent.children_mut();
    for segment in path {
        children = descend(children, segment);
    }
    children.push(value);
}

/// Like [`add_value`] with a `/` separated path; empty segments are ignored
pub fn add_value_at<P>(parent: &mut P, value: MetadataValue, path: &str)
where
    P: MetadataParent + ?Sized,
{
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    add_value(parent, value, &segments);
}

fn descend<'a>(children: &'a mut Vec<MetadataValue>, segment: &str) -> &'a mut Vec<MetadataValue> {
    let index = match children
        .iter()
        .position(|child| child.is_branch() && child.name() == segment)
    {
        Some(index) => index,
        None => {
            children.push(MetadataValue::tree(segment));
            children.len() - 1
        }
    };
    match &mut children[index] {
        MetadataValue::Tree { children, .. } => children,
        MetadataValue::Resource(resource) => resource.children_mut(),
        _ => unreachable!("position only matches branches"),
    }
}
