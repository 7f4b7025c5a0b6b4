//! Metadata Tree
//!
//! Ordered tree of named values attached to a worker node. External resources
//! are one variant of the value enum and may appear at any depth, including
//! underneath other resources.

pub mod node;
pub mod path;

pub use node::{MetadataParent, MetadataTree, MetadataValue};
pub use path::{add_value, add_value_at};
