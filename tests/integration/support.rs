use resource_dispatcher::store::MemoryFleetStore;
use resource_dispatcher::tree::add_value;
use resource_dispatcher::{
    ExternalResource, Fleet, Lease, MetadataParent, MetadataTree, MetadataValue, Node, StashInfo,
    StashType,
};
use std::sync::Arc;

pub fn reserved_resource(id: &str, key: &str) -> ExternalResource {
    let mut resource = ExternalResource::new(id, id);
    resource
        .reserve(StashInfo::new(
            StashType::Internal,
            "somebuild",
            Lease::starting_now("sometime"),
            key,
        ))
        .unwrap();
    resource
}

/// `{A("irrelevant"), R1(disabled), R2(reserved), R3}` with product metadata
/// under each resource and a leaf in the way of the last one.
pub fn scenario_tree() -> MetadataTree {
    let mut tree = MetadataTree::new();
    add_value(&mut tree, MetadataValue::string("A", "irrelevant"), &["aa"]);

    let mut r1 = ExternalResource::new("R1", "dev-1")
        .with_description("description")
        .with_enabled(false);
    add_value(&mut r1, MetadataValue::string("name", "one"), &["product"]);
    add_value(&mut tree, r1.into(), &["resources", "attached"]);

    let mut r2 = reserved_resource("R2", "key");
    add_value(&mut r2, MetadataValue::string("name", "two"), &["product"]);
    add_value(&mut tree, r2.into(), &["resources", "attached"]);

    let mut r3 = ExternalResource::new("R3", "dev-3");
    add_value(&mut r3, MetadataValue::string("name", "three"), &["product"]);
    tree.add_child(MetadataValue::string("inTheWay", "value"));
    tree.add_child(r3.into());
    tree
}

pub fn scenario_fleet() -> (Arc<MemoryFleetStore>, Arc<Fleet>) {
    let store = Arc::new(MemoryFleetStore::new());
    let fleet = Arc::new(Fleet::new(store.clone()));
    fleet.insert_node(Node::with_metadata("nodeX", scenario_tree()));
    fleet.insert_node(Node::new("bare"));
    (store, fleet)
}

pub fn ids(resources: &[&ExternalResource]) -> Vec<String> {
    resources.iter().map(|r| r.id().to_string()).collect()
}
