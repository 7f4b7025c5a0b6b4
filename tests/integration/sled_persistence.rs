use crate::integration::support::scenario_tree;
use resource_dispatcher::store::SledFleetStore;
use resource_dispatcher::{AvailabilityFilter, Fleet, Node, ReservationAdmin};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn cleared_reservation_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fleet");

    {
        let store = Arc::new(SledFleetStore::open(&path).unwrap());
        let fleet = Arc::new(Fleet::new(store));
        fleet.insert_node(Node::with_metadata("nodeX", scenario_tree()));
        fleet.save().unwrap();

        let admin = ReservationAdmin::new(fleet, AvailabilityFilter::new());
        admin.force_release("nodeX", "R2").unwrap();
    }

    let store = Arc::new(SledFleetStore::open(&path).unwrap());
    let fleet = Arc::new(Fleet::open(store).unwrap());
    let admin = ReservationAdmin::new(fleet, AvailabilityFilter::new());
    let r2 = admin.find_resource("nodeX", "R2").unwrap();
    assert!(!r2.is_reserved());
    assert!(r2.is_available());
}
