use crate::integration::support::scenario_fleet;
use resource_dispatcher::{ApiError, AvailabilityFilter, ReservationAdmin};

fn available(admin: &ReservationAdmin) -> Vec<String> {
    admin
        .list_resources("nodeX", true)
        .unwrap()
        .iter()
        .map(|r| r.id().to_string())
        .collect()
}

#[test]
fn force_release_makes_reserved_resource_available() {
    let (store, fleet) = scenario_fleet();
    let admin = ReservationAdmin::new(fleet, AvailabilityFilter::new());
    assert_eq!(available(&admin), vec!["R3"]);

    let outcome = admin.force_release("nodeX", "R2").unwrap();
    assert_eq!(outcome.previous.unwrap().holder_id(), "somebuild");
    assert_eq!(available(&admin), vec!["R2", "R3"]);
    assert_eq!(store.save_count(), 1);

    let saved = store.saved();
    let node = saved.iter().find(|n| n.name() == "nodeX").unwrap();
    let r2 = AvailabilityFilter::new().find_by_id(node, "R2").unwrap();
    assert!(!r2.is_reserved(), "saved snapshot must hold the cleared reservation");
}

#[test]
fn force_release_on_missing_node_fails_before_lookup() {
    let (store, fleet) = scenario_fleet();
    let admin = ReservationAdmin::new(fleet, AvailabilityFilter::new());

    match admin.force_release("missingNode", "R2") {
        Err(ApiError::NodeNotFound(name)) => assert_eq!(name, "missingNode"),
        other => panic!("expected NodeNotFound, got {:?}", other),
    }
    assert_eq!(store.save_count(), 0);
    assert_eq!(available(&admin), vec!["R3"]);
}

#[test]
fn force_release_on_missing_resource() {
    let (store, fleet) = scenario_fleet();
    let admin = ReservationAdmin::new(fleet, AvailabilityFilter::new());

    assert!(matches!(
        admin.force_release("nodeX", "R9"),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        admin.find_resource("bare", "R1"),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert_eq!(store.save_count(), 0);
}

#[test]
fn save_failure_is_distinct_from_lookup_failure() {
    let (store, fleet) = scenario_fleet();
    let admin = ReservationAdmin::new(fleet, AvailabilityFilter::new());
    store.fail_saves(true);

    let err = admin.force_release("nodeX", "R2").unwrap_err();
    assert!(matches!(err, ApiError::NotPersisted { .. }));
    assert!(err.is_io());
    assert_eq!(available(&admin), vec!["R2", "R3"]);

    let err = admin.force_release("missingNode", "R2").unwrap_err();
    assert!(!err.is_io());
}
