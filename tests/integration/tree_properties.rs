//! Property tests over randomly shaped metadata trees.

use proptest::prelude::*;
use resource_dispatcher::{
    AvailabilityFilter, ExternalResource, Lease, MetadataTree, MetadataValue, Node, StashInfo,
    StashType,
};

#[derive(Debug, Clone)]
enum Shape {
    Leaf,
    Branch(Vec<Shape>),
    Resource {
        enabled: bool,
        reserved: bool,
        children: Vec<Shape>,
    },
}

fn shape() -> impl Strategy<Value = Shape> {
    Just(Shape::Leaf).prop_recursive(5, 64, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Shape::Branch),
            (any::<bool>(), any::<bool>(), prop::collection::vec(inner, 0..4)).prop_map(
                |(enabled, reserved, children)| Shape::Resource {
                    enabled,
                    reserved,
                    children,
                }
            ),
        ]
    })
}

/// Expected (id, available) pairs in pre-order
type Expected = Vec<(String, bool)>;

fn build(shape: &Shape, next_id: &mut usize, expected: &mut Expected) -> MetadataValue {
    match shape {
        Shape::Leaf => MetadataValue::number("leaf", *next_id as i64),
        Shape::Branch(children) => MetadataValue::Tree {
            name: "branch".to_string(),
            children: children
                .iter()
                .map(|c| build(c, next_id, expected))
                .collect(),
        },
        Shape::Resource {
            enabled,
            reserved,
            children,
        } => {
            let id = format!("r{}", *next_id);
            *next_id += 1;
            expected.push((id.clone(), *enabled && !*reserved));

            let mut resource = ExternalResource::new(id.clone(), id);
            if *reserved {
                resource
                    .reserve(StashInfo::new(
                        StashType::External,
                        "holder",
                        Lease::starting_now("later"),
                        "key",
                    ))
                    .unwrap();
            }
            let built = children
                .iter()
                .map(|c| build(c, next_id, expected))
                .collect();
            resource.with_enabled(*enabled).with_children(built).into()
        }
    }
}

fn node_from(shapes: &[Shape]) -> (Node, Expected) {
    let mut next_id = 0;
    let mut expected = Vec::new();
    let values = shapes
        .iter()
        .map(|s| build(s, &mut next_id, &mut expected))
        .collect();
    (Node::with_metadata("n", MetadataTree::from_values(values)), expected)
}

proptest! {
    #[test]
    fn collect_lists_every_resource_once_in_preorder(shapes in prop::collection::vec(shape(), 0..6)) {
        let (node, expected) = node_from(&shapes);
        let collected: Vec<String> = AvailabilityFilter::new()
            .collect_resources(&node)
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        let expected_ids: Vec<String> = expected.iter().map(|(id, _)| id.clone()).collect();
        prop_assert_eq!(collected, expected_ids);
    }

    #[test]
    fn filter_is_exact_ordered_and_idempotent(shapes in prop::collection::vec(shape(), 0..6)) {
        let (node, expected) = node_from(&shapes);
        let filter = AvailabilityFilter::new();
        let all = filter.collect_resources(&node);
        let available = filter.filter_enabled_and_available(all.iter().copied());

        let got: Vec<&str> = available.iter().map(|r| r.id()).collect();
        let want: Vec<&str> = expected
            .iter()
            .filter(|(_, ok)| *ok)
            .map(|(id, _)| id.as_str())
            .collect();
        prop_assert_eq!(&got, &want);

        // sub-sequence of the input
        let mut input = all.iter().map(|r| r.id());
        for id in &got {
            prop_assert!(input.any(|candidate| candidate == *id));
        }

        let again = filter.filter_enabled_and_available(available.iter().copied());
        prop_assert_eq!(again.len(), available.len());
    }

    #[test]
    fn find_by_id_locates_every_collected_resource(shapes in prop::collection::vec(shape(), 0..6)) {
        let (node, expected) = node_from(&shapes);
        let filter = AvailabilityFilter::new();
        for (id, available) in &expected {
            let found = filter.find_by_id(&node, id);
            prop_assert!(found.is_some());
            prop_assert_eq!(found.unwrap().is_available(), *available);
        }
        prop_assert!(filter.find_by_id(&node, "absent").is_none());
    }
}
