//! Integration tests for normalization and reverse maps

use std::collections::BTreeMap;

use testresult::TestResult;

use swapper::{
    fixtures::quantity_maps,
    packages::{PackageDefinition, PackageId, PackageLine},
    quantities::{QuantityMap, ReverseMap},
};

#[test]
fn every_accepted_shape_normalizes_to_a_non_empty_set() {
    let shapes = [
        PackageDefinition::PackageId(PackageId(1)),
        PackageDefinition::Line(PackageLine::new(1, 3)),
        PackageDefinition::Lines(vec![PackageLine::new(1, 1), PackageLine::new(2, 1)]),
    ];

    for shape in shapes {
        assert!(!shape.normalize(2).is_empty(), "{shape:?} normalized to nothing");
    }
}

#[test]
fn reverse_map_collisions_keep_the_last_quantity() {
    let packages = BTreeMap::from([
        (1, PackageDefinition::PackageId(PackageId(100))),
        (2, PackageDefinition::PackageId(PackageId(200))),
        (
            4,
            PackageDefinition::Lines(vec![PackageLine::new(100, 2), PackageLine::new(200, 1)]),
        ),
    ]);

    let reverse = ReverseMap::build(&packages);

    assert_eq!(reverse.quantity_for(PackageId(100)), Some(4));
    assert_ne!(reverse.quantity_for(PackageId(100)), Some(1));
    assert_eq!(reverse.entries(), vec![(PackageId(100), 4), (PackageId(200), 2)]);
}

#[test]
fn limos_card_quantity_four_combines_two_packages() -> TestResult {
    let map: QuantityMap =
        quantity_maps::parse(include_str!("../fixtures/quantity_maps/default.yml"))?;

    let packages = map.package_set(&"limos-card".into(), 4);

    assert_eq!(
        packages.as_slice(),
        &[PackageLine::new(2, 2), PackageLine::new(3, 1)]
    );
    assert!(map.package_set(&"limos-card".into(), 5).is_empty());

    Ok(())
}
