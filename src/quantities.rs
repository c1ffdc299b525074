//! Quantity Maps

use std::{collections::BTreeMap, fmt};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::packages::{PackageDefinition, PackageId, PackageSet, first_package_id, normalize};

/// Name of a quantity selector region on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectorId(String);

impl SelectorId {
    /// Create a selector id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SelectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SelectorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Package definitions for one selector, keyed by quantity.
pub type SelectorPackages = BTreeMap<u32, PackageDefinition>;

/// Static mapping from selector to quantity to package definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantityMap {
    selectors: BTreeMap<SelectorId, SelectorPackages>,
}

impl QuantityMap {
    /// Create an empty quantity map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the package definitions for a selector.
    #[must_use]
    pub fn with_selector(
        mut self,
        selector: impl Into<SelectorId>,
        packages: SelectorPackages,
    ) -> Self {
        self.selectors.insert(selector.into(), packages);
        self
    }

    /// Selectors known to the map, in id order.
    pub fn selectors(&self) -> impl Iterator<Item = &SelectorId> {
        self.selectors.keys()
    }

    /// Package definitions for a selector.
    pub fn packages(&self, selector: &SelectorId) -> Option<&SelectorPackages> {
        self.selectors.get(selector)
    }

    /// Definition for a selector at a quantity.
    pub fn definition(&self, selector: &SelectorId, quantity: u32) -> Option<&PackageDefinition> {
        self.selectors.get(selector)?.get(&quantity)
    }

    /// Normalized package set for a selector at a quantity; empty when unmapped.
    pub fn package_set(&self, selector: &SelectorId, quantity: u32) -> PackageSet {
        normalize(self.definition(selector, quantity), quantity)
    }

    /// Number of selectors.
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Check if the map has no selectors.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Build the reverse maps for every selector.
    pub fn reverse_maps(&self) -> ReverseMaps {
        ReverseMaps {
            selectors: self
                .selectors
                .iter()
                .map(|(selector, packages)| (selector.clone(), ReverseMap::build(packages)))
                .collect(),
        }
    }
}

/// Inverse lookup from a quantity's first package id back to the quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseMap {
    quantities: FxHashMap<PackageId, u32>,
}

impl ReverseMap {
    /// Build from one selector's definitions.
    ///
    /// Quantities are processed in ascending order; when two quantities share a
    /// first package id the later one overwrites the earlier.
    pub fn build(packages: &SelectorPackages) -> Self {
        let mut quantities = FxHashMap::default();

        for (quantity, definition) in packages {
            if let Some(package_id) = first_package_id(&definition.normalize(*quantity)) {
                quantities.insert(package_id, *quantity);
            }
        }

        Self { quantities }
    }

    /// Quantity whose first package is `package_id`.
    pub fn quantity_for(&self, package_id: PackageId) -> Option<u32> {
        self.quantities.get(&package_id).copied()
    }

    /// Entries sorted by package id.
    pub fn entries(&self) -> Vec<(PackageId, u32)> {
        let mut entries: Vec<_> = self.quantities.iter().map(|(id, qty)| (*id, *qty)).collect();
        entries.sort_unstable();
        entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

/// Reverse maps for all selectors of a [`QuantityMap`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseMaps {
    selectors: BTreeMap<SelectorId, ReverseMap>,
}

impl ReverseMaps {
    /// Reverse map of a single selector.
    pub fn get(&self, selector: &SelectorId) -> Option<&ReverseMap> {
        self.selectors.get(selector)
    }

    /// Iterate selectors and their reverse maps in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&SelectorId, &ReverseMap)> {
        self.selectors.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::packages::PackageLine;

    use super::*;

    fn limos_card() -> SelectorPackages {
        BTreeMap::from([
            (1, PackageDefinition::Line(PackageLine::new(2, 1))),
            (2, PackageDefinition::Line(PackageLine::new(3, 2))),
            (3, PackageDefinition::Line(PackageLine::new(4, 1))),
            (
                4,
                PackageDefinition::Lines(vec![PackageLine::new(2, 2), PackageLine::new(3, 1)]),
            ),
        ])
    }

    #[test]
    fn package_set_for_unmapped_quantity_is_empty() {
        let map = QuantityMap::new().with_selector("limos-card", limos_card());

        assert!(map.package_set(&"limos-card".into(), 5).is_empty());
        assert!(map.package_set(&"unknown".into(), 1).is_empty());
    }

    #[test]
    fn reverse_map_last_writer_wins() {
        let packages = BTreeMap::from([
            (1, PackageDefinition::PackageId(PackageId(100))),
            (2, PackageDefinition::PackageId(PackageId(200))),
            (
                4,
                PackageDefinition::Lines(vec![PackageLine::new(100, 2), PackageLine::new(200, 2)]),
            ),
        ]);

        let reverse = ReverseMap::build(&packages);

        assert_eq!(reverse.quantity_for(PackageId(100)), Some(4));
        assert_eq!(reverse.quantity_for(PackageId(200)), Some(2));
        assert_eq!(reverse.len(), 2);
    }

    #[test]
    fn reverse_map_skips_empty_definitions() {
        let packages = BTreeMap::from([(1, PackageDefinition::Lines(Vec::new()))]);

        assert!(ReverseMap::build(&packages).is_empty());
    }

    #[test]
    fn reverse_maps_cover_every_selector() {
        let map = QuantityMap::new()
            .with_selector("limos-card", limos_card())
            .with_selector("other", BTreeMap::new());

        let reverse = map.reverse_maps();

        assert_eq!(
            reverse
                .get(&"limos-card".into())
                .and_then(|r| r.quantity_for(PackageId(2))),
            Some(4)
        );
        assert!(reverse.get(&"other".into()).is_some_and(ReverseMap::is_empty));
    }
}
