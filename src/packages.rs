//! Packages

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Backend identifier of a purchasable package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(pub u64);

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PackageId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single cart line: a package and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageLine {
    /// Package to add.
    pub package_id: PackageId,

    /// Number of units of the package.
    pub quantity: u32,
}

impl PackageLine {
    /// Create a new package line.
    pub fn new(package_id: impl Into<PackageId>, quantity: u32) -> Self {
        Self {
            package_id: package_id.into(),
            quantity,
        }
    }
}

/// Normalized, ordered set of package lines.
///
/// Most quantities map onto one or two backend lines, so the set is kept inline.
pub type PackageSet = SmallVec<[PackageLine; 2]>;

/// How a selected quantity is composed from backend packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageDefinition {
    /// A bare package id. The line quantity is the selected quantity.
    PackageId(PackageId),

    /// A single explicit package line.
    Line(PackageLine),

    /// Several lines that together make up one logical quantity.
    Lines(Vec<PackageLine>),
}

impl PackageDefinition {
    /// Convert this definition into its canonical package set.
    ///
    /// `selected_quantity` is only consulted for [`PackageDefinition::PackageId`].
    pub fn normalize(&self, selected_quantity: u32) -> PackageSet {
        match self {
            Self::PackageId(package_id) => {
                smallvec::smallvec![PackageLine::new(*package_id, selected_quantity)]
            }
            Self::Line(line) => smallvec::smallvec![*line],
            Self::Lines(lines) => lines.iter().copied().collect(),
        }
    }
}

/// Normalize an optional definition; a missing definition yields an empty set.
pub fn normalize(definition: Option<&PackageDefinition>, selected_quantity: u32) -> PackageSet {
    definition
        .map(|definition| definition.normalize(selected_quantity))
        .unwrap_or_default()
}

/// First package id of a normalized set, if any.
pub fn first_package_id(packages: &PackageSet) -> Option<PackageId> {
    packages.first().map(|line| line.package_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_package_id_takes_selected_quantity() {
        let definition = PackageDefinition::PackageId(PackageId(7));

        let packages = definition.normalize(3);

        assert_eq!(packages.as_slice(), &[PackageLine::new(7, 3)]);
    }

    #[test]
    fn explicit_line_ignores_selected_quantity() {
        let definition = PackageDefinition::Line(PackageLine::new(3, 2));

        let packages = definition.normalize(9);

        assert_eq!(packages.as_slice(), &[PackageLine::new(3, 2)]);
    }

    #[test]
    fn lines_keep_their_order() {
        let definition =
            PackageDefinition::Lines(vec![PackageLine::new(2, 2), PackageLine::new(3, 1)]);

        let packages = definition.normalize(4);

        assert_eq!(
            packages.as_slice(),
            &[PackageLine::new(2, 2), PackageLine::new(3, 1)]
        );
    }

    #[test]
    fn missing_definition_normalizes_to_nothing() {
        assert!(normalize(None, 1).is_empty());
    }

    #[test]
    fn first_package_id_of_empty_set_is_none() {
        let empty = PackageDefinition::Lines(Vec::new()).normalize(1);

        assert_eq!(first_package_id(&empty), None);
    }
}
