//! Quantity Map Fixtures
//!
//! ```yaml
//! selectors:
//!   limos-card:
//!     1: { package_id: 2, quantity: 1 }
//!     2: 3
//!     4:
//!       - { package_id: 2, quantity: 2 }
//!       - { package_id: 3, quantity: 1 }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_norway::Value;
use tracing::warn;

use crate::{
    fixtures::FixtureError,
    packages::{PackageDefinition, PackageId, PackageLine},
    quantities::{QuantityMap, SelectorPackages},
};

/// Wrapper for quantity maps in YAML
#[derive(Debug, Deserialize)]
pub struct QuantityMapFixture {
    /// Map of selector id -> quantity -> raw definition
    pub selectors: BTreeMap<String, BTreeMap<u32, Value>>,
}

/// Package line from YAML
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageLineFixture {
    /// Package id
    pub package_id: u64,

    /// Package quantity
    pub quantity: u32,
}

impl From<PackageLineFixture> for PackageLine {
    fn from(line: PackageLineFixture) -> Self {
        PackageLine::new(line.package_id, line.quantity)
    }
}

/// Accepted definition shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DefinitionFixture {
    /// Bare package id
    PackageId(u64),

    /// Single explicit line
    Line(PackageLineFixture),

    /// Ordered list of lines
    Lines(Vec<PackageLineFixture>),
}

impl DefinitionFixture {
    /// Convert into a package definition.
    ///
    /// Package id 0, bare or in an explicit line, and an empty list define nothing.
    pub fn into_definition(self) -> Option<PackageDefinition> {
        match self {
            Self::PackageId(0) => None,
            Self::PackageId(id) => Some(PackageDefinition::PackageId(PackageId(id))),
            Self::Line(line) if line.package_id == 0 => None,
            Self::Line(line) => Some(PackageDefinition::Line(line.into())),
            Self::Lines(lines) if lines.is_empty() => None,
            Self::Lines(lines) => Some(PackageDefinition::Lines(
                lines.into_iter().map(PackageLine::from).collect(),
            )),
        }
    }
}

/// Parse a quantity map from YAML.
///
/// Entries that are not one of the accepted shapes, and quantity 0, are skipped
/// with a warning rather than failing the whole map.
///
/// # Errors
///
/// Returns an error if the document itself is not valid YAML of the expected layout.
pub fn parse(contents: &str) -> Result<QuantityMap, FixtureError> {
    let fixture: QuantityMapFixture = serde_norway::from_str(contents)?;

    Ok(fixture
        .selectors
        .into_iter()
        .fold(QuantityMap::new(), |map, (selector, quantities)| {
            let packages = selector_packages(&selector, quantities);

            map.with_selector(selector.as_str(), packages)
        }))
}

fn selector_packages(selector: &str, quantities: BTreeMap<u32, Value>) -> SelectorPackages {
    let mut packages = SelectorPackages::new();

    for (quantity, raw) in quantities {
        if quantity == 0 {
            warn!(selector, "skipping definition for quantity 0");
            continue;
        }

        let definition = serde_norway::from_value::<DefinitionFixture>(raw)
            .ok()
            .and_then(DefinitionFixture::into_definition);

        match definition {
            Some(definition) => {
                packages.insert(quantity, definition);
            }
            None => warn!(selector, quantity, "skipping malformed package definition"),
        }
    }

    packages
}
