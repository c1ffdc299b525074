//! Swapper prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    config::{DispatchMode, SwapperConfig},
    fixtures::{Fixture, FixtureError},
    packages::{PackageDefinition, PackageId, PackageLine, PackageSet},
    page::{Marker, MemoryPage, Page, SelectorMarkup, SelectorSnapshot},
    quantities::{QuantityMap, ReverseMap, ReverseMaps, SelectorId, SelectorPackages},
    selectors::{ButtonStates, QuantityBounds, SelectorState, Step},
};
