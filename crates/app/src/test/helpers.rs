//! Test Helpers

use std::{collections::BTreeMap, sync::Arc};

use swapper::{
    config::SwapperConfig,
    packages::{PackageDefinition, PackageLine, PackageSet},
    page::{MemoryPage, SelectorMarkup},
    quantities::{QuantityMap, SelectorId},
};

use crate::{cart::CartService, synchronizer::QuantitySwapper};

pub(crate) const LIMOS_CARD: &str = "limos-card";

pub(crate) fn limos_card() -> SelectorId {
    SelectorId::new(LIMOS_CARD)
}

/// The shipped `limos-card` mapping: quantities 1 to 4.
pub(crate) fn limos_card_map() -> QuantityMap {
    QuantityMap::new().with_selector(
        LIMOS_CARD,
        BTreeMap::from([
            (1, PackageDefinition::Line(PackageLine::new(2, 1))),
            (2, PackageDefinition::Line(PackageLine::new(3, 2))),
            (3, PackageDefinition::Line(PackageLine::new(4, 1))),
            (
                4,
                PackageDefinition::Lines(vec![PackageLine::new(2, 2), PackageLine::new(3, 1)]),
            ),
        ]),
    )
}

/// A page with a complete `limos-card` region at the given quantity.
pub(crate) fn limos_card_page(current: &str) -> MemoryPage {
    MemoryPage::from_markup([SelectorMarkup::new(LIMOS_CARD).current(current)])
}

pub(crate) fn lines(lines: &[(u64, u32)]) -> PackageSet {
    lines
        .iter()
        .map(|(package_id, quantity)| PackageLine::new(*package_id, *quantity))
        .collect()
}

pub(crate) fn swapper_with(
    cart: impl CartService + 'static,
    config: SwapperConfig,
    page: MemoryPage,
) -> QuantitySwapper<MemoryPage> {
    QuantitySwapper::new(config, limos_card_map(), page, Arc::new(cart))
}
