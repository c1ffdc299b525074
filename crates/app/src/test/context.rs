//! Test context for synchronizer tests backed by an in-memory cart.

use std::sync::Arc;

use swapper::{config::SwapperConfig, page::MemoryPage};

use crate::{cart::MemoryCartService, synchronizer::QuantitySwapper};

use super::helpers::limos_card_map;

pub(crate) struct TestContext {
    pub swapper: QuantitySwapper<MemoryPage>,
    pub cart: Arc<MemoryCartService>,
}

impl TestContext {
    pub fn new(config: SwapperConfig, page: MemoryPage) -> Self {
        let cart = Arc::new(MemoryCartService::new());
        let swapper = QuantitySwapper::new(config, limos_card_map(), page, cart.clone());

        Self { swapper, cart }
    }
}
