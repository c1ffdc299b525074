//! Quantity-to-package synchronizer.
//!
//! [`QuantitySwapper`] owns the selector state of a page. Button presses update
//! the page straight away and hand the matching package set to the cart in the
//! background; the display never waits for, or rolls back after, a cart call.

use std::{collections::BTreeMap, future::Future, sync::Arc};

use swapper::{
    config::SwapperConfig,
    packages::{PackageId, PackageSet, first_package_id},
    page::{CURRENT_ATTR, Marker, NEXT_PACKAGE_ATTR, Page},
    quantities::{QuantityMap, ReverseMap, ReverseMaps, SelectorId},
    selectors::{QuantityBounds, Step},
};
use tracing::{debug, info};

use crate::{
    cart::CartService,
    synchronizer::{
        bindings::SelectorBinding,
        dispatch::{Dispatcher, clear, swap},
    },
};

mod bindings;
mod dispatch;

pub use dispatch::Settled;

/// Result of calling [`QuantitySwapper::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initialization {
    /// Initialization ran.
    Initialized,

    /// Initialization had already run on this instance; nothing happened.
    AlreadyInitialized,
}

/// Result of a quantity button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The selector is not wired (unknown, or missing controls on the page).
    Unwired,

    /// The step would leave the quantity bounds; nothing changed.
    Rejected,

    /// The quantity changed but has no packages; the cart was left alone.
    Unmapped {
        /// New quantity.
        quantity: u32,
    },

    /// The quantity changed and a cart swap was dispatched.
    Dispatched {
        /// New quantity.
        quantity: u32,

        /// Package set sent to the cart.
        packages: PackageSet,
    },
}

/// Current state of a wired selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorStatus {
    /// Current quantity.
    pub quantity: u32,

    /// Quantity bounds.
    pub bounds: QuantityBounds,

    /// Package the selector last swapped to, or was reset to.
    pub next_package: Option<PackageId>,
}

/// Keeps quantity selectors on a page in step with an external cart.
#[derive(Debug)]
pub struct QuantitySwapper<P: Page> {
    config: SwapperConfig,
    quantity_map: QuantityMap,
    page: P,
    dispatcher: Dispatcher,
    reverse_maps: Option<ReverseMaps>,
    bindings: BTreeMap<SelectorId, SelectorBinding<P::Element>>,
    initialized: bool,
}

impl<P: Page> QuantitySwapper<P> {
    /// Create a synchronizer. Nothing touches the page or cart until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(
        config: SwapperConfig,
        quantity_map: QuantityMap,
        page: P,
        cart: Arc<dyn CartService>,
    ) -> Self {
        let dispatcher = Dispatcher::new(cart, config.dispatch, config.debug);

        Self {
            config,
            quantity_map,
            page,
            dispatcher,
            reverse_maps: None,
            bindings: BTreeMap::new(),
            initialized: false,
        }
    }

    /// Wait for the host's ready signal and the configured delay, then initialize.
    pub async fn run_when_ready<F>(&mut self, ready: F) -> Initialization
    where
        F: Future<Output = ()>,
    {
        ready.await;
        tokio::time::sleep(self.config.ready_delay).await;

        self.initialize().await
    }

    /// Bring the page and cart into their starting state and wire the selectors.
    ///
    /// Runs once per instance. Cart failures are logged and do not stop the
    /// remaining steps. Must be called from within a tokio runtime.
    pub async fn initialize(&mut self) -> Initialization {
        if self.initialized {
            return Initialization::AlreadyInitialized;
        }

        if self.config.debug {
            debug!("initializing");
        }

        if self.config.clear_cart_on_load {
            self.clear_cart().await;
        }

        self.reverse_maps = Some(self.quantity_map.reverse_maps());

        let selectors: Vec<SelectorId> = self.quantity_map.selectors().cloned().collect();

        if self.config.reset_to_quantity_one {
            for selector in &selectors {
                self.reset_to_quantity_one(selector);
            }
        }

        if self.config.add_initial_package {
            for selector in &selectors {
                let packages = self.quantity_map.package_set(selector, 1);

                if packages.is_empty() {
                    continue;
                }

                self.dispatcher.dispatch(selector, packages);

                if self.config.debug {
                    debug!(%selector, "added initial packages");
                }
            }
        }

        for selector in &selectors {
            self.wire(selector);
        }

        self.initialized = true;

        info!(wired = self.bindings.len(), "quantity swapper initialized");

        Initialization::Initialized
    }

    /// Replace the cart contents with `packages`. Returns whether the cart accepted it.
    pub async fn swap_to_packages(&self, packages: PackageSet) -> bool {
        swap(self.dispatcher.cart(), packages, self.config.debug).await
    }

    /// Empty the cart. Returns whether the cart accepted it.
    pub async fn clear_cart(&self) -> bool {
        clear(self.dispatcher.cart(), self.config.debug).await
    }

    /// Handle a press of the increase button.
    pub fn increase(&mut self, selector: &SelectorId) -> StepOutcome {
        self.step(selector, Step::Increase)
    }

    /// Handle a press of the decrease button.
    pub fn decrease(&mut self, selector: &SelectorId) -> StepOutcome {
        self.step(selector, Step::Decrease)
    }

    /// Move a selector one step and dispatch the matching cart swap.
    pub fn step(&mut self, selector: &SelectorId, step: Step) -> StepOutcome {
        let Some(binding) = self.bindings.get_mut(selector) else {
            if self.config.debug {
                debug!(%selector, "ignoring step for unwired selector");
            }

            return StepOutcome::Unwired;
        };

        let Some(quantity) = binding.state.step(step) else {
            return StepOutcome::Rejected;
        };

        binding.render_quantity(&mut self.page);
        binding.render_buttons(&mut self.page);

        if self.config.debug {
            debug!(%selector, quantity, "quantity changed");
        }

        let packages = self.quantity_map.package_set(selector, quantity);

        let Some(package_id) = first_package_id(&packages) else {
            if self.config.debug {
                debug!(%selector, quantity, "no packages mapped for quantity");
            }

            return StepOutcome::Unmapped { quantity };
        };

        binding.render_next_package(&mut self.page, package_id);

        if self.config.debug {
            debug!(%selector, %package_id, "swapping to package");
        }

        self.dispatcher.dispatch(selector, packages.clone());

        StepOutcome::Dispatched { quantity, packages }
    }

    /// Wait for every dispatched cart swap to finish.
    pub async fn settle(&mut self) -> Settled {
        self.dispatcher.settle().await
    }

    /// Check whether initialization has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Reverse map of a selector, available once initialized.
    pub fn reverse_map(&self, selector: &SelectorId) -> Option<&ReverseMap> {
        self.reverse_maps.as_ref()?.get(selector)
    }

    /// State of a wired selector.
    pub fn selector(&self, selector: &SelectorId) -> Option<SelectorStatus> {
        self.bindings.get(selector).map(|binding| SelectorStatus {
            quantity: binding.state.quantity(),
            bounds: binding.state.bounds(),
            next_package: binding.next_package,
        })
    }

    /// Selectors that were wired.
    pub fn wired_selectors(&self) -> impl Iterator<Item = &SelectorId> {
        self.bindings.keys()
    }

    /// The configuration.
    pub fn config(&self) -> &SwapperConfig {
        &self.config
    }

    /// The quantity map.
    pub fn quantity_map(&self) -> &QuantityMap {
        &self.quantity_map
    }

    /// The page.
    pub fn page(&self) -> &P {
        &self.page
    }

    fn reset_to_quantity_one(&mut self, selector: &SelectorId) {
        let Some(card) = self.page.card(selector) else {
            if self.config.debug {
                debug!(%selector, "no card to reset");
            }

            return;
        };

        self.page.set_attribute(&card, CURRENT_ATTR, "1");

        if let Some(display) = self.page.find(&card, Marker::Display) {
            self.page.set_text(&display, "1");
        }

        if let Some(package_id) = first_package_id(&self.quantity_map.package_set(selector, 1)) {
            self.page
                .set_attribute(&card, NEXT_PACKAGE_ATTR, &package_id.to_string());
        }

        if self.config.debug {
            debug!(%selector, "reset to quantity 1");
        }
    }

    fn wire(&mut self, selector: &SelectorId) {
        let Some(mut binding) = SelectorBinding::wire(&self.page, selector) else {
            if self.config.debug {
                debug!(%selector, "selector controls not found; skipping");
            }

            return;
        };

        if binding.clamped {
            let quantity = binding.state.quantity();

            binding.render_quantity(&mut self.page);

            match first_package_id(&self.quantity_map.package_set(selector, quantity)) {
                Some(package_id) => binding.render_next_package(&mut self.page, package_id),
                None => binding.clear_next_package(&mut self.page),
            }

            if self.config.debug {
                debug!(%selector, quantity, "page quantity clamped into bounds");
            }
        }

        binding.render_buttons(&mut self.page);
        self.bindings.insert(selector.clone(), binding);

        if self.config.debug {
            debug!(%selector, "quantity controls wired");
        }
    }
}
