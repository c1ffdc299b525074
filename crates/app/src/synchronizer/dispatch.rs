//! Cart call dispatch.

use std::{
    fmt,
    ops::AddAssign,
    sync::{Arc, Mutex, PoisonError},
};

use rustc_hash::FxHashMap;
use swapper::{config::DispatchMode, packages::PackageSet, quantities::SelectorId};
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::cart::CartService;

/// Outcome counts of dispatched cart swaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settled {
    /// Swaps the cart service accepted.
    pub succeeded: usize,

    /// Swaps that failed.
    pub failed: usize,
}

impl Settled {
    fn record(&mut self, ok: bool) {
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

impl AddAssign for Settled {
    fn add_assign(&mut self, other: Self) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }
}

/// Replace the cart contents, logging instead of propagating failures.
pub(crate) async fn swap(cart: &dyn CartService, packages: PackageSet, verbose: bool) -> bool {
    match cart.swap_cart(packages).await {
        Ok(()) => {
            if verbose {
                debug!("cart swapped");
            }

            true
        }
        Err(swap_error) => {
            error!("failed to swap cart: {swap_error}");

            false
        }
    }
}

/// Empty the cart, logging instead of propagating failures.
pub(crate) async fn clear(cart: &dyn CartService, verbose: bool) -> bool {
    match cart.clear_cart().await {
        Ok(()) => {
            if verbose {
                debug!("cart cleared");
            }

            true
        }
        Err(clear_error) => {
            error!("failed to clear cart: {clear_error}");

            false
        }
    }
}

#[derive(Debug, Default)]
struct Lane {
    in_flight: bool,
    pending: Option<PackageSet>,
}

/// Issues cart swaps in the background according to a [`DispatchMode`].
pub(crate) struct Dispatcher {
    cart: Arc<dyn CartService>,
    mode: DispatchMode,
    verbose: bool,
    tasks: JoinSet<Settled>,
    reaped: Settled,
    lanes: FxHashMap<SelectorId, Arc<Mutex<Lane>>>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("mode", &self.mode)
            .field("in_flight", &self.tasks.len())
            .field("reaped", &self.reaped)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub(crate) fn new(cart: Arc<dyn CartService>, mode: DispatchMode, verbose: bool) -> Self {
        Self {
            cart,
            mode,
            verbose,
            tasks: JoinSet::new(),
            reaped: Settled::default(),
            lanes: FxHashMap::default(),
        }
    }

    pub(crate) fn cart(&self) -> &dyn CartService {
        self.cart.as_ref()
    }

    /// Request a swap on behalf of `selector` without waiting for it.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn dispatch(&mut self, selector: &SelectorId, packages: PackageSet) {
        self.reap();

        match self.mode {
            DispatchMode::Concurrent => {
                let cart = Arc::clone(&self.cart);
                let verbose = self.verbose;

                self.tasks.spawn(async move {
                    let mut settled = Settled::default();
                    settled.record(swap(cart.as_ref(), packages, verbose).await);
                    settled
                });
            }
            DispatchMode::Serialized => {
                let lane = Arc::clone(self.lanes.entry(selector.clone()).or_default());

                {
                    let mut state = lane.lock().unwrap_or_else(PoisonError::into_inner);

                    if state.in_flight {
                        if state.pending.replace(packages).is_some() && self.verbose {
                            debug!(%selector, "superseded queued cart swap");
                        }

                        return;
                    }

                    state.in_flight = true;
                }

                let cart = Arc::clone(&self.cart);
                let verbose = self.verbose;

                self.tasks.spawn(drain_lane(cart, lane, packages, verbose));
            }
        }
    }

    /// Wait for every outstanding swap and return the totals since the last settle.
    pub(crate) async fn settle(&mut self) -> Settled {
        let mut settled = std::mem::take(&mut self.reaped);

        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(outcome) => settled += outcome,
                Err(join_error) => {
                    error!("cart swap task did not complete: {join_error}");
                    settled.failed += 1;
                }
            }
        }

        settled
    }

    fn reap(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            match joined {
                Ok(outcome) => self.reaped += outcome,
                Err(join_error) => {
                    error!("cart swap task did not complete: {join_error}");
                    self.reaped.failed += 1;
                }
            }
        }
    }
}

async fn drain_lane(
    cart: Arc<dyn CartService>,
    lane: Arc<Mutex<Lane>>,
    mut packages: PackageSet,
    verbose: bool,
) -> Settled {
    let mut settled = Settled::default();

    loop {
        settled.record(swap(cart.as_ref(), packages, verbose).await);

        let next = {
            let mut state = lane.lock().unwrap_or_else(PoisonError::into_inner);
            let next = state.pending.take();

            if next.is_none() {
                state.in_flight = false;
            }

            next
        };

        match next {
            Some(queued) => packages = queued,
            None => return settled,
        }
    }
}
