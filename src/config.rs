//! Synchronizer configuration

use std::time::Duration;

/// Delay between the page-ready signal and initialization.
pub const DEFAULT_READY_DELAY: Duration = Duration::from_millis(50);

/// How cart swaps from one selector are issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchMode {
    /// Every swap runs as soon as it is requested; overlapping swaps race.
    #[default]
    Concurrent,

    /// One swap in flight per selector; newer requests replace any queued one.
    Serialized,
}

/// Synchronizer behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "independent boolean feature toggles."
)]
pub struct SwapperConfig {
    /// Emit verbose diagnostics for configuration gaps and successful calls.
    pub debug: bool,

    /// Empty the cart before anything else during initialization.
    pub clear_cart_on_load: bool,

    /// Reset every selector to quantity 1 during initialization.
    pub reset_to_quantity_one: bool,

    /// Put each selector's quantity-1 packages in the cart during initialization.
    pub add_initial_package: bool,

    /// Wait after the page-ready signal before initializing.
    pub ready_delay: Duration,

    /// Cart swap dispatch strategy.
    pub dispatch: DispatchMode,
}

impl Default for SwapperConfig {
    fn default() -> Self {
        Self {
            debug: true,
            clear_cart_on_load: true,
            reset_to_quantity_one: true,
            add_initial_package: true,
            ready_delay: DEFAULT_READY_DELAY,
            dispatch: DispatchMode::Concurrent,
        }
    }
}

impl SwapperConfig {
    /// Configuration with every initialization side effect switched off.
    pub fn passive() -> Self {
        Self {
            clear_cart_on_load: false,
            reset_to_quantity_one: false,
            add_initial_package: false,
            ..Self::default()
        }
    }
}
