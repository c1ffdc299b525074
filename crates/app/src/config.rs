//! Command-line configuration

use std::time::Duration;

use clap::{ArgAction, Args, ValueEnum};
use swapper::config::{DispatchMode, SwapperConfig};

use crate::cart::HttpCartConfig;

/// Cart dispatch strategy.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DispatchArg {
    /// Issue every swap immediately.
    Concurrent,

    /// One swap in flight per selector; the latest queued swap wins.
    Serialized,
}

impl From<DispatchArg> for DispatchMode {
    fn from(dispatch: DispatchArg) -> Self {
        match dispatch {
            DispatchArg::Concurrent => DispatchMode::Concurrent,
            DispatchArg::Serialized => DispatchMode::Serialized,
        }
    }
}

/// Synchronizer behaviour settings.
#[derive(Debug, Args)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "independent boolean feature toggles from CLI/env."
)]
pub struct SwapperArgs {
    /// Verbose diagnostics (also raises the default log level to debug)
    #[arg(long, env = "SWAPPER_DEBUG", default_value_t = true, action = ArgAction::Set)]
    pub debug: bool,

    /// Empty the cart when initializing
    #[arg(
        long,
        env = "SWAPPER_CLEAR_CART_ON_LOAD",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub clear_cart_on_load: bool,

    /// Reset every selector to quantity 1 when initializing
    #[arg(
        long,
        env = "SWAPPER_RESET_TO_QUANTITY_ONE",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub reset_to_quantity_one: bool,

    /// Add each selector's quantity-1 packages when initializing
    #[arg(
        long,
        env = "SWAPPER_ADD_INITIAL_PACKAGE",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub add_initial_package: bool,

    /// Delay between the ready signal and initialization, in milliseconds
    #[arg(long, env = "SWAPPER_READY_DELAY_MS", default_value_t = 50_u64)]
    pub ready_delay_ms: u64,

    /// Cart dispatch strategy (concurrent, serialized)
    #[arg(long, env = "SWAPPER_DISPATCH", value_enum, default_value_t = DispatchArg::Concurrent)]
    pub dispatch: DispatchArg,
}

impl From<&SwapperArgs> for SwapperConfig {
    fn from(args: &SwapperArgs) -> Self {
        Self {
            debug: args.debug,
            clear_cart_on_load: args.clear_cart_on_load,
            reset_to_quantity_one: args.reset_to_quantity_one,
            add_initial_package: args.add_initial_package,
            ready_delay: Duration::from_millis(args.ready_delay_ms),
            dispatch: args.dispatch.into(),
        }
    }
}

/// Cart service settings. Without a URL an in-memory cart is used.
#[derive(Debug, Args)]
pub struct CartArgs {
    /// Cart service base URL
    #[arg(long, env = "CART_URL")]
    pub cart_url: Option<String>,

    /// Cart service bearer token
    #[arg(long, env = "CART_TOKEN", hide_env_values = true)]
    pub cart_token: Option<String>,

    /// Cart request timeout in milliseconds
    #[arg(long, env = "CART_TIMEOUT_MS")]
    pub cart_timeout_ms: Option<u64>,
}

impl CartArgs {
    /// HTTP cart configuration, if a cart URL was given.
    pub fn http_config(&self) -> Option<HttpCartConfig> {
        self.cart_url.as_ref().map(|base_url| HttpCartConfig {
            base_url: base_url.clone(),
            token: self.cart_token.clone(),
            timeout: self.cart_timeout_ms.map(Duration::from_millis),
        })
    }
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingArgs {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}
