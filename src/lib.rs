//! Swapper
//!
//! Swapper keeps storefront quantity selectors in step with the backend packages
//! each quantity is sold as.

pub mod config;
pub mod fixtures;
pub mod packages;
pub mod page;
pub mod prelude;
pub mod quantities;
pub mod selectors;
