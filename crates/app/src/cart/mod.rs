//! Carts

pub mod errors;
pub mod http;
pub mod memory;
pub mod service;

pub use errors::CartServiceError;
pub use http::{HttpCartConfig, HttpCartService};
pub use memory::{CartCall, MemoryCartService};
pub use service::*;
