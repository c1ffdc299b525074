//! Swapper application: cart services, the quantity synchronizer and its
//! command-line configuration.

pub mod cart;
pub mod config;
pub mod synchronizer;

#[cfg(test)]
mod test;
