//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use swapper::packages::PackageSet;

use crate::cart::errors::CartServiceError;

/// External cart the synchronizer keeps in step with the selectors.
#[automock]
#[async_trait]
pub trait CartService: Send + Sync {
    /// Replace the cart contents with exactly `packages`.
    async fn swap_cart(&self, packages: PackageSet) -> Result<(), CartServiceError>;

    /// Remove everything from the cart.
    async fn clear_cart(&self) -> Result<(), CartServiceError>;
}
