//! In-memory cart.

use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use swapper::packages::PackageSet;

use crate::cart::{errors::CartServiceError, service::CartService};

/// A call received by a [`MemoryCartService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCall {
    /// `swap_cart` with the requested lines.
    Swap(PackageSet),

    /// `clear_cart`.
    Clear,
}

#[derive(Debug, Default)]
struct CartState {
    lines: PackageSet,
    calls: Vec<CartCall>,
}

/// Cart held in process memory.
///
/// Every call is recorded, including failed ones. While failing, calls leave
/// the contents untouched and return [`CartServiceError::Rejected`].
#[derive(Debug, Default)]
pub struct MemoryCartService {
    state: Mutex<CartState>,
    failing: AtomicBool,
}

impl MemoryCartService {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent calls fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Current cart lines.
    pub fn lines(&self) -> PackageSet {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .lines
            .clone()
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<CartCall> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
            .clone()
    }

    fn apply(&self, call: CartCall) -> Result<(), CartServiceError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        state.calls.push(call.clone());

        if self.failing.load(Ordering::SeqCst) {
            return Err(CartServiceError::Rejected("cart unavailable".to_string()));
        }

        state.lines = match call {
            CartCall::Swap(packages) => packages,
            CartCall::Clear => PackageSet::new(),
        };

        Ok(())
    }
}

#[async_trait]
impl CartService for MemoryCartService {
    async fn swap_cart(&self, packages: PackageSet) -> Result<(), CartServiceError> {
        self.apply(CartCall::Swap(packages))
    }

    async fn clear_cart(&self) -> Result<(), CartServiceError> {
        self.apply(CartCall::Clear)
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use swapper::packages::PackageLine;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn swap_replaces_and_clear_empties() -> TestResult {
        let cart = MemoryCartService::new();

        cart.swap_cart(smallvec![PackageLine::new(2, 1)]).await?;
        cart.swap_cart(smallvec![PackageLine::new(3, 2)]).await?;
        assert_eq!(cart.lines().as_slice(), &[PackageLine::new(3, 2)]);

        cart.clear_cart().await?;
        assert!(cart.lines().is_empty());
        assert_eq!(cart.calls().len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn failing_cart_records_call_but_keeps_contents() -> TestResult {
        let cart = MemoryCartService::new();
        cart.swap_cart(smallvec![PackageLine::new(2, 1)]).await?;

        cart.set_failing(true);
        let result = cart.swap_cart(smallvec![PackageLine::new(4, 1)]).await;

        assert!(
            matches!(result, Err(CartServiceError::Rejected(_))),
            "expected Rejected, got {result:?}"
        );
        assert_eq!(cart.lines().as_slice(), &[PackageLine::new(2, 1)]);
        assert_eq!(
            cart.calls().last(),
            Some(&CartCall::Swap(smallvec![PackageLine::new(4, 1)]))
        );

        Ok(())
    }
}
