//! In-process cart service for tests and local tools.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::cart::{CartLineKey, CartResult, CartService, CartServiceError, CartSnapshot};

/// A call received by [`InMemoryCartService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCall {
    Snapshot,
    Add(CartLineKey, u32),
    Remove(CartLineKey),
}

#[derive(Debug, Default)]
struct State {
    cart: CartSnapshot,
    stock: HashMap<CartLineKey, u32>,
    fail_snapshot: Option<CartServiceError>,
    fail_adds: Option<CartServiceError>,
    fail_removes: Option<CartServiceError>,
    calls: Vec<CartCall>,
}

/// Cart service backed by a mutex-guarded snapshot.
///
/// Supports per-line stock limits and failure injection per operation.
#[derive(Debug, Default)]
pub struct InMemoryCartService {
    state: Mutex<State>,
}

impl InMemoryCartService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing cart.
    pub fn with_cart(cart: CartSnapshot) -> Self {
        let service = Self::new();
        service.lock().cart = cart;
        service
    }

    /// Seed a line.
    pub fn with_line(self, key: CartLineKey, quantity: u32) -> Self {
        self.lock().cart.add(&key, quantity);
        self
    }

    /// Cap how many units of a line the cart may hold.
    pub fn with_stock_limit(self, key: CartLineKey, available: u32) -> Self {
        self.lock().stock.insert(key, available);
        self
    }

    /// Make every subsequent snapshot call fail.
    pub fn fail_snapshot(&self, error: CartServiceError) {
        self.lock().fail_snapshot = Some(error);
    }

    /// Make every subsequent add call fail.
    pub fn fail_adds(&self, error: CartServiceError) {
        self.lock().fail_adds = Some(error);
    }

    /// Make every subsequent remove call fail.
    pub fn fail_removes(&self, error: CartServiceError) {
        self.lock().fail_removes = Some(error);
    }

    /// Clear all injected failures.
    pub fn heal(&self) {
        let mut state = self.lock();
        state.fail_snapshot = None;
        state.fail_adds = None;
        state.fail_removes = None;
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<CartCall> {
        self.lock().calls.clone()
    }

    /// Current cart contents, without recording a call.
    pub fn cart(&self) -> CartSnapshot {
        self.lock().cart.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock leaves plain data behind.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CartService for InMemoryCartService {
    async fn snapshot(&self) -> CartResult<CartSnapshot> {
        let mut state = self.lock();
        state.calls.push(CartCall::Snapshot);
        if let Some(err) = state.fail_snapshot.clone() {
            return Err(err);
        }
        Ok(state.cart.clone())
    }

    async fn add_quantity(&self, key: &CartLineKey, quantity: u32) -> CartResult<()> {
        let mut state = self.lock();
        state.calls.push(CartCall::Add(key.clone(), quantity));
        if let Some(err) = state.fail_adds.clone() {
            return Err(err);
        }
        if quantity == 0 {
            return Err(CartServiceError::Rejected(
                "quantity must be positive".to_string(),
            ));
        }

        let requested = state.cart.quantity_of(key).saturating_add(quantity);
        if let Some(&available) = state.stock.get(key) {
            if requested > available {
                return Err(CartServiceError::InsufficientStock {
                    requested,
                    available,
                });
            }
        }

        state.cart.add(key, quantity);
        Ok(())
    }

    async fn remove_line(&self, key: &CartLineKey) -> CartResult<()> {
        let mut state = self.lock();
        state.calls.push(CartCall::Remove(key.clone()));
        if let Some(err) = state.fail_removes.clone() {
            return Err(err);
        }
        if state.cart.remove(key) {
            Ok(())
        } else {
            Err(CartServiceError::LineNotFound(key.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_accumulates() {
        let service = InMemoryCartService::new();
        let key = CartLineKey::product("pen");

        service.add_quantity(&key, 2).await.unwrap();
        service.add_quantity(&key, 1).await.unwrap();

        assert_eq!(service.snapshot().await.unwrap().quantity_of(&key), 3);
    }

    #[tokio::test]
    async fn test_stock_limit() {
        let key = CartLineKey::variant("tee", "v1");
        let service = InMemoryCartService::new()
            .with_line(key.clone(), 2)
            .with_stock_limit(key.clone(), 3);

        let err = service.add_quantity(&key, 2).await.unwrap_err();
        assert_eq!(
            err,
            CartServiceError::InsufficientStock {
                requested: 4,
                available: 3
            }
        );
        assert_eq!(service.cart().quantity_of(&key), 2);
    }

    #[tokio::test]
    async fn test_remove_missing_line() {
        let service = InMemoryCartService::new();
        let err = service
            .remove_line(&CartLineKey::product("pen"))
            .await
            .unwrap_err();
        assert!(matches!(err, CartServiceError::LineNotFound(_)));
    }

    #[tokio::test]
    async fn test_failure_injection_and_call_log() {
        let key = CartLineKey::product("pen");
        let service = InMemoryCartService::new().with_line(key.clone(), 1);
        service.fail_adds(CartServiceError::Transport("offline".into()));

        assert!(service.add_quantity(&key, 1).await.is_err());
        service.heal();
        service.add_quantity(&key, 1).await.unwrap();

        assert_eq!(
            service.calls(),
            vec![CartCall::Add(key.clone(), 1), CartCall::Add(key.clone(), 1)]
        );
        assert_eq!(service.cart().quantity_of(&key), 2);
    }
}
