//! The remote cart service seam.

use async_trait::async_trait;
use thiserror::Error;

use crate::cart::{CartLineKey, CartSnapshot};

/// Errors returned by a cart service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartServiceError {
    /// The service could not be reached or answered garbage.
    #[error("Cart service unavailable: {0}")]
    Transport(String),

    /// The service refused the request.
    #[error("Cart service rejected request: {0}")]
    Rejected(String),

    /// No line with this key.
    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    /// Not enough stock for the requested quantity.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
}

/// Result type for cart service calls.
pub type CartResult<T> = Result<T, CartServiceError>;

/// Coarse-grained cart operations. There is no set-quantity primitive.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Read the current cart.
    async fn snapshot(&self) -> CartResult<CartSnapshot>;

    /// Add `quantity` units to a line, creating it if absent.
    async fn add_quantity(&self, key: &CartLineKey, quantity: u32) -> CartResult<()>;

    /// Remove a line entirely.
    async fn remove_line(&self, key: &CartLineKey) -> CartResult<()>;
}
