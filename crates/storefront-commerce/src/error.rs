//! Commerce error types.

use thiserror::Error;

use crate::cart::{CartServiceError, ReconcileError};

/// Errors that can occur in storefront operations.
///
/// Pricing and resolution never fail; these cover catalog lookups and the
/// cart collaborators.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Variant not found.
    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    /// Cart service call failed.
    #[error(transparent)]
    CartService(#[from] CartServiceError),

    /// Cart line could not be driven to its target quantity.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
