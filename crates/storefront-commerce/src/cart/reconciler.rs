//! Drives a cart line to a target quantity.
//!
//! The cart service only offers "add N" and "remove line", so changing a
//! quantity is a remove followed by a re-add. The sequence is not
//! transactional: if the remove lands and the add fails, the line is gone.
//! That case surfaces as [`ReconcileError::PartialFailure`] and callers
//! must re-read the cart.

use std::sync::Arc;

use thiserror::Error;

use crate::cart::{CartLineKey, CartService, CartServiceError};
use crate::config::ReconcilerConfig;
use crate::notify::{NotificationBus, StorefrontEvent, ToastKind};

/// What a successful reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The line was absent and has been created.
    Added { quantity: u32 },
    /// The line was removed and re-added at the target.
    Replaced { previous: u32, quantity: u32 },
    /// The line was removed.
    Removed { previous: u32 },
    /// Target 0 on an absent line; nothing was called.
    Unchanged,
}

impl ReconcileOutcome {
    /// Quantity of the line afterwards.
    pub fn quantity(&self) -> u32 {
        match self {
            ReconcileOutcome::Added { quantity } | ReconcileOutcome::Replaced { quantity, .. } => {
                *quantity
            }
            ReconcileOutcome::Removed { .. } | ReconcileOutcome::Unchanged => 0,
        }
    }

    /// Whether the cart was mutated.
    pub fn changed_cart(&self) -> bool {
        !matches!(self, ReconcileOutcome::Unchanged)
    }
}

/// Why a reconciliation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// The cart could not be read; nothing was changed.
    #[error("Could not read cart: {source}")]
    Snapshot { source: CartServiceError },

    /// The line was absent and adding it failed; nothing was changed.
    #[error("Could not add {quantity} of {key}: {source}")]
    Add {
        key: CartLineKey,
        quantity: u32,
        source: CartServiceError,
    },

    /// Removing the line failed. The line is untouched, unless the service
    /// reported it missing because another caller removed it first.
    #[error("Could not remove {key}: {source}")]
    Remove {
        key: CartLineKey,
        source: CartServiceError,
    },

    /// The line was removed but re-adding it failed; the line is now absent.
    #[error("Removed {key} (was {previous}) but could not re-add {target}: {source}")]
    PartialFailure {
        key: CartLineKey,
        previous: u32,
        target: u32,
        source: CartServiceError,
    },
}

impl ReconcileError {
    /// Whether the line is known to be absent after the failure.
    pub fn line_left_absent(&self) -> bool {
        match self {
            ReconcileError::Add { .. } | ReconcileError::PartialFailure { .. } => true,
            ReconcileError::Remove { source, .. } => is_line_missing(source),
            ReconcileError::Snapshot { .. } => false,
        }
    }

    /// Whether the caller's view of the cart is stale and must be re-read.
    pub fn requires_resync(&self) -> bool {
        match self {
            ReconcileError::Snapshot { .. } | ReconcileError::PartialFailure { .. } => true,
            // The line vanished between the snapshot and the remove.
            ReconcileError::Remove { source, .. } => is_line_missing(source),
            ReconcileError::Add { .. } => false,
        }
    }

    /// The collaborator error that caused the failure.
    pub fn service_error(&self) -> &CartServiceError {
        match self {
            ReconcileError::Snapshot { source }
            | ReconcileError::Add { source, .. }
            | ReconcileError::Remove { source, .. }
            | ReconcileError::PartialFailure { source, .. } => source,
        }
    }
}

/// Moves cart lines to target quantities through a [`CartService`].
///
/// Each call makes at most three service calls, strictly in order:
/// snapshot, remove, add. Concurrent calls for the same line are not
/// serialized here.
#[derive(Clone)]
pub struct CartQuantityReconciler {
    cart: Arc<dyn CartService>,
    bus: Arc<dyn NotificationBus>,
    config: ReconcilerConfig,
}

impl CartQuantityReconciler {
    pub fn new(
        cart: Arc<dyn CartService>,
        bus: Arc<dyn NotificationBus>,
        config: ReconcilerConfig,
    ) -> Self {
        Self { cart, bus, config }
    }

    /// Drive the line at `key` to `target` units. A target of 0 removes it.
    pub async fn reconcile(
        &self,
        key: &CartLineKey,
        target: u32,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let result = self.run(key, target).await;

        match &result {
            Ok(outcome) => {
                tracing::info!(line = %key, target, ?outcome, "cart line reconciled");
                if outcome.changed_cart() {
                    self.bus.publish(StorefrontEvent::CartChanged);
                    if self.config.success_toasts {
                        self.bus
                            .publish(StorefrontEvent::toast(ToastKind::Success, success_message(outcome)));
                    }
                }
            }
            Err(err) => {
                if let ReconcileError::PartialFailure { previous, .. } = err {
                    tracing::warn!(
                        line = %key,
                        previous,
                        target,
                        error = %err.service_error(),
                        "cart line removed but not re-added"
                    );
                    // The remove went through.
                    self.bus.publish(StorefrontEvent::CartChanged);
                } else {
                    tracing::info!(line = %key, target, error = %err, "cart line not reconciled");
                }
                if self.config.failure_toasts {
                    self.bus
                        .publish(StorefrontEvent::toast(ToastKind::Error, err.to_string()));
                }
            }
        }

        result
    }

    /// Quantity of a line according to a fresh snapshot.
    pub async fn current_quantity(&self, key: &CartLineKey) -> Result<u32, CartServiceError> {
        Ok(self.cart.snapshot().await?.quantity_of(key))
    }

    async fn run(&self, key: &CartLineKey, target: u32) -> Result<ReconcileOutcome, ReconcileError> {
        let snapshot = self
            .cart
            .snapshot()
            .await
            .map_err(|source| ReconcileError::Snapshot { source })?;

        let previous = match snapshot.find(key) {
            Some(line) => line.quantity,
            None if target == 0 => return Ok(ReconcileOutcome::Unchanged),
            None => {
                self.cart
                    .add_quantity(key, target)
                    .await
                    .map_err(|source| ReconcileError::Add {
                        key: key.clone(),
                        quantity: target,
                        source,
                    })?;
                return Ok(ReconcileOutcome::Added { quantity: target });
            }
        };

        self.cart
            .remove_line(key)
            .await
            .map_err(|source| ReconcileError::Remove {
                key: key.clone(),
                source,
            })?;

        if target == 0 {
            return Ok(ReconcileOutcome::Removed { previous });
        }

        self.cart
            .add_quantity(key, target)
            .await
            .map_err(|source| ReconcileError::PartialFailure {
                key: key.clone(),
                previous,
                target,
                source,
            })?;

        Ok(ReconcileOutcome::Replaced {
            previous,
            quantity: target,
        })
    }
}

fn is_line_missing(error: &CartServiceError) -> bool {
    matches!(error, CartServiceError::LineNotFound(_))
}

fn success_message(outcome: &ReconcileOutcome) -> String {
    match outcome {
        ReconcileOutcome::Added { quantity } => format!("Added {quantity} to cart"),
        ReconcileOutcome::Replaced { quantity, .. } => format!("Quantity updated to {quantity}"),
        ReconcileOutcome::Removed { .. } => "Removed from cart".to_string(),
        ReconcileOutcome::Unchanged => "Cart unchanged".to_string(),
    }
}
