//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::catalog::AvailabilityMode;

/// Storefront engine settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub availability: AvailabilityConfig,
    pub reconciler: ReconcilerConfig,
}

/// Listing availability settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    /// How listings treat products whose variants have not loaded.
    pub listing_mode: AvailabilityMode,
}

/// Cart reconciliation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Publish an error toast when reconciliation fails.
    pub failure_toasts: bool,
    /// Publish a success toast when reconciliation succeeds.
    pub success_toasts: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            failure_toasts: true,
            success_toasts: false,
        }
    }
}
