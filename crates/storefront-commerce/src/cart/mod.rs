//! Cart module.
//!
//! Cart lines as exposed by the remote cart service, the service seam, and
//! the quantity reconciler that works around its lack of a set-quantity call.

mod line;
mod memory;
mod reconciler;
mod service;

pub use line::{CartLine, CartLineKey, CartSnapshot};
pub use memory::{CartCall, InMemoryCartService};
pub use reconciler::{CartQuantityReconciler, ReconcileError, ReconcileOutcome};
pub use service::{CartResult, CartService, CartServiceError};
