//! Variant resolution, promotional pricing and cart reconciliation for
//! storefronts.
//!
//! - **Catalog**: Products, variants, the variant index, selection resolution
//! - **Pricing**: Campaigns and the single-discount price calculation
//! - **Cart**: Cart service seam and the quantity reconciler
//! - **Notify**: Typed cart and toast events
//!
//! Pricing and resolution are pure and never fail; malformed catalog input
//! falls back to safe values. Only the reconciler does I/O.
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let product = Product::new("tee", "Tee", 100000.0)
//!     .with_dimensions(true, true)
//!     .with_variant(Variant::new("tee-a-s", 5).with_color("A").with_size("S"))
//!     .with_campaign(Campaign::percentage(20.0));
//!
//! let quote = quote(&product, &Selection::none().with_color("A").with_size("S"));
//! assert_eq!(quote.stock, 5);
//! assert_eq!(quote.price.final_price, 80000.0);
//! ```

pub mod error;
pub mod ids;
pub mod numeric;

pub mod cart;
pub mod catalog;
pub mod config;
pub mod notify;
pub mod pricing;
pub mod quote;

pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        effective_price, AvailabilityMode, AvailabilityResolver, Catalog, ListingEntry,
        Product, Resolution, Selection, StockSnapshot, Variant, VariantIndex,
    };

    // Pricing
    pub use crate::pricing::{price, price_product, Campaign, CampaignType, PriceBreakdown};

    // Cart
    pub use crate::cart::{
        CartLine, CartLineKey, CartQuantityReconciler, CartService, CartServiceError,
        CartSnapshot, InMemoryCartService, ReconcileError, ReconcileOutcome,
    };

    pub use crate::config::{ReconcilerConfig, StorefrontConfig};
    pub use crate::notify::{BroadcastBus, NoopBus, NotificationBus, StorefrontEvent, ToastKind};
    pub use crate::quote::{quote, ProductQuote};
}
