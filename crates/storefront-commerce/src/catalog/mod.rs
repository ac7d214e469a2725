//! Product catalog module.
//!
//! Contains product and variant types, the variant index, and selection
//! resolution.

mod availability;
mod catalog;
mod product;
mod variant_index;

pub use availability::{
    effective_price, AvailabilityMode, AvailabilityResolver, Resolution, Selection, StockSnapshot,
};
pub use catalog::{Catalog, ListingEntry};
pub use product::{Dimensions, Product, Variant};
pub use variant_index::VariantIndex;
