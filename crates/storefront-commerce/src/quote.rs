//! One-call resolution and pricing for a product page.

use crate::catalog::{AvailabilityResolver, Product, Selection, Variant};
use crate::pricing::{price_product, Campaign, PriceBreakdown};
use serde::Serialize;

/// Everything a product view needs for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuote<'a> {
    /// Resolved variant, if the selection names one.
    pub variant: Option<&'a Variant>,
    /// Sellable stock for the selection.
    pub stock: u32,
    /// The campaign that was applied.
    pub campaign: Option<&'a Campaign>,
    /// Displayed price.
    pub price: PriceBreakdown,
}

impl ProductQuote<'_> {
    /// Check if the selection can be added to the cart.
    pub fn can_purchase(&self) -> bool {
        self.stock > 0
    }

    /// Largest quantity the customer may pick.
    pub fn max_quantity(&self) -> u32 {
        self.stock
    }
}

/// Resolve a selection and price it.
///
/// An unresolved selection on a product with dimensions is priced at the
/// product base price and reports zero stock.
pub fn quote<'a>(product: &'a Product, selection: &Selection) -> ProductQuote<'a> {
    let resolution = AvailabilityResolver::new().resolve(product, selection);
    ProductQuote {
        variant: resolution.variant,
        stock: resolution.stock,
        campaign: product.active_campaign(),
        price: price_product(product, resolution.variant),
    }
}
