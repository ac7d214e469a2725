//! Selection resolution and stock checks.

use std::collections::BTreeSet;

use crate::catalog::{Product, Variant, VariantIndex};
use crate::ids::{ColorId, SizeId};
use crate::numeric::finite_or;
use serde::{Deserialize, Serialize};

/// A customer's in-progress color/size choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_id: Option<ColorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_id: Option<SizeId>,
}

impl Selection {
    /// Nothing chosen yet.
    pub fn none() -> Self {
        Self::default()
    }

    /// Choose a color.
    pub fn with_color(mut self, color: impl Into<ColorId>) -> Self {
        self.color_id = Some(color.into());
        self
    }

    /// Choose a size.
    pub fn with_size(mut self, size: impl Into<SizeId>) -> Self {
        self.size_id = Some(size.into());
        self
    }
}

/// Outcome of resolving a selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    /// The matched variant. Always `None` for products without dimensions.
    pub variant: Option<&'a Variant>,
    /// Sellable stock for the selection.
    pub stock: u32,
}

impl Resolution<'_> {
    /// Check if the selection can be bought.
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

/// How listing views treat products whose variant data has not arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityMode {
    /// Missing data counts as out of stock.
    Strict,
    /// Missing data counts as available.
    #[default]
    Lenient,
}

impl AvailabilityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityMode::Strict => "strict",
            AvailabilityMode::Lenient => "lenient",
        }
    }
}

/// Stock facts a listing has about a product before any selection exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockSnapshot<'a> {
    /// Whether the product is sold through variants.
    pub has_dimensions: bool,
    /// Stock of a product without dimensions.
    pub base_stock: u32,
    /// Aggregate stock, when the listing endpoint supplies one.
    pub total_stock: Option<u32>,
    /// Active variants, or `None` when they have not been loaded.
    pub active_variants: Option<&'a [Variant]>,
}

impl<'a> StockSnapshot<'a> {
    /// Snapshot of a fully loaded product.
    pub fn from_product(product: &'a Product) -> Self {
        Self {
            has_dimensions: product.has_dimensions(),
            base_stock: product.base_stock,
            total_stock: product.total_stock,
            active_variants: Some(&product.variants),
        }
    }

    /// Snapshot of a product whose variants have not been fetched yet.
    pub fn without_variants(product: &'a Product) -> Self {
        Self {
            active_variants: None,
            ..Self::from_product(product)
        }
    }
}

/// Stateless resolver shared by listing, detail and quick-add call sites.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityResolver;

impl AvailabilityResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a selection to a variant and its sellable stock.
    ///
    /// Products with dimensions report zero stock until the selection names
    /// an existing variant.
    pub fn resolve<'a>(&self, product: &'a Product, selection: &Selection) -> Resolution<'a> {
        if !product.has_dimensions() {
            return Resolution {
                variant: None,
                stock: product.base_stock,
            };
        }

        match self.resolve_variant(product, selection) {
            Some(variant) => Resolution {
                variant: Some(variant),
                stock: variant.stock,
            },
            None => {
                tracing::debug!(
                    product = %product.id,
                    color = ?selection.color_id,
                    size = ?selection.size_id,
                    "selection does not resolve to a variant"
                );
                Resolution {
                    variant: None,
                    stock: 0,
                }
            }
        }
    }

    /// The variant named by a selection, if complete and existing.
    pub fn resolve_variant<'a>(
        &self,
        product: &'a Product,
        selection: &Selection,
    ) -> Option<&'a Variant> {
        if !product.has_dimensions() {
            return None;
        }
        VariantIndex::new(product).exact(selection.color_id.as_ref(), selection.size_id.as_ref())
    }

    /// Colors to offer given the currently selected size.
    pub fn list_colors(&self, product: &Product, selection: &Selection) -> BTreeSet<ColorId> {
        VariantIndex::new(product).by_size(selection.size_id.as_ref())
    }

    /// Sizes to offer given the currently selected color.
    pub fn list_sizes(&self, product: &Product, selection: &Selection) -> BTreeSet<SizeId> {
        VariantIndex::new(product).by_color(selection.color_id.as_ref())
    }

    /// Sellable stock for a selection.
    pub fn compute_stock(&self, product: &Product, selection: &Selection) -> u32 {
        self.resolve(product, selection).stock
    }

    /// Listing-level stock check, before any selection exists.
    ///
    /// Deliberately looser than [`resolve`](Self::resolve) in lenient mode:
    /// a product whose variants have not loaded is shown as available.
    pub fn is_out_of_stock(&self, snapshot: &StockSnapshot<'_>, mode: AvailabilityMode) -> bool {
        if let Some(total) = snapshot.total_stock {
            return total == 0;
        }

        if !snapshot.has_dimensions {
            return snapshot.base_stock == 0;
        }

        match snapshot.active_variants {
            Some(variants) => !variants.iter().any(Variant::is_in_stock),
            None => mode == AvailabilityMode::Strict,
        }
    }
}

/// The price a unit sells for before campaigns.
///
/// A variant's own price wins when present and non-zero.
pub fn effective_price(product: &Product, variant: Option<&Variant>) -> f64 {
    variant
        .and_then(Variant::price_override)
        .unwrap_or_else(|| finite_or(product.base_price, 0.0))
}
