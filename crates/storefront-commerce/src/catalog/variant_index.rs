//! Lookup structures over a product's variants.

use std::collections::{BTreeSet, HashMap};

use crate::catalog::{Dimensions, Product, Variant};
use crate::ids::{ColorId, SizeId};

type PairKey = (Option<ColorId>, Option<SizeId>);

/// Per-request index of a product's variants.
///
/// Only the dimensions the product declares take part in lookups; ids on an
/// undeclared dimension are never compared.
#[derive(Debug)]
pub struct VariantIndex<'a> {
    dimensions: Dimensions,
    colors: BTreeSet<ColorId>,
    sizes: BTreeSet<SizeId>,
    sizes_by_color: HashMap<&'a ColorId, BTreeSet<SizeId>>,
    colors_by_size: HashMap<&'a SizeId, BTreeSet<ColorId>>,
    exact: HashMap<PairKey, &'a Variant>,
}

impl<'a> VariantIndex<'a> {
    /// Index the variants of `product`.
    pub fn new(product: &'a Product) -> Self {
        Self::from_variants(product.dimensions(), &product.variants)
    }

    /// Index a raw variant list under the given dimensions.
    pub fn from_variants(dimensions: Dimensions, variants: &'a [Variant]) -> Self {
        let mut index = Self {
            dimensions,
            colors: BTreeSet::new(),
            sizes: BTreeSet::new(),
            sizes_by_color: HashMap::new(),
            colors_by_size: HashMap::new(),
            exact: HashMap::new(),
        };

        for variant in variants {
            let color = variant.color_id.as_ref().filter(|_| dimensions.colors);
            let size = variant.size_id.as_ref().filter(|_| dimensions.sizes);

            if let Some(color) = color {
                index.colors.insert(color.clone());
            }
            if let Some(size) = size {
                index.sizes.insert(size.clone());
            }
            if let (Some(color), Some(size)) = (color, size) {
                index
                    .sizes_by_color
                    .entry(color)
                    .or_default()
                    .insert(size.clone());
                index
                    .colors_by_size
                    .entry(size)
                    .or_default()
                    .insert(color.clone());
            }

            // A variant missing a declared dimension can never be selected.
            if (dimensions.colors && color.is_none()) || (dimensions.sizes && size.is_none()) {
                tracing::warn!(
                    variant = %variant.id,
                    "variant lacks a declared dimension and is unselectable"
                );
                continue;
            }

            let pair = (color.cloned(), size.cloned());
            if let Some(first) = index.exact.get(&pair) {
                tracing::warn!(
                    kept = %first.id,
                    dropped = %variant.id,
                    "duplicate color/size pair, keeping the first variant"
                );
                continue;
            }
            index.exact.insert(pair, variant);
        }

        index
    }

    /// Declared dimensions of the indexed product.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// All colors across the variants.
    pub fn colors(&self) -> &BTreeSet<ColorId> {
        &self.colors
    }

    /// All sizes across the variants.
    pub fn sizes(&self) -> &BTreeSet<SizeId> {
        &self.sizes
    }

    /// Sizes offered together with `color`.
    ///
    /// Every size is offered when the product has no color dimension or no
    /// color is selected.
    pub fn by_color(&self, color: Option<&ColorId>) -> BTreeSet<SizeId> {
        match color {
            Some(color) if self.dimensions.colors && self.dimensions.sizes => self
                .sizes_by_color
                .get(color)
                .cloned()
                .unwrap_or_default(),
            Some(_) if self.dimensions.colors => BTreeSet::new(),
            _ => self.sizes.clone(),
        }
    }

    /// Colors offered together with `size`.
    pub fn by_size(&self, size: Option<&SizeId>) -> BTreeSet<ColorId> {
        match size {
            Some(size) if self.dimensions.sizes && self.dimensions.colors => self
                .colors_by_size
                .get(size)
                .cloned()
                .unwrap_or_default(),
            Some(_) if self.dimensions.sizes => BTreeSet::new(),
            _ => self.colors.clone(),
        }
    }

    /// The variant matching the selection on every declared dimension.
    ///
    /// Returns `None` while a declared dimension is still unselected.
    pub fn exact(&self, color: Option<&ColorId>, size: Option<&SizeId>) -> Option<&'a Variant> {
        let color = if self.dimensions.colors { Some(color?.clone()) } else { None };
        let size = if self.dimensions.sizes { Some(size?.clone()) } else { None };
        self.exact.get(&(color, size)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<T: Ord + Clone>(items: &[T]) -> BTreeSet<T> {
        items.iter().cloned().collect()
    }

    fn two_variant_product() -> Product {
        Product::new("shirt", "Shirt", 100.0)
            .with_dimensions(true, true)
            .with_variant(Variant::new("a-s", 5).with_color("A").with_size("S"))
            .with_variant(Variant::new("b-m", 0).with_color("B").with_size("M"))
    }

    #[test]
    fn test_cross_filtering() {
        let product = two_variant_product();
        let index = VariantIndex::new(&product);

        assert_eq!(index.by_color(Some(&"A".into())), ids(&[SizeId::new("S")]));
        assert_eq!(index.by_size(Some(&"M".into())), ids(&[ColorId::new("B")]));
    }

    #[test]
    fn test_unset_selection_offers_everything() {
        let product = two_variant_product();
        let index = VariantIndex::new(&product);

        assert_eq!(index.by_color(None), ids(&[SizeId::new("M"), SizeId::new("S")]));
        assert_eq!(index.by_size(None), ids(&[ColorId::new("A"), ColorId::new("B")]));
    }

    #[test]
    fn test_unknown_value_offers_nothing() {
        let product = two_variant_product();
        let index = VariantIndex::new(&product);

        assert!(index.by_color(Some(&"Z".into())).is_empty());
    }

    #[test]
    fn test_union_over_shared_value() {
        let product = Product::new("p", "P", 10.0)
            .with_dimensions(true, true)
            .with_variant(Variant::new("1", 1).with_color("red").with_size("s"))
            .with_variant(Variant::new("2", 1).with_color("red").with_size("m"))
            .with_variant(Variant::new("3", 1).with_color("blue").with_size("l"));
        let index = VariantIndex::new(&product);

        assert_eq!(
            index.by_color(Some(&"red".into())),
            ids(&[SizeId::new("m"), SizeId::new("s")])
        );
    }

    #[test]
    fn test_exact_requires_every_declared_dimension() {
        let product = two_variant_product();
        let index = VariantIndex::new(&product);

        assert!(index.exact(Some(&"A".into()), None).is_none());
        assert!(index.exact(None, Some(&"S".into())).is_none());
        assert!(index.exact(Some(&"A".into()), Some(&"M".into())).is_none());
        assert_eq!(
            index
                .exact(Some(&"A".into()), Some(&"S".into()))
                .map(|v| v.id.as_str()),
            Some("a-s")
        );
    }

    #[test]
    fn test_undeclared_dimension_is_ignored() {
        // Color-only product whose feed still carries size ids.
        let product = Product::new("mug", "Mug", 10.0)
            .with_dimensions(true, false)
            .with_variant(Variant::new("mug-red", 2).with_color("red").with_size("ignored"));
        let index = VariantIndex::new(&product);

        let hit = index.exact(Some(&"red".into()), Some(&"whatever".into()));
        assert_eq!(hit.map(|v| v.id.as_str()), Some("mug-red"));
        assert_eq!(
            index.exact(Some(&"red".into()), None).map(|v| v.id.as_str()),
            Some("mug-red")
        );
        assert!(index.sizes().is_empty());
        assert!(index.by_color(Some(&"red".into())).is_empty());
    }

    #[test]
    fn test_size_only_product() {
        let product = Product::new("sock", "Sock", 5.0)
            .with_dimensions(false, true)
            .with_variant(Variant::new("sock-s", 1).with_size("s"))
            .with_variant(Variant::new("sock-m", 0).with_size("m"));
        let index = VariantIndex::new(&product);

        assert_eq!(index.by_color(None), ids(&[SizeId::new("m"), SizeId::new("s")]));
        assert!(index.by_size(Some(&"s".into())).is_empty());
        assert_eq!(
            index.exact(None, Some(&"m".into())).map(|v| v.id.as_str()),
            Some("sock-m")
        );
    }

    #[test]
    fn test_duplicate_pair_keeps_first() {
        let product = Product::new("p", "P", 10.0)
            .with_dimensions(true, true)
            .with_variant(Variant::new("first", 1).with_color("red").with_size("s"))
            .with_variant(Variant::new("second", 9).with_color("red").with_size("s"));
        let index = VariantIndex::new(&product);

        assert_eq!(
            index
                .exact(Some(&"red".into()), Some(&"s".into()))
                .map(|v| v.id.as_str()),
            Some("first")
        );
    }

    #[test]
    fn test_variant_missing_declared_dimension_is_unselectable() {
        let product = Product::new("p", "P", 10.0)
            .with_dimensions(true, true)
            .with_variant(Variant::new("broken", 3).with_color("red"));
        let index = VariantIndex::new(&product);

        assert!(index.exact(Some(&"red".into()), Some(&"s".into())).is_none());
        assert!(index.colors().contains(&ColorId::new("red")));
    }
}
