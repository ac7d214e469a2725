//! Product and variant types.

use crate::ids::{ColorId, ProductId, SizeId, VariantId};
use crate::numeric::lenient;
use crate::pricing::Campaign;
use serde::{Deserialize, Serialize};

/// Which selection dimensions a product declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    pub colors: bool,
    pub sizes: bool,
}

impl Dimensions {
    /// Check if at least one dimension is declared.
    pub fn any(&self) -> bool {
        self.colors || self.sizes
    }
}

/// A product as handed over by the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    #[serde(default)]
    pub title: String,
    /// Base selling price.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub base_price: f64,
    /// Stock of a product without variant dimensions.
    #[serde(default, deserialize_with = "lenient::count")]
    pub base_stock: u32,
    /// Whether variants are distinguished by color.
    #[serde(default)]
    pub has_colors: bool,
    /// Whether variants are distinguished by size.
    #[serde(default)]
    pub has_sizes: bool,
    /// Sellable variants.
    #[serde(default)]
    pub variants: Vec<Variant>,
    /// Campaigns, highest priority first.
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    /// Aggregate stock reported by listing endpoints.
    #[serde(
        default,
        deserialize_with = "lenient::optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_stock: Option<u32>,
}

impl Product {
    /// Create a product without variant dimensions.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, base_price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            base_price,
            base_stock: 0,
            has_colors: false,
            has_sizes: false,
            variants: Vec::new(),
            campaigns: Vec::new(),
            total_stock: None,
        }
    }

    /// Declare the color and size dimensions.
    pub fn with_dimensions(mut self, colors: bool, sizes: bool) -> Self {
        self.has_colors = colors;
        self.has_sizes = sizes;
        self
    }

    /// Set the stock used when the product has no dimensions.
    pub fn with_base_stock(mut self, stock: u32) -> Self {
        self.base_stock = stock;
        self
    }

    /// Add a variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Add a campaign at the lowest priority.
    pub fn with_campaign(mut self, campaign: Campaign) -> Self {
        self.campaigns.push(campaign);
        self
    }

    /// Declared selection dimensions.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            colors: self.has_colors,
            sizes: self.has_sizes,
        }
    }

    /// Check if the product is sold through variants.
    pub fn has_dimensions(&self) -> bool {
        self.dimensions().any()
    }

    /// The campaign used for pricing.
    ///
    /// The list is taken in the order the catalog delivered it and the first
    /// entry wins; it is not re-ranked by discount size.
    pub fn active_campaign(&self) -> Option<&Campaign> {
        self.campaigns.first()
    }
}

/// A sellable color/size combination of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Unique variant identifier.
    pub id: VariantId,
    /// Color, set when the product declares colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_id: Option<ColorId>,
    /// Size, set when the product declares sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_id: Option<SizeId>,
    /// Units in stock.
    #[serde(default, deserialize_with = "lenient::count")]
    pub stock: u32,
    /// Price override. Absent or zero means the product base price.
    #[serde(
        default,
        deserialize_with = "lenient::optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
}

impl Variant {
    /// Create a variant with no dimension values.
    pub fn new(id: impl Into<VariantId>, stock: u32) -> Self {
        Self {
            id: id.into(),
            color_id: None,
            size_id: None,
            stock,
            price: None,
        }
    }

    /// Set the color.
    pub fn with_color(mut self, color: impl Into<ColorId>) -> Self {
        self.color_id = Some(color.into());
        self
    }

    /// Set the size.
    pub fn with_size(mut self, size: impl Into<SizeId>) -> Self {
        self.size_id = Some(size.into());
        self
    }

    /// Set a price override.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// The override price, if it is usable.
    pub fn price_override(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite() && *p != 0.0)
    }

    /// Check if this variant is in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Build a display label from the dimension values.
    pub fn build_name(&self) -> String {
        let parts: Vec<&str> = [
            self.color_id.as_ref().map(|c| c.as_str()),
            self.size_id.as_ref().map(|s| s.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            "Default".to_string()
        } else {
            parts.join(" / ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_from_catalog_json() {
        let product: Product = serde_json::from_value(json!({
            "id": "tee",
            "title": "Basic Tee",
            "basePrice": "249.90",
            "hasColors": true,
            "hasSizes": true,
            "variants": [
                {"id": "tee-red-s", "colorId": "red", "sizeId": "s", "stock": "4"},
                {"id": "tee-red-m", "colorId": "red", "sizeId": "m", "stock": 0, "price": 0}
            ],
            "campaigns": [{"type": "fixed", "discountValue": 50}]
        }))
        .unwrap();

        assert_eq!(product.base_price, 249.9);
        assert_eq!(product.base_stock, 0);
        assert!(product.has_dimensions());
        assert_eq!(product.variants[0].stock, 4);
        assert_eq!(product.variants[1].price_override(), None);
        assert_eq!(product.total_stock, None);
        assert!(product.active_campaign().is_some());
    }

    #[test]
    fn test_first_campaign_wins() {
        let product = Product::new("p", "P", 100.0)
            .with_campaign(Campaign::percentage(5.0).with_name("first"))
            .with_campaign(Campaign::percentage(50.0).with_name("second"));

        assert_eq!(
            product.active_campaign().and_then(|c| c.name.as_deref()),
            Some("first")
        );
    }

    #[test]
    fn test_price_override() {
        assert_eq!(Variant::new("v", 1).with_price(120.0).price_override(), Some(120.0));
        assert_eq!(Variant::new("v", 1).with_price(0.0).price_override(), None);
        assert_eq!(Variant::new("v", 1).price_override(), None);
    }

    #[test]
    fn test_variant_name() {
        let variant = Variant::new("v", 1).with_color("blue").with_size("l");
        assert_eq!(variant.build_name(), "blue / l");
        assert_eq!(Variant::new("v", 1).build_name(), "Default");
    }
}
