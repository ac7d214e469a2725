//! In-memory view of the products a catalog service returned.

use crate::catalog::{AvailabilityMode, AvailabilityResolver, Product, StockSnapshot, Variant};
use crate::error::CommerceError;
use crate::ids::{ProductId, VariantId};
use crate::pricing::{price_product, PriceBreakdown};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A batch of products fetched from the catalog service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog service payload: `[...]` or `{"products": [...]}`.
    ///
    /// Errors name the offending product by position and id.
    pub fn from_json_str(json: &str) -> Result<Self, CommerceError> {
        let items = match serde_json::from_str::<Value>(json)? {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("products") {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(CommerceError::Serialization(format!(
                        "`products` must be an array, found {}",
                        value_kind(&other)
                    )))
                }
                None => {
                    return Err(CommerceError::Serialization(
                        "object payload has no `products` key".to_string(),
                    ))
                }
            },
            other => {
                return Err(CommerceError::Serialization(format!(
                    "expected a product array or an object with `products`, found {}",
                    value_kind(&other)
                )))
            }
        };

        let products = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let id = item.get("id").map(Value::to_string);
                serde_json::from_value::<Product>(item).map_err(|e| {
                    let at = match id {
                        Some(id) => format!("products[{}] (id {})", index, id),
                        None => format!("products[{}]", index),
                    };
                    CommerceError::Serialization(format!("{}: {}", at, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { products })
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Look up a variant of a product.
    pub fn variant(
        &self,
        product_id: &ProductId,
        variant_id: &VariantId,
    ) -> Result<&Variant, CommerceError> {
        self.get(product_id)?
            .variants
            .iter()
            .find(|v| &v.id == variant_id)
            .ok_or_else(|| CommerceError::VariantNotFound(variant_id.to_string()))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Listing rows: base price with campaign, and the coarse stock check.
    ///
    /// Variant lists are considered loaded when the product carries any;
    /// an empty list on a product with dimensions counts as not yet loaded.
    pub fn listing(&self, mode: AvailabilityMode) -> Vec<ListingEntry> {
        let resolver = AvailabilityResolver::new();
        self.products
            .iter()
            .map(|product| {
                let snapshot = if product.variants.is_empty() {
                    StockSnapshot::without_variants(product)
                } else {
                    StockSnapshot::from_product(product)
                };
                ListingEntry {
                    id: product.id.clone(),
                    title: product.title.clone(),
                    price: price_product(product, None),
                    out_of_stock: resolver.is_out_of_stock(&snapshot, mode),
                }
            })
            .collect()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One row of a product listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub id: ProductId,
    pub title: String,
    pub price: PriceBreakdown,
    pub out_of_stock: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "products": [
            {"id": "pen", "title": "Pen", "basePrice": 30, "baseStock": 0},
            {"id": "tee", "title": "Tee", "basePrice": 200, "hasColors": true,
             "campaigns": [{"type": "percentage", "discountValue": 10}]},
            {"id": "cap", "title": "Cap", "basePrice": 80, "hasSizes": true,
             "variants": [{"id": "cap-m", "sizeId": "m", "stock": 0}]}
        ]
    }"#;

    #[test]
    fn test_parse_wrapped_and_bare() {
        let catalog = Catalog::from_json_str(PAYLOAD).unwrap();
        assert_eq!(catalog.len(), 3);

        let bare = Catalog::from_json_str(r#"[{"id": "x"}]"#).unwrap();
        assert_eq!(bare.len(), 1);
        assert_eq!(bare.products[0].base_price, 0.0);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Catalog::from_json_str("{not json"),
            Err(CommerceError::Serialization(_))
        ));
        assert!(matches!(
            Catalog::from_json_str(r#"{"items": []}"#),
            Err(CommerceError::Serialization(msg)) if msg.contains("`products`")
        ));
        assert!(matches!(
            Catalog::from_json_str("42"),
            Err(CommerceError::Serialization(msg)) if msg.contains("a number")
        ));
    }

    #[test]
    fn test_parse_error_names_product_and_field() {
        let err = Catalog::from_json_str(
            r#"[{"id": "ok", "title": "Fine"}, {"title": "No id"}]"#,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("products[1]"), "{msg}");
        assert!(msg.contains("missing field `id`"), "{msg}");

        let err = Catalog::from_json_str(
            r#"{"products": [{"id": "tee", "hasColors": "yes"}]}"#,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(r#"products[0] (id "tee")"#), "{msg}");
        assert!(msg.contains("expected a boolean"), "{msg}");
    }

    #[test]
    fn test_parse_integer_ids() {
        let catalog = Catalog::from_json_str(
            r#"[{"id": 12, "title": "Tee", "basePrice": 100, "hasColors": true,
                 "variants": [{"id": 7, "colorId": 3, "stock": 2}]}]"#,
        )
        .unwrap();
        let product = catalog.get(&ProductId::new("12")).unwrap();
        let variant = catalog.variant(&product.id, &VariantId::new("7")).unwrap();
        assert_eq!(variant.color_id.as_ref().map(|c| c.as_str()), Some("3"));
        assert_eq!(variant.stock, 2);
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::from_json_str(PAYLOAD).unwrap();
        assert_eq!(catalog.get(&ProductId::new("tee")).unwrap().title, "Tee");
        assert!(matches!(
            catalog.get(&ProductId::new("nope")),
            Err(CommerceError::ProductNotFound(id)) if id == "nope"
        ));

        let cap = ProductId::new("cap");
        assert_eq!(catalog.variant(&cap, &VariantId::new("cap-m")).unwrap().stock, 0);
        assert!(matches!(
            catalog.variant(&cap, &VariantId::new("cap-xl")),
            Err(CommerceError::VariantNotFound(_))
        ));
    }

    #[test]
    fn test_listing_modes() {
        let catalog = Catalog::from_json_str(PAYLOAD).unwrap();

        let lenient = catalog.listing(AvailabilityMode::Lenient);
        assert!(lenient[0].out_of_stock);
        assert!(!lenient[1].out_of_stock);
        assert!(lenient[2].out_of_stock);
        assert_eq!(lenient[1].price.final_price, 180.0);

        let strict = catalog.listing(AvailabilityMode::Strict);
        assert!(strict[1].out_of_stock);
    }
}
