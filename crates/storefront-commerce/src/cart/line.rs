//! Cart line types as seen through the cart service.

use crate::ids::{ProductId, VariantId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a cart line: a product, plus the variant for products sold
/// through variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineKey {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
}

impl CartLineKey {
    /// Key for a product without variants.
    pub fn product(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: product_id.into(),
            variant_id: None,
        }
    }

    /// Key for a specific variant.
    pub fn variant(product_id: impl Into<ProductId>, variant_id: impl Into<VariantId>) -> Self {
        Self {
            product_id: product_id.into(),
            variant_id: Some(variant_id.into()),
        }
    }
}

impl fmt::Display for CartLineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant_id {
            Some(variant) => write!(f, "{}/{}", self.product_id, variant),
            None => write!(f, "{}", self.product_id),
        }
    }
}

/// A line in the cart. Lines with quantity 0 do not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub key: CartLineKey,
    pub quantity: u32,
}

/// The authoritative cart as last read from the cart service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    #[serde(default)]
    pub lines: Vec<CartLine>,
}

impl CartSnapshot {
    /// Find a line by key.
    pub fn find(&self, key: &CartLineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.key == key)
    }

    /// Quantity of a line, 0 when absent.
    pub fn quantity_of(&self, key: &CartLineKey) -> u32 {
        self.find(key).map(|line| line.quantity).unwrap_or(0)
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Increase a line's quantity, creating it if needed.
    ///
    /// Returns the new quantity. Adding zero is a no-op.
    pub fn add(&mut self, key: &CartLineKey, quantity: u32) -> u32 {
        if quantity == 0 {
            return self.quantity_of(key);
        }
        if let Some(line) = self.lines.iter_mut().find(|line| &line.key == key) {
            line.quantity = line.quantity.saturating_add(quantity);
            return line.quantity;
        }
        self.lines.push(CartLine {
            key: key.clone(),
            quantity,
        });
        quantity
    }

    /// Remove a line. Returns whether it existed.
    pub fn remove(&mut self, key: &CartLineKey) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|line| &line.key != key);
        self.lines.len() < len_before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(CartLineKey::product("pen").to_string(), "pen");
        assert_eq!(CartLineKey::variant("tee", "tee-red-m").to_string(), "tee/tee-red-m");
    }

    #[test]
    fn test_add_and_remove() {
        let mut cart = CartSnapshot::default();
        let key = CartLineKey::variant("tee", "v1");

        assert_eq!(cart.add(&key, 2), 2);
        assert_eq!(cart.add(&key, 3), 5);
        assert_eq!(cart.add(&CartLineKey::product("pen"), 1), 1);
        assert_eq!(cart.item_count(), 6);
        assert_eq!(cart.lines.len(), 2);

        assert!(cart.remove(&key));
        assert!(!cart.remove(&key));
        assert_eq!(cart.quantity_of(&key), 0);
    }

    #[test]
    fn test_add_zero_does_not_create_line() {
        let mut cart = CartSnapshot::default();
        assert_eq!(cart.add(&CartLineKey::product("pen"), 0), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_variant_and_product_keys_differ() {
        let mut cart = CartSnapshot::default();
        cart.add(&CartLineKey::product("tee"), 1);
        assert!(cart.find(&CartLineKey::variant("tee", "v1")).is_none());
    }

    #[test]
    fn test_line_wire_format() {
        let line = CartLine {
            key: CartLineKey::variant("tee", "v1"),
            quantity: 2,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"productId": "tee", "variantId": "v1", "quantity": 2})
        );
        let back: CartLine = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);
    }
}
