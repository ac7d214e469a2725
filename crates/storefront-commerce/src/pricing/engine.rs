//! Campaign price calculation.

use crate::catalog::{effective_price, Product, Variant};
use crate::numeric::{finite_or, to_number};
use crate::pricing::{Campaign, CampaignType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Customer-facing price for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Price the customer pays.
    pub final_price: f64,
    /// "Was" price; only set when a campaign applied.
    pub original_price: Option<f64>,
    /// `original - final`, or 0 without a campaign.
    pub discount_amount: f64,
}

impl PriceBreakdown {
    fn undiscounted(base: f64) -> Self {
        Self {
            final_price: base,
            original_price: None,
            discount_amount: 0.0,
        }
    }

    /// Check if the customer saves anything.
    pub fn has_discount(&self) -> bool {
        self.discount_amount > 0.0
    }

    /// Get discount percentage of the original price.
    pub fn discount_percentage(&self) -> f64 {
        match self.original_price {
            Some(original) if original > 0.0 => (self.discount_amount / original) * 100.0,
            _ => 0.0,
        }
    }
}

/// Apply `campaign` to `base_price`.
///
/// Non-finite and negative base prices are treated as 0. Campaigns of an
/// unknown type price as if no campaign were given.
pub fn price(base_price: f64, campaign: Option<&Campaign>) -> PriceBreakdown {
    let safe_base = finite_or(base_price, 0.0).max(0.0);

    let Some(campaign) = campaign else {
        return PriceBreakdown::undiscounted(safe_base);
    };

    let final_price = match campaign.campaign_type {
        CampaignType::Percentage => percentage_price(safe_base, campaign),
        CampaignType::Fixed => {
            let amount = finite_or(campaign.discount_value, 0.0).max(0.0);
            (safe_base - amount).max(0.0)
        }
        CampaignType::Unknown => {
            tracing::debug!(
                campaign = ?campaign.id,
                "unknown campaign type, pricing without discount"
            );
            return PriceBreakdown::undiscounted(safe_base);
        }
    };

    PriceBreakdown {
        final_price,
        original_price: Some(safe_base),
        discount_amount: safe_base - final_price,
    }
}

/// [`price`] for a raw catalog value.
pub fn price_value(base_price: &Value, campaign: Option<&Campaign>) -> PriceBreakdown {
    price(to_number(base_price, 0.0), campaign)
}

/// Price a product (or one of its variants) with its active campaign.
pub fn price_product(product: &Product, variant: Option<&Variant>) -> PriceBreakdown {
    price(effective_price(product, variant), product.active_campaign())
}

fn percentage_price(safe_base: f64, campaign: &Campaign) -> f64 {
    let percent = finite_or(campaign.discount_value, 0.0).max(0.0);
    let raw = (safe_base * (1.0 - percent / 100.0)).round();

    // Rounding a fractional base up must not produce a surcharge.
    let mut final_price = raw.max(0.0).min(safe_base);

    if let Some(cap) = campaign.discount_cap() {
        if safe_base - final_price > cap {
            final_price = (safe_base - cap).max(0.0);
        }
    }

    final_price
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_no_campaign() {
        let p = price(100000.0, None);
        assert_eq!(
            p,
            PriceBreakdown {
                final_price: 100000.0,
                original_price: None,
                discount_amount: 0.0,
            }
        );
        assert!(!p.has_discount());
    }

    #[test]
    fn test_percentage_discount() {
        let p = price(100000.0, Some(&Campaign::percentage(20.0)));
        assert_eq!(p.final_price, 80000.0);
        assert_eq!(p.original_price, Some(100000.0));
        assert_eq!(p.discount_amount, 20000.0);
        assert!((p.discount_percentage() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_cap_wins() {
        let campaign = Campaign::percentage(50.0).with_max_discount(10000.0);
        let p = price(100000.0, Some(&campaign));
        assert_eq!(p.final_price, 90000.0);
        assert_eq!(p.discount_amount, 10000.0);
    }

    #[test]
    fn test_cap_not_reached() {
        let campaign = Campaign::percentage(5.0).with_max_discount(10000.0);
        let p = price(100000.0, Some(&campaign));
        assert_eq!(p.final_price, 95000.0);
    }

    #[test]
    fn test_percentage_rounds_to_whole_units() {
        let p = price(999.0, Some(&Campaign::percentage(15.0)));
        // 999 * 0.85 = 849.15
        assert_eq!(p.final_price, 849.0);
        assert_eq!(p.discount_amount, 150.0);
    }

    #[test]
    fn test_percentage_over_hundred_floors_at_zero() {
        let p = price(1000.0, Some(&Campaign::percentage(150.0)));
        assert_eq!(p.final_price, 0.0);
        assert_eq!(p.discount_amount, 1000.0);
    }

    #[test]
    fn test_fixed_never_negative() {
        let p = price(5000.0, Some(&Campaign::fixed(10000.0)));
        assert_eq!(p.final_price, 0.0);
        assert_eq!(p.discount_amount, 5000.0);
        assert_eq!(p.original_price, Some(5000.0));
    }

    #[test]
    fn test_fixed_ignores_cap() {
        let campaign = Campaign::fixed(3000.0).with_max_discount(100.0);
        let p = price(5000.0, Some(&campaign));
        assert_eq!(p.final_price, 2000.0);
    }

    #[test]
    fn test_unknown_type_is_no_discount() {
        let mut campaign = Campaign::percentage(50.0);
        campaign.campaign_type = CampaignType::Unknown;
        let p = price(1000.0, Some(&campaign));
        assert_eq!(p, price(1000.0, None));
    }

    #[test]
    fn test_unsafe_base_prices() {
        assert_eq!(price(-50.0, None).final_price, 0.0);
        assert_eq!(price(f64::NAN, None).final_price, 0.0);
        assert_eq!(price(f64::INFINITY, Some(&Campaign::fixed(1.0))).final_price, 0.0);
        assert_eq!(price_value(&json!("2500"), None).final_price, 2500.0);
        assert_eq!(price_value(&json!(null), None).final_price, 0.0);
        assert_eq!(price_value(&json!("free"), None).final_price, 0.0);
    }

    #[test]
    fn test_fractional_base_never_surcharges() {
        let p = price(99.5, Some(&Campaign::percentage(0.0)));
        assert_eq!(p.final_price, 99.5);
        assert_eq!(p.discount_amount, 0.0);
    }

    #[test]
    fn test_price_is_repeatable() {
        let campaign = Campaign::percentage(33.0).with_max_discount(120.0);
        assert_eq!(price(777.0, Some(&campaign)), price(777.0, Some(&campaign)));
    }

    fn any_campaign() -> impl Strategy<Value = Campaign> {
        (
            prop_oneof![
                Just(CampaignType::Percentage),
                Just(CampaignType::Fixed),
                Just(CampaignType::Unknown),
            ],
            0.0f64..250.0,
            proptest::option::of(0.0f64..100_000.0),
        )
            .prop_map(|(campaign_type, value, cap)| {
                let mut campaign = Campaign::percentage(value);
                campaign.campaign_type = campaign_type;
                campaign.max_discount_amount = cap;
                campaign
            })
    }

    proptest! {
        #[test]
        fn final_price_is_bounded(base in 0.0f64..10_000_000.0, campaign in any_campaign()) {
            let p = price(base, Some(&campaign));
            prop_assert!(p.final_price >= 0.0);
            prop_assert!(p.discount_amount >= 0.0);
            if let Some(original) = p.original_price {
                prop_assert!(p.final_price <= original);
                prop_assert_eq!(original, base);
            }
        }

        #[test]
        fn cap_bounds_percentage_discount(
            base in 0.0f64..10_000_000.0,
            percent in 0.0f64..100.0,
            cap in 1.0f64..50_000.0,
        ) {
            let campaign = Campaign::percentage(percent).with_max_discount(cap);
            let p = price(base, Some(&campaign));
            prop_assert!(p.discount_amount <= cap + 1e-6);
        }
    }
}
