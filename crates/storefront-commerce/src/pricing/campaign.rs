//! Promotional campaign types.

use crate::ids::CampaignId;
use crate::numeric::lenient;
use serde::{Deserialize, Serialize};

/// Kind of discount a campaign grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CampaignType {
    /// Percentage off the base price, optionally capped.
    Percentage,
    /// Fixed amount off the base price.
    Fixed,
    /// Any type this engine does not understand. Priced as no discount.
    #[default]
    #[serde(other)]
    Unknown,
}

impl CampaignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::Percentage => "percentage",
            CampaignType::Fixed => "fixed",
            CampaignType::Unknown => "unknown",
        }
    }
}

/// A promotional campaign attached to a product.
///
/// The activity window is evaluated by whoever fetches the product; a
/// campaign handed to the pricing engine is assumed to be running.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Campaign identifier, when the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CampaignId>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Type of discount.
    #[serde(rename = "type", default)]
    pub campaign_type: CampaignType,
    /// Percentage (0-100, not enforced) or fixed amount.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub discount_value: f64,
    /// Upper bound on the discount of a percentage campaign.
    #[serde(
        default,
        deserialize_with = "lenient::optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_discount_amount: Option<f64>,
    /// Start of the activity window (Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<i64>,
    /// End of the activity window (Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<i64>,
}

impl Campaign {
    /// Create a percentage-off campaign.
    pub fn percentage(percent: f64) -> Self {
        Self::with_type(CampaignType::Percentage, percent)
    }

    /// Create a fixed-amount-off campaign.
    pub fn fixed(amount: f64) -> Self {
        Self::with_type(CampaignType::Fixed, amount)
    }

    fn with_type(campaign_type: CampaignType, discount_value: f64) -> Self {
        Self {
            id: None,
            name: None,
            campaign_type,
            discount_value,
            max_discount_amount: None,
            starts_at: None,
            ends_at: None,
        }
    }

    /// Cap the discount of a percentage campaign.
    pub fn with_max_discount(mut self, amount: f64) -> Self {
        self.max_discount_amount = Some(amount);
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the activity window.
    pub fn with_window(mut self, starts_at: Option<i64>, ends_at: Option<i64>) -> Self {
        self.starts_at = starts_at;
        self.ends_at = ends_at;
        self
    }

    /// The effective discount cap.
    ///
    /// Only percentage campaigns are capped, and a zero or non-finite cap
    /// counts as unset.
    pub fn discount_cap(&self) -> Option<f64> {
        if self.campaign_type != CampaignType::Percentage {
            return None;
        }
        self.max_discount_amount
            .filter(|cap| cap.is_finite() && *cap > 0.0)
    }

    /// Whether the activity window contains `now` (Unix timestamp).
    ///
    /// For catalog collaborators that filter campaigns before handing a
    /// product to the engine. Pricing never calls this.
    pub fn is_active_at(&self, now: i64) -> bool {
        if let Some(starts) = self.starts_at {
            if now < starts {
                return false;
            }
        }

        if let Some(ends) = self.ends_at {
            if now > ends {
                return false;
            }
        }

        true
    }
}
