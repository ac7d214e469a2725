//! Promotional pricing.
//!
//! Contains campaign types and the single-campaign price calculation.

mod campaign;
mod engine;

pub use campaign::{Campaign, CampaignType};
pub use engine::{price, price_product, price_value, PriceBreakdown};
