//! Quote a product selection.

use anyhow::Result;
use storefront_commerce::catalog::{AvailabilityResolver, Selection};
use storefront_commerce::ids::ProductId;
use storefront_commerce::quote::quote;

use super::QuoteArgs;
use crate::context::Context;
use crate::output::{format_price, stock_badge};

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog().await?;
    let product = catalog.get(&ProductId::new(args.product))?;

    let mut selection = Selection::none();
    if let Some(color) = args.color {
        selection = selection.with_color(color);
    }
    if let Some(size) = args.size {
        selection = selection.with_size(size);
    }

    let result = quote(product, &selection);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "productId": product.id,
            "selection": selection,
            "quote": result,
        }));
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("price", &format_price(&result.price));
    if let Some(campaign) = result.campaign {
        let label = campaign.name.as_deref().unwrap_or(campaign.campaign_type.as_str());
        ctx.output.kv("campaign", label);
    }

    if product.has_dimensions() {
        let resolver = AvailabilityResolver::new();
        let colors: Vec<String> = resolver
            .list_colors(product, &selection)
            .into_iter()
            .map(|c| c.into_inner())
            .collect();
        let sizes: Vec<String> = resolver
            .list_sizes(product, &selection)
            .into_iter()
            .map(|s| s.into_inner())
            .collect();
        if product.has_colors {
            ctx.output.kv("colors", &colors.join(", "));
        }
        if product.has_sizes {
            ctx.output.kv("sizes", &sizes.join(", "));
        }

        match result.variant {
            Some(variant) => ctx
                .output
                .kv("variant", &format!("{} ({})", variant.id, variant.build_name())),
            None => ctx.output.warn("Selection does not name a variant yet"),
        }
    }

    ctx.output.kv(
        "stock",
        &format!("{} {}", result.stock, stock_badge(!result.can_purchase())),
    );

    Ok(())
}
