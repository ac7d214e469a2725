//! Product listing.

use anyhow::Result;
use storefront_commerce::catalog::{AvailabilityMode, Catalog};

use super::ListingArgs;
use crate::context::Context;
use crate::output::{format_price, stock_badge};

/// Run the listing command.
pub async fn run(args: ListingArgs, ctx: &Context) -> Result<()> {
    let mode = if args.strict {
        AvailabilityMode::Strict
    } else if args.lenient {
        AvailabilityMode::Lenient
    } else {
        ctx.config.storefront.availability.listing_mode
    };

    let mut catalog = ctx.load_catalog().await?;
    if args.without_variants {
        catalog = strip_variants(catalog);
    }

    let entries = catalog.listing(mode);

    if ctx.output.is_json() {
        ctx.output.json(&entries);
        return Ok(());
    }

    ctx.output
        .header(&format!("Listing ({} products, {} mode)", entries.len(), mode.as_str()));

    let widths = [16, 28, 12, 0];
    ctx.output.table_row(&["ID", "TITLE", "STOCK", "PRICE"], &widths);
    for entry in &entries {
        let stock = stock_badge(entry.out_of_stock);
        let price = format_price(&entry.price);
        ctx.output.table_row(
            &[entry.id.as_str(), entry.title.as_str(), stock.as_str(), price.as_str()],
            &widths,
        );
    }

    Ok(())
}

fn strip_variants(mut catalog: Catalog) -> Catalog {
    for product in &mut catalog.products {
        product.variants.clear();
    }
    catalog
}
