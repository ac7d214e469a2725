//! Cart line reconciliation.

use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use storefront_commerce::cart::{CartLineKey, CartQuantityReconciler, ReconcileOutcome};
use storefront_commerce::ids::{ProductId, VariantId};
use storefront_commerce::notify::{BroadcastBus, StorefrontEvent, ToastKind};

use super::ReconcileArgs;
use crate::context::Context;

/// Run the reconcile command.
pub async fn run(args: ReconcileArgs, ctx: &Context) -> Result<()> {
    let key = CartLineKey {
        product_id: ProductId::new(args.product),
        variant_id: args.variant.map(VariantId::new),
    };

    if args.quantity > 0 {
        check_line(&key, ctx).await?;
    }

    match removal_check(args.quantity, args.yes, ctx.output.is_json()) {
        RemovalCheck::Proceed => {}
        RemovalCheck::Prompt => {
            let confirmed = Confirm::new()
                .with_prompt(format!("Remove {} from the cart?", key))
                .default(false)
                .interact()?;

            if !confirmed {
                ctx.output.info("Cancelled");
                return Ok(());
            }
        }
        RemovalCheck::Refuse => {
            bail!("Removing {} without a prompt requires --yes", key)
        }
    }

    let cart = ctx.cart_service();
    let cart_file = cart.clone();
    ctx.output
        .debug(&format!("Using cart file: {}", cart.path().display()));

    let bus = Arc::new(BroadcastBus::default());
    let mut events = bus.subscribe();
    let reconciler =
        CartQuantityReconciler::new(cart, bus, ctx.config.storefront.reconciler.clone());

    let spinner = ctx.output.spinner(&format!("Updating {}...", key));
    let result = reconciler.reconcile(&key, args.quantity).await;
    spinner.finish_and_clear();

    // Only toasts are shown; cart-changed is implied by the outcome.
    while let Ok(event) = events.try_recv() {
        if let StorefrontEvent::ToastRequested { kind, message } = event {
            match kind {
                ToastKind::Error | ToastKind::Warning => ctx.output.warn(&message),
                ToastKind::Success => ctx.output.success(&message),
                ToastKind::Info => ctx.output.info(&message),
            }
        }
    }

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            if err.requires_resync() {
                // Report the authoritative quantity after a partial failure.
                match reconciler.current_quantity(&key).await {
                    Ok(quantity) => ctx
                        .output
                        .warn(&format!("Cart now holds {} of {}", quantity, key)),
                    Err(e) => ctx.output.warn(&format!("Could not re-read cart: {}", e)),
                }
            }
            return Err(err).with_context(|| format!("Failed to set {} to {}", key, args.quantity));
        }
    };

    if ctx.output.is_json() {
        let updated_at = cart_file.updated_at().await?;
        ctx.output.json(&serde_json::json!({
            "line": key,
            "outcome": outcome_name(&outcome),
            "quantity": outcome.quantity(),
            "updatedAt": updated_at,
        }));
        return Ok(());
    }

    match outcome {
        ReconcileOutcome::Added { quantity } => {
            ctx.output.success(&format!("Added {} x {}", quantity, key))
        }
        ReconcileOutcome::Replaced { previous, quantity } => ctx
            .output
            .success(&format!("Updated {}: {} -> {}", key, previous, quantity)),
        ReconcileOutcome::Removed { previous } => ctx
            .output
            .success(&format!("Removed {} (had {})", key, previous)),
        ReconcileOutcome::Unchanged => ctx.output.info(&format!("{} is not in the cart", key)),
    }

    let quantity = reconciler.current_quantity(&key).await?;
    if quantity != outcome.quantity() {
        bail!(
            "Cart holds {} of {} after reconciling to {}",
            quantity,
            key,
            outcome.quantity()
        );
    }

    Ok(())
}

/// Make sure a line being added names something the catalog sells.
async fn check_line(key: &CartLineKey, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog().await?;
    let product = catalog.get(&key.product_id)?;

    match &key.variant_id {
        Some(variant_id) => {
            let variant = catalog.variant(&key.product_id, variant_id)?;
            ctx.output.debug(&format!(
                "{} {} has {} in stock",
                product.title,
                variant.build_name(),
                variant.stock
            ));
        }
        None if product.has_dimensions() => {
            bail!("{} is sold by variant; pass --variant", product.id)
        }
        None => {}
    }

    Ok(())
}

/// How a reconcile is cleared to proceed.
#[derive(Debug, PartialEq, Eq)]
enum RemovalCheck {
    Proceed,
    Prompt,
    /// No prompt is possible and the removal was not pre-approved.
    Refuse,
}

fn removal_check(quantity: u32, yes: bool, json: bool) -> RemovalCheck {
    match (quantity, yes, json) {
        (0, false, true) => RemovalCheck::Refuse,
        (0, false, false) => RemovalCheck::Prompt,
        _ => RemovalCheck::Proceed,
    }
}

fn outcome_name(outcome: &ReconcileOutcome) -> &'static str {
    match outcome {
        ReconcileOutcome::Added { .. } => "added",
        ReconcileOutcome::Replaced { .. } => "replaced",
        ReconcileOutcome::Removed { .. } => "removed",
        ReconcileOutcome::Unchanged => "unchanged",
    }
}
