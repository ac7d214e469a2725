//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::default_config_file;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    match &ctx.config_path {
        Some(path) => ctx.output.kv("source", &path.display().to_string()),
        None => ctx.output.kv("source", "defaults (no config file found)"),
    }

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("path", &ctx.config.catalog.path);

    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output.kv("path", &ctx.config.cart.path);

    let engine = &ctx.config.storefront;
    ctx.output.info("");
    ctx.output.info("[availability]");
    ctx.output
        .kv("listing_mode", engine.availability.listing_mode.as_str());

    ctx.output.info("");
    ctx.output.info("[reconciler]");
    ctx.output
        .kv("failure_toasts", &engine.reconciler.failure_toasts.to_string());
    ctx.output
        .kv("success_toasts", &engine.reconciler.success_toasts.to_string());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = default_config_file(&config_path.to_string_lossy())?;
    fs::write(&config_path, content)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
