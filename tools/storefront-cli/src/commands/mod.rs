//! CLI command implementations.

pub mod config;
pub mod listing;
pub mod quote;
pub mod reconcile;

use clap::{Args, Subcommand};

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Product ID.
    #[arg(short, long)]
    pub product: String,

    /// Selected color ID.
    #[arg(long)]
    pub color: Option<String>,

    /// Selected size ID.
    #[arg(long)]
    pub size: Option<String>,
}

/// Arguments for the listing command.
#[derive(Args)]
pub struct ListingArgs {
    /// Treat products without loaded variants as out of stock.
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// Treat products without loaded variants as available.
    #[arg(long)]
    pub lenient: bool,

    /// Ignore variant lists in the catalog, as a listing endpoint would.
    #[arg(long)]
    pub without_variants: bool,
}

/// Arguments for the reconcile command.
#[derive(Args)]
pub struct ReconcileArgs {
    /// Product ID.
    #[arg(short, long)]
    pub product: String,

    /// Variant ID, for products sold through variants.
    #[arg(long)]
    pub variant: Option<String>,

    /// Target quantity. 0 removes the line.
    #[arg(short, long)]
    pub quantity: u32,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
