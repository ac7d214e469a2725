//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::config::StorefrontConfig;

/// File names searched for, in order, when no `--config` is given.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cart storage.
    #[serde(default)]
    pub cart: CartConfig,

    /// Engine settings (`[availability]`, `[reconciler]`).
    #[serde(flatten)]
    pub storefront: StorefrontConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config content, choosing the format by file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Render config in the format implied by `path`.
    pub fn render(&self, path: &str) -> Result<String> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        Ok(content)
    }
}

/// Catalog source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a catalog JSON export.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "catalog.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Cart storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Path to the JSON file holding the local cart.
    #[serde(default = "default_cart_path")]
    pub path: String,
}

fn default_cart_path() -> String {
    ".storefront/cart.json".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            path: default_cart_path(),
        }
    }
}

/// Contents of a fresh config file holding the defaults.
pub fn default_config_file(path: &str) -> Result<String> {
    let body = CliConfig::default().render(path)?;
    if path.ends_with(".json") {
        Ok(body)
    } else {
        Ok(format!("# Storefront CLI configuration\n\n{}", body))
    }
}
