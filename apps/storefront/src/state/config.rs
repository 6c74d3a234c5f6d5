//! # Configuration State
//!
//! Configuration and the menu categories, fixed at startup.

use fastfood_client::StorefrontConfig;
use fastfood_core::{default_categories, Category};

#[derive(Debug, Clone)]
pub struct ConfigState {
    config: StorefrontConfig,
    categories: Vec<Category>,
}

impl ConfigState {
    /// Uses the default two-category menu.
    pub fn new(config: StorefrontConfig) -> Self {
        ConfigState {
            config,
            categories: default_categories(),
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn currency_symbol(&self) -> &str {
        self.config.currency_symbol()
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        Self::new(StorefrontConfig::default())
    }
}
