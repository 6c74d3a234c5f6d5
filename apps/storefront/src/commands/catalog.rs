//! # Catalog Commands
//!
//! The menu: every category heading with the products filed under it.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Burgers (burger.jpg)                    │
//! │    [1] Cheeseburger - 5.50€              │
//! │    [2] Double - 7€                       │
//! │  Pizzas (pizza.jpg)                      │
//! │    (nothing here)                        │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Headings are always printed, even while the catalog is still loading.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::state::ConfigState;
use fastfood_client::CatalogLoader;
use fastfood_core::{product_line, ProductGroup};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuView {
    pub groups: Vec<ProductGroup>,
    pub catalog_status: String,
    #[serde(skip)]
    currency_symbol: String,
}

impl fmt::Display for MenuView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            match &group.category.image {
                Some(image) => writeln!(f, "{} ({})", group.category.name, image)?,
                None => writeln!(f, "{}", group.category.name)?,
            }
            if group.is_empty() {
                writeln!(f, "  (nothing here)")?;
            }
            for product in &group.products {
                writeln!(f, "  [{}] {}", product.id, product_line(product, &self.currency_symbol))?;
            }
        }
        write!(f, "catalog: {}", self.catalog_status)
    }
}

/// Groups whatever the catalog currently holds under the menu categories.
pub fn get_menu(catalog: &CatalogLoader, config: &ConfigState) -> MenuView {
    debug!("get_menu command");
    MenuView {
        groups: catalog.groups(config.categories()),
        catalog_status: catalog.status().label(),
        currency_symbol: config.currency_symbol().to_string(),
    }
}
