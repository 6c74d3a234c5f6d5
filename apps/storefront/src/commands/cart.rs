//! # Cart Commands
//!
//! Cart and user changes, all of them dispatched through the session store.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add <id>           ──► find in catalog ──► dispatch(AddToCart(snap))   │
//! │  user <email> [nm]  ──────────────────────► dispatch(SetUser(Some(u)))  │
//! │  user clear         ──────────────────────► dispatch(SetUser(None))     │
//! │  cart               ──────────────────────► snapshot (read only)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, StoreState};
use fastfood_client::CatalogLoader;
use fastfood_core::{find_product, Action, CartItem, Money, SessionState, User};

/// Cart contents with the running total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub total: Money,
    pub user: Option<User>,
    #[serde(skip)]
    currency_symbol: String,
}

impl CartResponse {
    fn from_state(state: &SessionState, currency_symbol: &str) -> Self {
        CartResponse {
            items: state.cart.clone(),
            total: state.cart.iter().map(|i| i.unit_price).sum(),
            user: state.user.clone(),
            currency_symbol: currency_symbol.to_string(),
        }
    }
}

impl fmt::Display for CartResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            writeln!(f, "cart is empty")?;
        }
        for (i, item) in self.items.iter().enumerate() {
            writeln!(
                f,
                "{:>3}. {} - {}",
                i + 1,
                item.name,
                item.unit_price.display_with(&self.currency_symbol)
            )?;
        }
        write!(
            f,
            "total: {} ({} item{})",
            self.total.display_with(&self.currency_symbol),
            self.items.len(),
            if self.items.len() == 1 { "" } else { "s" }
        )
    }
}

/// The signed-in user slot after a `user` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub user: Option<User>,
}

impl fmt::Display for UserResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.user {
            Some(User { email, name: Some(name) }) => write!(f, "user: {} <{}>", name, email),
            Some(User { email, name: None }) => write!(f, "user: {}", email),
            None => write!(f, "user: (none)"),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(store: &StoreState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    store.with_state(|s| CartResponse::from_state(s, config.currency_symbol()))
}

/// Appends a snapshot of the product to the cart.
///
/// The product must be in the loaded catalog; while the catalog is pending or
/// after it failed every id is unknown. Adding the same id twice adds two
/// entries.
pub fn add_to_cart(
    store: &StoreState,
    catalog: &CatalogLoader,
    config: &ConfigState,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let products = catalog.products();
    let product = find_product(&products, product_id)?;

    let state = store.dispatch(Action::AddToCart(CartItem::from_product(product)));
    Ok(CartResponse::from_state(&state, config.currency_symbol()))
}

/// Replaces the session user.
pub fn set_user(store: &StoreState, email: &str, name: Option<&str>) -> UserResponse {
    debug!(email = %email, "set_user command");

    let mut user = User::new(email);
    if let Some(name) = name {
        user = user.with_name(name);
    }
    let state = store.dispatch(Action::SetUser(Some(user)));
    UserResponse { user: state.user }
}

/// Clears the session user.
pub fn clear_user(store: &StoreState) -> UserResponse {
    debug!("clear_user command");
    let state = store.dispatch(Action::SetUser(None));
    UserResponse { user: state.user }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::{wait_loaded, FixedCatalog, NeverCatalog};
    use fastfood_core::Product;
    use std::sync::Arc;

    async fn loaded_catalog() -> CatalogLoader {
        let catalog = CatalogLoader::start(Arc::new(FixedCatalog(vec![
            Product::new(1, "Cheeseburger", "Burgers", Money::from_cents(550)),
            Product::new(2, "Reine", "Pizzas", Money::from_cents(900)),
        ])));
        wait_loaded(&catalog).await;
        catalog
    }

    #[tokio::test]
    async fn test_add_to_cart_appends_snapshots() {
        let store = StoreState::new();
        let catalog = loaded_catalog().await;
        let config = ConfigState::default();

        add_to_cart(&store, &catalog, &config, "1").unwrap();
        add_to_cart(&store, &catalog, &config, "2").unwrap();
        let cart = add_to_cart(&store, &catalog, &config, "1").unwrap();

        let names: Vec<&str> = cart.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Cheeseburger", "Reine", "Cheeseburger"]);
        assert_eq!(cart.total, Money::from_cents(2000));
        assert!(store.snapshot().orders.is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let store = StoreState::new();
        let catalog = loaded_catalog().await;

        let err = add_to_cart(&store, &catalog, &ConfigState::default(), "42").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(store.snapshot().cart.is_empty());
    }

    #[tokio::test]
    async fn test_add_while_catalog_pending() {
        let store = StoreState::new();
        let catalog = CatalogLoader::start(Arc::new(NeverCatalog));

        let err = add_to_cart(&store, &catalog, &ConfigState::default(), "1").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_cart_display() {
        let store = StoreState::new();
        let catalog = loaded_catalog().await;
        let config = ConfigState::default();

        assert_eq!(get_cart(&store, &config).to_string(), "cart is empty\ntotal: 0€ (0 items)");

        add_to_cart(&store, &catalog, &config, "1").unwrap();
        assert_eq!(
            get_cart(&store, &config).to_string(),
            "  1. Cheeseburger - 5.50€\ntotal: 5.50€ (1 item)"
        );
    }

    #[tokio::test]
    async fn test_huge_prices_cap_the_total() {
        let huge = Money::from_cents(5_000_000_000_000_000_000);
        let catalog = CatalogLoader::start(Arc::new(FixedCatalog(vec![Product::new(
            1, "Caviar", "Burgers", huge,
        )])));
        wait_loaded(&catalog).await;
        let store = StoreState::new();
        let config = ConfigState::default();

        add_to_cart(&store, &catalog, &config, "1").unwrap();
        let cart = add_to_cart(&store, &catalog, &config, "1").unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_set_and_clear_user() {
        let store = StoreState::new();

        let resp = set_user(&store, "a@b.fr", Some("Alice"));
        assert_eq!(resp.to_string(), "user: Alice <a@b.fr>");

        let resp = set_user(&store, "c@d.fr", None);
        assert_eq!(resp.to_string(), "user: c@d.fr");
        assert!(store.snapshot().is_authenticated());

        let resp = clear_user(&store);
        assert_eq!(resp.to_string(), "user: (none)");
        assert!(!store.snapshot().is_authenticated());
    }
}
