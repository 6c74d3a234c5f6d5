//! # fastfood-core: Pure Session Logic for the Storefront
//!
//! This crate holds the session state machine and the catalog projection as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront REPL (apps/storefront)               │   │
//! │  │      login form ── menu ── cart ── pay button                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ fastfood-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   store   │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │  Action   │  │  grouping │  │   │
//! │  │   │ CartItem  │  │  € format │  │  reduce   │  │  lines    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                fastfood-client (I/O Layer)                      │   │
//! │  │       backend HTTP, token file, hosted checkout                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, User, Order)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`store`] - Session state, actions and the reducer
//! - [`catalog`] - Category grouping of the product list
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use fastfood_core::{reduce, Action, CartItem, Money, Product, SessionState};
//!
//! let burger = Product::new(1, "Cheeseburger", "Burgers", Money::from_cents(550));
//! let state = reduce(SessionState::default(), Action::AddToCart(CartItem::from_product(&burger)));
//!
//! assert_eq!(state.cart.len(), 1);
//! assert!(state.orders.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod store;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{default_categories, find_product, group_by_category, product_line, ProductGroup};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use store::{reduce, Action, SessionState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key under which the last authentication token is persisted.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Prefix of generated order numbers (`CMD-<unix millis>`).
pub const ORDER_NUMBER_PREFIX: &str = "CMD-";

/// Currency symbol appended to rendered prices.
pub const CURRENCY_SYMBOL: &str = "€";
