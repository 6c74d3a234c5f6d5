//! # Storefront Commands
//!
//! Everything the user can ask the storefront to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Menu view (category groups)
//! ├── cart.rs      ◄─── Cart and user dispatches
//! ├── auth.rs      ◄─── Login form submission
//! ├── checkout.rs  ◄─── Pay button
//! ├── config.rs    ◄─── Configuration view
//! └── status.rs    ◄─── Background load status
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the store
//! fn get_cart(store: &StoreState, config: &ConfigState)
//!
//! // Needs the store and the catalog
//! fn add_to_cart(store: &StoreState, catalog: &CatalogLoader, product_id: &str)
//!
//! // Only needs the checkout initiator
//! async fn pay(checkout: &CheckoutInitiator)
//! ```
//!
//! Commands return view types that implement `Display`; the REPL prints them.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod status;
