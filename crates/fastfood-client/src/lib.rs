//! # fastfood-client: I/O Layer for the Storefront
//!
//! Every call that leaves the process: the backend API, the token file and
//! the payment provider. Also owns configuration loading.
//!
//! ## Background Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CatalogLoader::start ──► tokio task ──► GET /api/produits             │
//! │        status: watch<CatalogStatus>                                     │
//! │                                                                         │
//! │   CheckoutInitiator::start ──► tokio task ──► PaymentProvider::load     │
//! │        status: watch<PaymentClientStatus>                               │
//! │                                                                         │
//! │   Both fire once, either may finish first, neither has a timeout.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Backend HTTP calls and the traits they implement
//! - [`auth`] - Login form and token persistence
//! - [`catalog`] - One-shot catalog loader
//! - [`checkout`] - Payment client acquisition and the pay action
//! - [`payment`] - Hosted checkout over HTTP
//! - [`token_store`] - Durable key/value storage
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Client error types

pub mod api;
pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod payment;
pub mod token_store;

pub use api::{AuthBackend, CatalogSource, Credentials, HttpApi, LoginResponse};
pub use auth::{Authenticator, LoginForm};
pub use catalog::{CatalogLoader, CatalogStatus};
pub use checkout::{
    CheckoutInitiator, CheckoutMode, CheckoutOutcome, CheckoutRequest, CheckoutSession, LineItem,
    PaymentClient, PaymentClientStatus, PaymentProvider,
};
pub use config::StorefrontConfig;
pub use error::{ClientError, ClientResult};
pub use payment::HostedCheckoutProvider;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
