//! # Status Commands
//!
//! Where the two background loads stand, plus a short session summary.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::state::StoreState;
use fastfood_client::{Authenticator, CatalogLoader, CheckoutInitiator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub catalog: String,
    pub payment: String,
    pub cart_items: usize,
    pub user: Option<String>,
    /// A login in this session stored a token. The token file is not read.
    pub token_saved: bool,
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "catalog: {}", self.catalog)?;
        writeln!(f, "payment: {}", self.payment)?;
        writeln!(f, "cart:    {} item(s)", self.cart_items)?;
        writeln!(f, "user:    {}", self.user.as_deref().unwrap_or("(none)"))?;
        write!(
            f,
            "token:   {}",
            if self.token_saved { "saved this session" } else { "none" }
        )
    }
}

pub fn get_status(
    store: &StoreState,
    catalog: &CatalogLoader,
    checkout: &CheckoutInitiator,
    auth: &Authenticator,
) -> StatusView {
    debug!("get_status command");

    let (cart_items, user) = store.with_state(|s| (s.cart.len(), s.user.as_ref().map(|u| u.email.clone())));

    StatusView {
        catalog: catalog.status().label(),
        payment: checkout.status().label(),
        cart_items,
        user,
        token_saved: auth.token_saved(),
    }
}
