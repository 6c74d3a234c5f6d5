//! # Session Store Logic
//!
//! The session state and the only two transitions it accepts.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Transitions                            │
//! │                                                                         │
//! │  Action                     Effect                                      │
//! │  ──────                     ──────                                      │
//! │                                                                         │
//! │  AddToCart(item) ─────────► cart.push(item)    (no dedup, no merge)    │
//! │                                                                         │
//! │  SetUser(Some(u)) ────────► user = Some(u)     (replace wholesale)     │
//! │                                                                         │
//! │  SetUser(None) ───────────► user = None        (clears identity)       │
//! │                                                                         │
//! │  Unknown ─────────────────► state unchanged                             │
//! │                                                                         │
//! │  NOTE: no action writes `orders`.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Form
//! Actions decode from `{ "type": ..., "payload": ... }`. Both the historical
//! tags (`AJOUTER_PANIER`, `CONNECTER_UTILISATEUR`) and the English ones
//! (`ADD_TO_CART`, `SET_USER`) are accepted; any other tag decodes to
//! [`Action::Unknown`].

use serde::{Deserialize, Serialize};

use crate::types::{CartItem, Order, User};

// =============================================================================
// Session State
// =============================================================================

/// Everything the storefront knows about the current session.
///
/// ## Invariants
/// - `cart` is append-only and keeps insertion order
/// - `user` is a single slot, last write wins
/// - `orders` stays empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub cart: Vec<CartItem>,
    pub user: Option<User>,
    pub orders: Vec<Order>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

// =============================================================================
// Actions
// =============================================================================

/// A named request to transition the session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    #[serde(rename = "ADD_TO_CART", alias = "AJOUTER_PANIER")]
    AddToCart(CartItem),

    #[serde(rename = "SET_USER", alias = "CONNECTER_UTILISATEUR")]
    SetUser(Option<User>),

    /// Any action kind the store does not handle.
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddToCart(_) => "ADD_TO_CART",
            Action::SetUser(_) => "SET_USER",
            Action::Unknown => "UNKNOWN",
        }
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// Applies `action` to `state` and returns the next state.
pub fn reduce(mut state: SessionState, action: Action) -> SessionState {
    match action {
        Action::AddToCart(item) => {
            state.cart.push(item);
            state
        }
        Action::SetUser(user) => {
            state.user = user;
            state
        }
        Action::Unknown => state,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Product;

    fn item(name: &str) -> CartItem {
        CartItem::from_product(&Product::new(name, name, "Burgers", Money::from_cents(500)))
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = SessionState::default();
        assert!(state.cart.is_empty());
        assert!(state.user.is_none());
        assert!(state.orders.is_empty());
    }

    #[test]
    fn test_add_to_cart_appends_in_order_without_dedup() {
        let (a, b) = (item("A"), item("B"));

        let state = [a.clone(), b.clone(), a.clone()]
            .into_iter()
            .fold(SessionState::default(), |s, i| reduce(s, Action::AddToCart(i)));

        assert_eq!(state.cart, vec![a.clone(), b, a]);
        assert_eq!(state.cart.len(), 3);
        assert!(state.orders.is_empty());
    }

    #[test]
    fn test_set_user_is_idempotent() {
        let user = User::new("a@b.fr");
        let once = reduce(SessionState::default(), Action::SetUser(Some(user.clone())));
        let twice = reduce(once.clone(), Action::SetUser(Some(user)));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_set_user_replaces_and_clears() {
        let state = reduce(
            SessionState::default(),
            Action::SetUser(Some(User::new("first@b.fr"))),
        );
        let state = reduce(
            state,
            Action::SetUser(Some(User::new("second@b.fr").with_name("Second"))),
        );
        assert_eq!(state.user.as_ref().map(|u| u.email.as_str()), Some("second@b.fr"));
        assert_eq!(state.user.as_ref().and_then(|u| u.name.as_deref()), Some("Second"));

        let cleared = reduce(state, Action::SetUser(None));
        assert!(cleared.user.is_none());
        assert!(!cleared.is_authenticated());
    }

    #[test]
    fn test_unknown_action_leaves_state_unchanged() {
        let state = reduce(SessionState::default(), Action::AddToCart(item("A")));
        let after = reduce(state.clone(), Action::Unknown);
        assert_eq!(after, state);
    }

    #[test]
    fn test_decode_unknown_tag() {
        let action: Action = serde_json::from_str(r#"{"type": "NOPE"}"#).unwrap();
        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn test_decode_historical_tags() {
        let json = r#"{"type": "CONNECTER_UTILISATEUR", "payload": {"email": "x@y.fr"}}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(action, Action::SetUser(Some(User::new("x@y.fr"))));

        let json = r#"{"type": "SET_USER", "payload": null}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(action, Action::SetUser(None));
    }

    #[test]
    fn test_action_kind() {
        assert_eq!(Action::AddToCart(item("A")).kind(), "ADD_TO_CART");
        assert_eq!(Action::SetUser(None).kind(), "SET_USER");
        assert_eq!(Action::Unknown.kind(), "UNKNOWN");
    }
}
