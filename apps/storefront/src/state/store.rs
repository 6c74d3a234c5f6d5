//! # Session Store State
//!
//! The container around the session reducer.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  command ──► dispatch(action)                                           │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │            lock ──► state = reduce(state, action) ──► unlock            │
//! │                                                       │                 │
//! │                                                       ▼                 │
//! │                                             snapshot returned           │
//! │                                                                         │
//! │  NOTE: the lock is held for exactly one reducer call.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reducer cannot panic, so a poisoned lock still holds a consistent
//! state and is recovered rather than propagated.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fastfood_core::{reduce, Action, SessionState};
use tracing::info;

/// Shared handle to the single session state. Cloning shares the state.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    state: Arc<Mutex<SessionState>>,
}

impl StoreState {
    /// Creates a store with an empty cart, no user and no orders.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `action` and returns the resulting state.
    pub fn dispatch(&self, action: Action) -> SessionState {
        let kind = action.kind();
        let mut state = self.lock();
        *state = reduce(std::mem::take(&mut *state), action);
        info!(action = kind, cart_items = state.cart.len(), "Action dispatched");
        state.clone()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    /// Executes a function with read access to the state.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = store.with_state(|s| s.cart.len());
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionState) -> R,
    {
        let state = self.lock();
        f(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastfood_core::{CartItem, Money, Product, User};

    fn item(name: &str) -> CartItem {
        CartItem::from_product(&Product::new(name, name, "Burgers", Money::from_cents(500)))
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = StoreState::new();
        assert_eq!(store.snapshot(), SessionState::default());
    }

    #[test]
    fn test_dispatch_is_shared_between_clones() {
        let store = StoreState::new();
        let other = store.clone();

        store.dispatch(Action::AddToCart(item("A")));
        other.dispatch(Action::AddToCart(item("B")));

        let names: Vec<String> = store.with_state(|s| s.cart.iter().map(|i| i.name.clone()).collect());
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_dispatch_returns_new_state() {
        let store = StoreState::new();
        let state = store.dispatch(Action::SetUser(Some(User::new("a@b.fr"))));
        assert!(state.is_authenticated());

        let state = store.dispatch(Action::Unknown);
        assert!(state.is_authenticated());
        assert!(state.orders.is_empty());
    }

    #[test]
    fn test_concurrent_dispatches_are_all_applied() {
        let store = StoreState::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.dispatch(Action::AddToCart(item(&format!("item-{}", i))));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.with_state(|s| s.cart.len()), 8);
    }
}
