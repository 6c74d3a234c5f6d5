//! # State Module
//!
//! Application state shared by the storefront commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌───────────────────────────┬──────────────────────┐           │
//! │          ▼                           ▼                      │           │
//! │  ┌──────────────────────┐   ┌──────────────────────┐        │           │
//! │  │     StoreState       │   │     ConfigState      │        │           │
//! │  │                      │   │                      │        │           │
//! │  │  Arc<Mutex<          │   │  StorefrontConfig    │        │           │
//! │  │    SessionState      │   │  menu categories     │        │           │
//! │  │  >>                  │   │                      │        │           │
//! │  └──────────────────────┘   └──────────────────────┘        │           │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: one reducer call per lock                               │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod store;

pub use config::ConfigState;
pub use store::StoreState;
