//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  product_id     │──►│  number         │       │
//! │  │  name (nom)     │   │  name           │   │  items          │       │
//! │  │  category       │   │  unit_price     │   │  created_at     │       │
//! │  │  price (prix)   │   │  added_at       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Category     │   │      User       │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  id, name       │   │  email, name    │                              │
//! │  │  image          │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! The backend speaks French (`nom`, `categorie`, `prix`). Every field accepts
//! both the French and the English name on input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::{self, Money};
use crate::ORDER_NUMBER_PREFIX;

// =============================================================================
// Product
// =============================================================================

/// Product identifier as sent by the backend: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

/// A product from the remote catalog. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    #[serde(alias = "nom")]
    pub name: String,

    /// Category name, matched exactly against [`Category::name`].
    #[serde(alias = "categorie")]
    pub category: String,

    #[serde(alias = "prix", with = "money::major_units")]
    pub price: Money,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A menu category. Products are attached to it by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,

    #[serde(alias = "nom")]
    pub name: String,

    /// Image file shown next to the category heading.
    #[serde(default)]
    pub image: Option<String>,
}

impl Category {
    pub fn new(id: u32, name: impl Into<String>, image: Option<&str>) -> Self {
        Category {
            id,
            name: name.into(),
            image: image.map(str::to_string),
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// An entry in the cart.
///
/// Snapshot of the product at the time it was added. Adding the same product
/// twice yields two entries; there is no quantity field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Freezes the product's name and price into a cart entry.
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            added_at: Utc::now(),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// The authenticated identity held by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        User {
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

// =============================================================================
// Order
// =============================================================================

/// Human-readable order reference, `CMD-<unix millis>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Builds the order number for the given instant.
    pub fn generate(now: DateTime<Utc>) -> Self {
        OrderNumber(format!("{}{}", ORDER_NUMBER_PREFIX, now.timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A placed order. The session models an order history, but no action
/// writes to it yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub number: OrderNumber,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
