//! # Domain Types
//!
//! Catalog and navigation types shared by every slice of the store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │    Product      │   │     PageId      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──┤  id (unique)    │   │  Home           │       │
//! │  │  name           │   │  name           │   │  Category       │       │
//! │  │  products[] ────┼──►│  price (Money)  │   │  Product        │       │
//! │  └─────────────────┘   │  image          │   │  Cart           │       │
//! │                        └─────────────────┘   │  Auth           │       │
//! │                                              │  Checkout       │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products and categories are immutable once seeded; the core never
//! reorders a category's product list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product shown in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier across the whole catalog (e.g. `tee-3`).
    pub id: String,

    /// Display name; this is what the search box matches against.
    pub name: String,

    /// Unit price in cents.
    pub price: Money,

    /// Image reference (a path or URL; the core never loads it).
    pub image: String,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A named grouping of products shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Display order.
    pub products: Vec<Product>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, products: Vec<Product>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            products,
        }
    }

    /// Looks up a product of this category by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

// =============================================================================
// User
// =============================================================================

/// The signed-in user.
///
/// Carried in the snapshot for the view layer; the mocked auth flow never
/// sets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub email: String,
}

// =============================================================================
// Page Id
// =============================================================================

/// The fixed set of pages the view layer can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PageId {
    #[default]
    Home,
    Category,
    Product,
    Cart,
    Auth,
    Checkout,
}

impl PageId {
    pub const ALL: [PageId; 6] = [
        PageId::Home,
        PageId::Category,
        PageId::Product,
        PageId::Cart,
        PageId::Auth,
        PageId::Checkout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Category => "category",
            PageId::Product => "product",
            PageId::Cart => "cart",
            PageId::Auth => "auth",
            PageId::Checkout => "checkout",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = CoreError;

    /// Parses a page name, case-insensitively.
    ///
    /// `products` is accepted for `category`: the home hero's "SHOP NOW"
    /// button links to it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(PageId::Home),
            "category" | "products" => Ok(PageId::Category),
            "product" => Ok(PageId::Product),
            "cart" => Ok(PageId::Cart),
            "auth" | "login" | "account" => Ok(PageId::Auth),
            "checkout" => Ok(PageId::Checkout),
            other => Err(CoreError::UnknownPage(other.to_string())),
        }
    }
}
