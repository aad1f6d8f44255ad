//! # pitwall-core: Storefront State & Logic
//!
//! This crate is the **heart** of the Pitwall storefront. It owns the single
//! application state store and every rule that changes it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pitwall Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               View layer (shell / web frontend)                 │   │
//! │  │    Home ──► Category ──► Product ──► Cart      Auth forms       │   │
//! │  └────────────┬─────────────────────────────────────▲──────────────┘   │
//! │               │ dispatch(Action)                    │ listener(&state)  │
//! │  ┌────────────▼─────────────────────────────────────┴──────────────┐   │
//! │  │               ★ pitwall-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │   cart    │  │   auth    │  │ navigator │  │   │
//! │  │   │ StateStore│  │   Cart    │  │ AuthStep  │  │  PageId   │  │   │
//! │  │   │ Subscribe │  │ CartItem  │  │ AuthTrig. │  │ selection │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • SYNCHRONOUS • SINGLE SOURCE OF TRUTH   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - `StateStore`: snapshot, dispatch, subscriptions
//! - [`state`] - `AppState` aggregate and `StatePatch`
//! - [`action`] - `Action` enum and the reducer
//! - [`cart`] - cart aggregation (add / update / remove, totals)
//! - [`auth`] - auth step machine
//! - [`navigator`] - page switching and product / category selection
//! - [`catalog`] - search filter, lookups, seed catalog
//! - [`money`] - integer-cent `Money`
//! - [`types`] - `Product`, `Category`, `PageId`, `User`
//! - [`validation`] / [`error`] - catalog checks and error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pitwall_core::{PageId, StateStore};
//!
//! let mut store = StateStore::seeded().unwrap();
//! let _sub = store.subscribe(|state| println!("now on {}", state.current_page));
//!
//! let tee = store.get().find_product("tee-1").cloned().unwrap();
//! store.add_to_cart(tee.clone());
//! store.add_to_cart(tee);
//! store.navigate_to(PageId::Cart);
//!
//! assert_eq!(store.cart_item_count(), 2);
//! assert_eq!(store.compute_subtotal().to_string(), "$79.98");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod action;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod navigator;
pub mod state;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use action::{Action, Outcome};
pub use auth::{AuthField, AuthState, AuthStep, AuthTrigger};
pub use cart::{Cart, CartItem, CartTotals};
pub use catalog::{filter_products, Catalog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use state::{AppState, StatePatch};
pub use store::{StateStore, Subscription};
pub use types::*;
