//! # Application State
//!
//! The aggregate the [`StateStore`](crate::store::StateStore) owns, and the
//! partial-update type used by `StateStore::set`.
//!
//! ```text
//! AppState
//! ├── current_page       PageId           (navigator)
//! ├── search_query       String           (catalog filter input)
//! ├── cart               Cart             (cart manager)
//! ├── user               Option<User>     (carried, unused by core logic)
//! ├── auth               AuthState        (auth flow)
//! ├── categories         Vec<Category>    (seeded once, read-only)
//! ├── current_product    Option<Product>  (navigator)
//! └── current_category   Option<String>   (navigator)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::action::Outcome;
use crate::auth::AuthState;
use crate::cart::{Cart, CartTotals};
use crate::catalog::{self, Catalog};
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Category, PageId, Product, User};

/// Everything the view layer renders from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub current_page: PageId,
    pub search_query: String,
    pub cart: Cart,
    pub user: Option<User>,
    pub auth: AuthState,
    pub categories: Vec<Category>,
    pub current_product: Option<Product>,
    /// Category shown on the category page. `None` means the first one.
    pub current_category: Option<String>,
}

impl AppState {
    /// Fresh state over `catalog`: home page, empty cart, auth at login.
    pub fn new(catalog: Catalog) -> Self {
        AppState {
            current_page: PageId::Home,
            search_query: String::new(),
            cart: Cart::new(),
            user: None,
            auth: AuthState::default(),
            categories: catalog.into_categories(),
            current_product: None,
            current_category: None,
        }
    }

    /// Fresh state over the launch catalog.
    pub fn seeded() -> CoreResult<Self> {
        Ok(AppState::new(Catalog::seed()?))
    }

    pub fn find_product(&self, id: &str) -> Option<&Product> {
        catalog::find_product(&self.categories, id)
    }

    /// Cart subtotal, recomputed from the current lines.
    pub fn compute_subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    /// Badge number: total quantity across the cart.
    pub fn cart_item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn cart_totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    /// Applies every field present in `patch`.
    pub fn apply_patch(&mut self, patch: StatePatch) -> Outcome {
        if patch.is_empty() {
            return Outcome::Ignored;
        }

        let StatePatch {
            current_page,
            search_query,
            cart,
            user,
            auth,
            current_product,
            current_category,
        } = patch;

        if let Some(page) = current_page {
            self.current_page = page;
        }
        if let Some(query) = search_query {
            self.search_query = query;
        }
        if let Some(cart) = cart {
            self.cart = cart;
        }
        if let Some(user) = user {
            self.user = user;
        }
        if let Some(auth) = auth {
            self.auth = auth;
        }
        if let Some(product) = current_product {
            self.current_product = product;
        }
        if let Some(category) = current_category {
            self.current_category = category;
        }

        Outcome::Applied
    }
}

// =============================================================================
// State Patch
// =============================================================================

/// A partial update of top-level [`AppState`] fields.
///
/// `None` leaves a field alone. Optional fields take `Some(None)` to clear.
///
/// ```rust
/// use pitwall_core::{PageId, StatePatch};
///
/// let patch = StatePatch::new()
///     .current_page(PageId::Category)
///     .search_query("tee");
/// assert!(!patch.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub current_page: Option<PageId>,
    pub search_query: Option<String>,
    pub cart: Option<Cart>,
    pub user: Option<Option<User>>,
    pub auth: Option<AuthState>,
    pub current_product: Option<Option<Product>>,
    pub current_category: Option<Option<String>>,
}

impl StatePatch {
    pub fn new() -> Self {
        StatePatch::default()
    }

    pub fn current_page(mut self, page: PageId) -> Self {
        self.current_page = Some(page);
        self
    }

    pub fn search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn cart(mut self, cart: Cart) -> Self {
        self.cart = Some(cart);
        self
    }

    pub fn user(mut self, user: Option<User>) -> Self {
        self.user = Some(user);
        self
    }

    pub fn auth(mut self, auth: AuthState) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn current_product(mut self, product: Option<Product>) -> Self {
        self.current_product = Some(product);
        self
    }

    pub fn current_category(mut self, category_id: Option<String>) -> Self {
        self.current_category = Some(category_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == StatePatch::default()
    }
}
