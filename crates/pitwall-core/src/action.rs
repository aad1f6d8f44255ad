//! # Actions
//!
//! Everything the view layer can ask the store to do, as data.
//!
//! `AppState::apply` is the reducer: it matches an [`Action`] to the slice
//! operation that handles it and reports whether state changed. It never
//! notifies anyone; that is the store's job, once per applied action.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::auth::{AuthField, AuthTrigger};
use crate::state::AppState;
use crate::types::{PageId, Product};

/// A state change requested by the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    NavigateTo { page: PageId },
    AddToCart { product: Product },
    UpdateQuantity { item_id: String, quantity: i64 },
    RemoveFromCart { item_id: String },
    ClearCart,
    SetSearchQuery { query: String },
    SetAuthField { field: AuthField, value: String },
    AdvanceAuthStep { trigger: AuthTrigger },
    SelectProduct { product: Product },
    OpenCategory { category_id: String },
}

/// Whether an action changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// State changed; subscribers are notified once.
    Applied,
    /// Nothing to do (unknown cart id, trigger not offered by the current
    /// step, unknown category). Subscribers are not notified.
    Ignored,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

impl From<bool> for Outcome {
    fn from(changed: bool) -> Self {
        if changed {
            Outcome::Applied
        } else {
            Outcome::Ignored
        }
    }
}

impl AppState {
    /// Applies one action.
    pub fn apply(&mut self, action: Action) -> Outcome {
        match action {
            Action::NavigateTo { page } => self.navigate_to(page),
            Action::AddToCart { product } => {
                self.cart.add(&product);
                Outcome::Applied
            }
            Action::UpdateQuantity { item_id, quantity } => {
                self.cart.update_quantity(&item_id, quantity).into()
            }
            Action::RemoveFromCart { item_id } => self.cart.remove(&item_id).into(),
            Action::ClearCart => self.cart.clear().into(),
            Action::SetSearchQuery { query } => {
                self.search_query = query;
                Outcome::Applied
            }
            Action::SetAuthField { field, value } => {
                self.auth.set_field(field, value);
                Outcome::Applied
            }
            Action::AdvanceAuthStep { trigger } => self.auth.advance(trigger).is_some().into(),
            Action::SelectProduct { product } => self.select_product(product),
            Action::OpenCategory { category_id } => self.open_category(&category_id),
        }
    }
}
