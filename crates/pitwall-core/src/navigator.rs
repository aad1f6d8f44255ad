//! # Navigator
//!
//! Page and selection handling on [`AppState`].
//!
//! ## Product Page Precondition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product card click                                                     │
//! │        │                                                                │
//! │        ├─► current_product = product     (caller's job)                │
//! │        └─► navigate_to(Product)                                         │
//! │                                                                         │
//! │  navigate_to(Product) with no current_product is NOT blocked.          │
//! │  It is logged at WARN; the view must not rely on it rendering.         │
//! │  select_product() does both steps as one operation.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use crate::action::Outcome;
use crate::catalog::{self, filter_products};
use crate::state::AppState;
use crate::types::{Category, PageId, Product};

impl AppState {
    /// Switches page. Any page is reachable from any other.
    pub fn navigate_to(&mut self, page: PageId) -> Outcome {
        if page == PageId::Product && self.current_product.is_none() {
            warn!("navigating to product page with no current product selected");
        }

        debug!(from = %self.current_page, to = %page, "navigate");
        self.current_page = page;
        Outcome::Applied
    }

    /// Selects `product` and opens its page.
    pub fn select_product(&mut self, product: Product) -> Outcome {
        debug!(product_id = %product.id, "product selected");
        self.current_product = Some(product);
        self.navigate_to(PageId::Product)
    }

    /// Shows a category on the category page.
    ///
    /// Unknown ids are ignored.
    pub fn open_category(&mut self, category_id: &str) -> Outcome {
        if catalog::find_category(&self.categories, category_id).is_none() {
            debug!(category_id, "open_category for unknown category ignored");
            return Outcome::Ignored;
        }

        self.current_category = Some(category_id.to_string());
        self.navigate_to(PageId::Category)
    }

    /// The category the category page shows: the opened one, else the first.
    pub fn current_category(&self) -> Option<&Category> {
        match &self.current_category {
            Some(id) => catalog::find_category(&self.categories, id),
            None => self.categories.first(),
        }
    }

    /// Products of the current category matching the search box.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.current_category()
            .map(|c| filter_products(&c.products, &self.search_query))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::seeded().unwrap()
    }

    #[test]
    fn test_navigate_to_any_page() {
        let mut state = state();
        for page in PageId::ALL {
            assert_eq!(state.navigate_to(page), Outcome::Applied);
            assert_eq!(state.current_page, page);
        }
    }

    #[test]
    fn test_navigate_to_product_without_selection_is_not_blocked() {
        let mut state = state();
        state.navigate_to(PageId::Product);

        assert_eq!(state.current_page, PageId::Product);
        assert!(state.current_product.is_none());
    }

    #[test]
    fn test_select_product_sets_both_fields() {
        let mut state = state();
        let tee = state.find_product("tee-4").cloned().unwrap();

        state.select_product(tee.clone());

        assert_eq!(state.current_page, PageId::Product);
        assert_eq!(state.current_product, Some(tee));
    }

    #[test]
    fn test_open_category() {
        let mut state = state();

        assert_eq!(state.open_category("caps"), Outcome::Applied);
        assert_eq!(state.current_page, PageId::Category);
        assert_eq!(state.current_category().unwrap().name, "Caps");
        assert!(state.visible_products().is_empty());
    }

    #[test]
    fn test_open_unknown_category_is_ignored() {
        let mut state = state();
        let before = state.clone();

        assert_eq!(state.open_category("boots"), Outcome::Ignored);
        assert_eq!(state, before);
    }

    #[test]
    fn test_visible_products_defaults_to_first_category() {
        let mut state = state();
        assert_eq!(state.visible_products().len(), 8);

        state.search_query = "tee 7".to_string();
        let visible = state.visible_products();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "tee-7");
    }
}
