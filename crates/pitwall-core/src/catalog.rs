//! # Catalog
//!
//! The product catalog: search filtering, lookups and the seed data the
//! store starts with.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Search box keystroke                                                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  set_search_query("racing") ──► store notifies ──► view re-renders     │
//! │                                                       │                 │
//! │                                                       ▼                 │
//! │                              filter_products(category.products, query)  │
//! │                              (re-run on every render, never cached)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Category, Product};
use crate::validation::validate_category;

/// Image used by every seeded product until real photography exists.
pub const PLACEHOLDER_TEE_IMAGE: &str = "/images/placeholder-tee.jpg";

/// Number of tees in the seed catalog.
pub const SEED_TEE_COUNT: i64 = 8;

// =============================================================================
// Filtering
// =============================================================================

/// Returns the products whose name contains `query`, ignoring case.
///
/// Order is preserved. An empty query matches every product.
///
/// ```rust
/// use pitwall_core::catalog::{filter_products, Catalog};
///
/// let catalog = Catalog::seed().unwrap();
/// let tees = &catalog.categories()[0].products;
///
/// assert_eq!(filter_products(tees, "").len(), 8);
/// assert_eq!(filter_products(tees, "RACING").len(), 8);
/// assert_eq!(filter_products(tees, "tee 3").len(), 1);
/// ```
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

// =============================================================================
// Lookups
// =============================================================================

/// Finds a product anywhere in `categories`.
pub fn find_product<'a>(categories: &'a [Category], id: &str) -> Option<&'a Product> {
    categories.iter().find_map(|c| c.product(id))
}

pub fn find_category<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.id == id)
}

// =============================================================================
// Catalog
// =============================================================================

/// A validated, ordered list of categories.
///
/// ## Invariants
/// - Category ids are unique
/// - Product ids are unique across the whole catalog (the cart keys on them)
/// - Every name is non-blank and every price is non-negative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Validates `categories` and wraps them.
    pub fn new(categories: Vec<Category>) -> CoreResult<Self> {
        let mut category_ids = HashSet::new();
        let mut product_ids = HashSet::new();

        for category in &categories {
            validate_category(category)?;

            if !category_ids.insert(category.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "category id".to_string(),
                    value: category.id.clone(),
                }
                .into());
            }

            for product in &category.products {
                if !product_ids.insert(product.id.as_str()) {
                    return Err(ValidationError::Duplicate {
                        field: "product id".to_string(),
                        value: product.id.clone(),
                    }
                    .into());
                }
            }
        }

        Ok(Catalog { categories })
    }

    /// The storefront's launch catalog.
    ///
    /// ## Contents
    /// ```text
    /// tees         Tees             tee-1 .. tee-8, $39.99 rising $5.00 each
    /// jackets      Jackets          (empty)
    /// caps         Caps             (empty)
    /// accessories  Accessories      (empty)
    /// limited      Limited Edition  (empty)
    /// ```
    pub fn seed() -> CoreResult<Self> {
        let tees = (0..SEED_TEE_COUNT)
            .map(|i| {
                Product::new(
                    format!("tee-{}", i + 1),
                    format!("F1 Racing Tee {}", i + 1),
                    Money::from_cents(3999 + i * 500),
                    PLACEHOLDER_TEE_IMAGE,
                )
            })
            .collect();

        Catalog::new(vec![
            Category::new("tees", "Tees", tees),
            Category::new("jackets", "Jackets", Vec::new()),
            Category::new("caps", "Caps", Vec::new()),
            Category::new("accessories", "Accessories", Vec::new()),
            Category::new("limited", "Limited Edition", Vec::new()),
        ])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn into_categories(self) -> Vec<Category> {
        self.categories
    }

    pub fn find_product(&self, id: &str) -> Option<&Product> {
        find_product(&self.categories, id)
    }

    /// Like [`Catalog::find_product`], for callers that report a miss.
    pub fn require_product(&self, id: &str) -> CoreResult<&Product> {
        self.find_product(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tee(id: &str, name: &str) -> Product {
        Product::new(id, name, Money::from_cents(1000), PLACEHOLDER_TEE_IMAGE)
    }

    #[test]
    fn test_seed_catalog_shape() {
        let catalog = Catalog::seed().unwrap();
        let ids: Vec<&str> = catalog.categories().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["tees", "jackets", "caps", "accessories", "limited"]);

        let tees = &catalog.categories()[0].products;
        assert_eq!(tees.len(), 8);
        assert_eq!(tees[0].name, "F1 Racing Tee 1");
        assert_eq!(tees[0].price.cents(), 3999);
        assert_eq!(tees[1].price.cents(), 4499);
        assert_eq!(tees[7].price.cents(), 7499);
    }

    #[test]
    fn test_filter_empty_query_returns_all_in_order() {
        let products = vec![tee("a", "Alpha"), tee("b", "Bravo"), tee("c", "Charlie")];
        let filtered = filter_products(&products, "");

        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let products = vec![
            tee("t1", "F1 Racing Tee 1"),
            tee("c1", "Pit Crew Cap"),
            tee("t2", "F1 Racing Tee 2"),
        ];

        let filtered = filter_products(&products, "RACING");
        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["t1", "t2"]);

        assert!(filter_products(&products, "jacket").is_empty());
    }

    #[test]
    fn test_filter_empty_product_list() {
        assert!(filter_products(&[], "anything").is_empty());
        assert!(filter_products(&[], "").is_empty());
    }

    #[test]
    fn test_duplicate_product_ids_rejected_across_categories() {
        let err = Catalog::new(vec![
            Category::new("tees", "Tees", vec![tee("x-1", "Tee")]),
            Category::new("caps", "Caps", vec![tee("x-1", "Cap")]),
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { value, .. }) if value == "x-1"
        ));
    }

    #[test]
    fn test_duplicate_category_ids_rejected() {
        let result = Catalog::new(vec![
            Category::new("tees", "Tees", Vec::new()),
            Category::new("tees", "More Tees", Vec::new()),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_require_product() {
        let catalog = Catalog::seed().unwrap();
        assert_eq!(catalog.require_product("tee-2").unwrap().price.cents(), 4499);
        assert!(matches!(
            catalog.require_product("cap-1"),
            Err(CoreError::ProductNotFound(id)) if id == "cap-1"
        ));
    }
}
