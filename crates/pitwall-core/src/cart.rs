//! # Cart
//!
//! The cart slice of application state.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  View Action              Store Action            Cart Change           │
//! │  ───────────              ────────────            ───────────           │
//! │                                                                         │
//! │  ADD TO CART ────────────► AddToCart ───────────► qty += 1 or push     │
//! │                                                                         │
//! │  "+" / "-" ──────────────► UpdateQuantity ──────► qty = n              │
//! │                                                  (n <= 0 removes)      │
//! │                                                                         │
//! │  Remove ─────────────────► RemoveFromCart ──────► retain(id != x)      │
//! │                                                                         │
//! │  Badge / Subtotal ───────► (read only, recomputed every read)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

/// A line in the cart: a product plus how many of it.
///
/// Serializes flat (`{ id, name, price, image, quantity }`), the shape the
/// view layer already renders for products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,

    /// Always >= 1 while the item is in a cart.
    pub quantity: i64,
}

impl CartItem {
    /// A fresh line for `product` with quantity 1.
    pub fn new(product: Product) -> Self {
        CartItem {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by product id (adding the same product again bumps
///   its quantity in place)
/// - No stored quantity is <= 0; setting one removes the line
/// - Lines keep insertion order; removal never reorders the rest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == item_id)
    }

    /// Adds one of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity += 1, position unchanged
    /// - Otherwise: appended with quantity 1
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            debug!(product_id = %product.id, quantity = item.quantity, "cart quantity bumped");
            return;
        }

        self.items.push(CartItem::new(product.clone()));
        debug!(product_id = %product.id, lines = self.items.len(), "cart line added");
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - Unknown id: nothing happens, returns `false`
    /// - `quantity <= 0`: the line is removed
    /// - Otherwise the quantity is replaced
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> bool {
        let Some(index) = self.items.iter().position(|i| i.id() == item_id) else {
            debug!(item_id, "update_quantity for item not in cart ignored");
            return false;
        };

        if quantity <= 0 {
            self.items.remove(index);
            debug!(item_id, lines = self.items.len(), "cart line removed");
            return true;
        }

        self.items[index].quantity = quantity;
        debug!(item_id, quantity, "cart quantity set");
        true
    }

    /// Removes a line. Returns `false` if it was not in the cart.
    pub fn remove(&mut self, item_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id() != item_id);

        let removed = self.items.len() != initial_len;
        if removed {
            debug!(item_id, lines = self.items.len(), "cart line removed");
        }
        removed
    }

    /// Empties the cart. Returns `false` if it was already empty.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        true
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities (the header badge number). Saturates at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, item| count.saturating_add(item.quantity))
    }

    /// Sum of price × quantity over every line.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart totals summary for the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: i64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product::new(
            id,
            format!("Product {}", id),
            Money::from_cents(price_cents),
            "/images/test.jpg",
        )
    }

    fn ids(cart: &Cart) -> Vec<&str> {
        cart.items().iter().map(CartItem::id).collect()
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 999));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get("1").unwrap().quantity, 1);
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add(&product);
        cart.add(&product);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("1").unwrap().quantity, 2);
    }

    #[test]
    fn test_cart_increment_keeps_position() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 100));
        cart.add(&test_product("b", 100));
        cart.add(&test_product("a", 100));

        assert_eq!(ids(&cart), ["a", "b"]);
    }

    #[test]
    fn test_cart_item_keeps_full_product() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);
        cart.add(&product);

        assert_eq!(cart.items()[0].product, product);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 999));

        assert!(cart.update_quantity("1", 5));
        assert_eq!(cart.get("1").unwrap().quantity, 5);
        assert_eq!(cart.subtotal().cents(), 4995);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 100));
        cart.add(&test_product("b", 100));
        cart.add(&test_product("c", 100));

        assert!(cart.update_quantity("b", 0));
        assert_eq!(ids(&cart), ["a", "c"]);

        assert!(cart.update_quantity("a", -3));
        assert_eq!(ids(&cart), ["c"]);
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 100));
        let before = cart.clone();

        assert!(!cart.update_quantity("missing", 4));
        assert!(!cart.update_quantity("missing", 0));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 250));
        cart.add(&test_product("b", 1000));
        cart.add(&test_product("b", 1000));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal.cents(), 2250);
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        assert!(!cart.clear());

        cart.add(&test_product("1", 999));
        assert!(cart.clear());
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_item_count_saturates() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 100));
        assert!(cart.update_quantity("a", i64::MAX));
        cart.add(&test_product("b", 100));

        assert_eq!(cart.item_count(), i64::MAX);
        assert_eq!(CartTotals::from(&cart).item_count, i64::MAX);
    }

    #[test]
    fn test_extreme_quantities_saturate() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 3999));
        cart.update_quantity("a", i64::MAX);

        // Adding again stays at the ceiling.
        cart.add(&test_product("a", 3999));
        assert_eq!(cart.get("a").unwrap().quantity, i64::MAX);
        assert_eq!(cart.line_count(), 1);

        cart.add(&test_product("b", 4499));
        assert_eq!(cart.item_count(), i64::MAX);
        assert_eq!(cart.subtotal().cents(), i64::MAX);
        assert!(!cart.subtotal().is_negative());
    }

    #[test]
    fn test_cart_item_serializes_flat() {
        let item = CartItem::new(test_product("tee-1", 3999));
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], "tee-1");
        assert_eq!(json["price"], 3999);
        assert_eq!(json["quantity"], 1);
    }
}
