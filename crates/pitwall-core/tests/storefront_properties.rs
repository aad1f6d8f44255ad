//! End-to-end checks of the store through its public action API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pitwall_core::{
    filter_products, AuthField, AuthStep, AuthTrigger, Catalog, Outcome, PageId, Product,
    StateStore,
};

fn store() -> StateStore {
    StateStore::seeded().expect("seed catalog is valid")
}

fn product(store: &StateStore, id: &str) -> Product {
    store
        .get()
        .find_product(id)
        .cloned()
        .unwrap_or_else(|| panic!("{id} is seeded"))
}

fn cart_ids(store: &StateStore) -> Vec<String> {
    store
        .get()
        .cart
        .items()
        .iter()
        .map(|i| i.id().to_string())
        .collect()
}

#[test]
fn adding_twice_merges_into_one_line() {
    let mut store = store();
    for id in ["tee-1", "tee-5", "tee-8"] {
        let p = product(&store, id);
        store.add_to_cart(p.clone());
        store.add_to_cart(p);

        let lines: Vec<_> = store
            .get()
            .cart
            .items()
            .iter()
            .filter(|i| i.id() == id)
            .collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }
}

#[test]
fn zero_or_negative_quantity_removes_and_keeps_order() {
    let mut store = store();
    for id in ["tee-1", "tee-2", "tee-3", "tee-4"] {
        let p = product(&store, id);
        store.add_to_cart(p);
    }

    store.update_quantity("tee-2", 0);
    assert_eq!(cart_ids(&store), ["tee-1", "tee-3", "tee-4"]);

    store.update_quantity("tee-4", -1);
    assert_eq!(cart_ids(&store), ["tee-1", "tee-3"]);
}

#[test]
fn subtotal_follows_cart_contents() {
    let mut store = store();
    let tee1 = product(&store, "tee-1");
    let tee2 = product(&store, "tee-2");

    store.add_to_cart(tee1);
    store.add_to_cart(tee2.clone());
    store.add_to_cart(tee2);

    // 39.99 + 2 * 44.99
    assert_eq!(store.compute_subtotal().cents(), 12997);
    assert_eq!(store.compute_subtotal().to_string(), "$129.97");

    store.update_quantity("tee-1", 3);
    assert_eq!(store.compute_subtotal().cents(), 3 * 3999 + 2 * 4499);

    store.update_quantity("tee-2", 0);
    assert_eq!(store.compute_subtotal().cents(), 3 * 3999);
}

#[test]
fn filter_matches_names_case_insensitively() {
    let catalog = Catalog::seed().unwrap();
    let tees = &catalog.categories()[0].products;

    let all = filter_products(tees, "");
    assert_eq!(all.len(), tees.len());
    assert!(all.iter().zip(tees.iter()).all(|(a, b)| a.id == b.id));

    let racing = filter_products(tees, "RACING");
    assert_eq!(racing.len(), 8);
    assert!(racing.iter().all(|p| p.name.contains("Racing")));
}

#[test]
fn auth_cycle_returns_to_login() {
    let mut store = store();
    let steps = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&steps);
    store.subscribe(move |state| sink.lock().unwrap().push(state.auth.step));

    for trigger in [
        AuthTrigger::CreateAccount,
        AuthTrigger::AlreadyHaveAccount,
        AuthTrigger::ForgotPassword,
        AuthTrigger::SendOtp,
        AuthTrigger::VerifyOtp,
        AuthTrigger::UpdatePassword,
    ] {
        assert_eq!(store.advance_auth_step(trigger), Outcome::Applied);
    }

    assert_eq!(
        *steps.lock().unwrap(),
        [
            AuthStep::Signup,
            AuthStep::Login,
            AuthStep::Forgot,
            AuthStep::Otp,
            AuthStep::Reset,
            AuthStep::Login,
        ]
    );
    assert_eq!(store.get().auth.step, AuthStep::Login);
}

#[test]
fn item_count_sums_quantities() {
    let mut store = store();
    for id in ["tee-1", "tee-2", "tee-3"] {
        let p = product(&store, id);
        store.add_to_cart(p);
    }
    let again = product(&store, "tee-3");
    store.add_to_cart(again);

    assert_eq!(store.cart_item_count(), 4);
    assert_eq!(store.cart_totals().line_count, 3);
}

#[test]
fn each_mutating_call_notifies_exactly_once() {
    let mut store = store();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    store.subscribe(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    let tee = product(&store, "tee-6");
    let mut expected = 0;
    let mut check = |store: &StateStore, outcome: Outcome| {
        if outcome.is_applied() {
            expected += 1;
        }
        assert_eq!(calls.load(Ordering::SeqCst), expected);
        assert_eq!(store.revision() as usize, expected);
    };

    let o = store.navigate_to(PageId::Category);
    check(&store, o);
    let o = store.set_search_query("tee 6");
    check(&store, o);
    let o = store.select_product(tee.clone());
    check(&store, o);
    let o = store.add_to_cart(tee);
    check(&store, o);
    let o = store.update_quantity("tee-6", 4);
    check(&store, o);
    let o = store.update_quantity("tee-6", 0);
    check(&store, o);
    let o = store.update_quantity("tee-6", 2);
    assert_eq!(o, Outcome::Ignored);
    check(&store, o);
    let o = store.set_auth_field(AuthField::Email, "kimi@example.com");
    check(&store, o);
    let o = store.advance_auth_step(AuthTrigger::VerifyOtp);
    assert_eq!(o, Outcome::Ignored);
    check(&store, o);

    assert_eq!(calls.load(Ordering::SeqCst), 7);
}

#[test]
fn product_page_without_selection_is_reachable() {
    let mut store = store();
    assert_eq!(store.navigate_to(PageId::Product), Outcome::Applied);
    assert!(store.get().current_product.is_none());
}

#[test]
fn extreme_quantities_saturate_instead_of_overflowing() {
    let mut store = store();
    let tee1 = product(&store, "tee-1");
    let tee2 = product(&store, "tee-2");

    store.add_to_cart(tee1.clone());
    store.update_quantity("tee-1", i64::MAX);
    store.add_to_cart(tee1);
    store.add_to_cart(tee2);

    assert_eq!(cart_ids(&store), ["tee-1", "tee-2"]);
    assert_eq!(store.get().cart.get("tee-1").unwrap().quantity, i64::MAX);
    assert_eq!(store.cart_item_count(), i64::MAX);
    assert_eq!(store.compute_subtotal().cents(), i64::MAX);
    assert_eq!(store.cart_totals().item_count, i64::MAX);
}
